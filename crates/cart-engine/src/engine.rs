//! The cart engine and its commit protocol.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use cart_data::{ProductCatalog, StockLookup};
use cart_model::{Cart, ProductId};
use cart_store::SnapshotStore;
use tokio::sync::Mutex;

use crate::error::CartError;
use crate::loader::load_cart;
use crate::notify::{Messages, NotificationSink};

/// A cart mutation, used for logging and message selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    Update,
    Clear,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Remove => "remove",
            Operation::Update => "update",
            Operation::Clear => "clear",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a cart operation.
///
/// Operations never fail outward; a rejection carries its reason and has
/// already been reported to the notification sink.
#[derive(Debug)]
#[must_use]
pub enum Outcome {
    /// The next cart was persisted and published.
    Committed,
    /// Nothing to do; no notification was sent.
    Unchanged,
    /// Validation, lookup or persistence failed; the cart is untouched.
    Rejected(CartError),
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed)
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Outcome::Unchanged)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// The rejection reason, if any.
    pub fn error(&self) -> Option<&CartError> {
        match self {
            Outcome::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

/// External collaborators of the engine.
#[derive(Clone)]
pub struct CartDeps {
    pub stock: Arc<dyn StockLookup>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub store: Arc<dyn SnapshotStore>,
    pub sink: Arc<dyn NotificationSink>,
}

impl CartDeps {
    pub fn new(
        stock: Arc<dyn StockLookup>,
        catalog: Arc<dyn ProductCatalog>,
        store: Arc<dyn SnapshotStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            stock,
            catalog,
            store,
            sink,
        }
    }

    /// Use one backend for both stock and catalog lookups.
    pub fn from_catalog<C>(
        catalog: Arc<C>,
        store: Arc<dyn SnapshotStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self
    where
        C: StockLookup + ProductCatalog + 'static,
    {
        Self {
            stock: catalog.clone(),
            catalog,
            store,
            sink,
        }
    }
}

/// Owner of the canonical cart.
///
/// Share it by `Arc` handle. Mutations take turns: each one holds the turn
/// from reading the current cart until its commit (or rejection), including
/// while it awaits the stock and catalog lookups, so no two operations build
/// on the same base. Readers go through [`CartEngine::cart`] and only ever
/// see committed carts.
pub struct CartEngine {
    deps: CartDeps,
    key: String,
    messages: Messages,
    current: RwLock<Arc<Cart>>,
    turn: Mutex<()>,
}

impl CartEngine {
    /// Build an engine from the snapshot stored under `key`.
    ///
    /// See [`load_cart`] for how missing or broken snapshots are handled.
    pub fn load(deps: CartDeps, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = load_cart(deps.store.as_ref(), &key);
        tracing::info!(key = %key, lines = cart.len(), items = cart.item_count(), "cart engine ready");

        Self {
            deps,
            key,
            messages: Messages::default(),
            current: RwLock::new(Arc::new(cart)),
            turn: Mutex::new(()),
        }
    }

    /// Replace the notification messages.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// The committed cart.
    pub fn cart(&self) -> Arc<Cart> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store key holding the snapshot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart gets `amount + 1`; a new product is
    /// fetched from the catalog and appended with amount 1. Either way the
    /// resulting amount must fit the stock figure read during this call.
    #[tracing::instrument(name = "cart.add", skip(self), fields(id = %id))]
    pub async fn add_product(&self, id: &ProductId) -> Outcome {
        let _turn = self.turn.lock().await;
        let base = self.cart();

        let result = match self.plan_add(&base, id).await {
            Ok(next) => self.commit(next),
            Err(e) => Err(e),
        };
        self.finish(Operation::Add, result)
    }

    /// Remove a product's line.
    ///
    /// No lookups are involved, but the call still waits for its turn behind
    /// any in-flight operation.
    #[tracing::instrument(name = "cart.remove", skip(self), fields(id = %id))]
    pub async fn remove_product(&self, id: &ProductId) -> Outcome {
        let _turn = self.turn.lock().await;
        let base = self.cart();

        let result = match base.without(id) {
            Ok(next) => self.commit(next),
            Err(e) => Err(e.into()),
        };
        self.finish(Operation::Remove, result)
    }

    /// Set a product's amount.
    ///
    /// `amount <= 0` is ignored without notification. A product with no
    /// line in the cart is rejected as [`CartError::NotFound`] before any
    /// stock lookup is made.
    #[tracing::instrument(name = "cart.update", skip(self), fields(id = %id))]
    pub async fn update_product_amount(&self, id: &ProductId, amount: i64) -> Outcome {
        if amount <= 0 {
            tracing::debug!(amount, "non-positive amount ignored");
            return Outcome::Unchanged;
        }

        let _turn = self.turn.lock().await;
        let base = self.cart();

        let result = match self.plan_update(&base, id, amount).await {
            Ok(next) => self.commit(next),
            Err(e) => Err(e),
        };
        self.finish(Operation::Update, result)
    }

    /// Empty the cart.
    #[tracing::instrument(name = "cart.clear", skip(self))]
    pub async fn clear(&self) -> Outcome {
        let _turn = self.turn.lock().await;
        if self.cart().is_empty() {
            return Outcome::Unchanged;
        }

        let result = self.commit(Cart::new());
        self.finish(Operation::Clear, result)
    }

    async fn plan_add(&self, base: &Cart, id: &ProductId) -> Result<Cart, CartError> {
        let existing = base.get(id).map(|line| line.amount);
        let predicted = existing.map_or(1, |amount| amount.saturating_add(1));

        let stock = self.deps.stock.stock(id).await?;
        if !stock.can_fulfill(predicted) {
            return Err(CartError::StockExceeded {
                id: id.clone(),
                requested: predicted,
                available: stock.amount,
            });
        }

        if existing.is_some() {
            return Ok(base.with_amount(id, predicted)?);
        }

        let mut line = self.deps.catalog.product(id).await?.into_line(1);
        // keyed by the id the caller asked for, whatever form the catalog echoes
        line.id = id.clone();
        Ok(base.with_line(line)?)
    }

    async fn plan_update(
        &self,
        base: &Cart,
        id: &ProductId,
        amount: i64,
    ) -> Result<Cart, CartError> {
        if !base.contains(id) {
            return Err(CartError::NotFound(id.clone()));
        }

        let stock = self.deps.stock.stock(id).await?;
        if !stock.can_fulfill(amount) {
            return Err(CartError::StockExceeded {
                id: id.clone(),
                requested: amount,
                available: stock.amount,
            });
        }

        Ok(base.with_amount(id, amount)?)
    }

    /// Persist `next`, then publish it.
    ///
    /// The in-memory cart is replaced only after the store accepted the
    /// snapshot, so a failed write leaves both representations on the
    /// previous cart.
    fn commit(&self, next: Cart) -> Result<(), CartError> {
        let bytes = next.to_snapshot()?;
        self.deps.store.set(&self.key, &bytes)?;

        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(next);
        Ok(())
    }

    fn finish(&self, op: Operation, result: Result<(), CartError>) -> Outcome {
        match result {
            Ok(()) => {
                let cart = self.cart();
                tracing::info!(op = %op, lines = cart.len(), items = cart.item_count(), "cart committed");
                self.deps.sink.report_success(self.messages.success(op));
                Outcome::Committed
            }
            Err(e) => {
                tracing::warn!(op = %op, error = %e, "cart operation rejected");
                self.deps.sink.report_error(self.messages.failure(op, &e));
                Outcome::Rejected(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use cart_data::LocalCatalog;
    use cart_model::Product;
    use cart_store::MemoryStore;

    fn engine(catalog: LocalCatalog) -> (CartEngine, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let deps = CartDeps::from_catalog(
            Arc::new(catalog),
            Arc::new(MemoryStore::new()),
            sink.clone(),
        );
        (CartEngine::load(deps, "cart"), sink)
    }

    #[tokio::test]
    async fn test_add_then_increment() {
        let (engine, sink) =
            engine(LocalCatalog::new().with_product(Product::new(1, "Shoe", 10.0, ""), 2));
        let id = ProductId::from(1);

        assert!(engine.add_product(&id).await.is_committed());
        assert!(engine.add_product(&id).await.is_committed());
        assert_eq!(engine.cart().get(&id).unwrap().amount, 2);

        let outcome = engine.add_product(&id).await;
        assert!(matches!(
            outcome.error(),
            Some(CartError::StockExceeded { requested: 3, available: 2, .. })
        ));
        assert_eq!(engine.cart().get(&id).unwrap().amount, 2);
        assert_eq!(sink.errors(), vec![Messages::default().out_of_stock]);
    }

    #[tokio::test]
    async fn test_clear() {
        let (engine, sink) =
            engine(LocalCatalog::new().with_product(Product::new(1, "Shoe", 10.0, ""), 2));

        assert!(engine.clear().await.is_unchanged());
        assert!(sink.all().is_empty());

        assert!(engine.add_product(&ProductId::from(1)).await.is_committed());
        assert!(engine.clear().await.is_committed());
        assert!(engine.cart().is_empty());
    }

    #[tokio::test]
    async fn test_custom_messages() {
        let (engine, sink) = engine(LocalCatalog::new());
        let engine = engine.with_messages(Messages {
            remove_failed: "Erro na remoção do produto".to_string(),
            ..Messages::default()
        });

        let _ = engine.remove_product(&ProductId::from(1)).await;
        assert_eq!(sink.errors(), vec!["Erro na remoção do produto".to_string()]);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Update.to_string(), "update");
    }
}
