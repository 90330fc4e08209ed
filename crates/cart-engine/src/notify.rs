//! User-facing notifications.
//!
//! The engine only decides *what* to say; sinks decide how to show it.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::engine::Operation;
use crate::error::CartError;

/// Receives human-readable results of cart operations.
///
/// Fire-and-forget: the engine never inspects what a sink does.
pub trait NotificationSink: Send + Sync {
    /// Report a failed operation.
    fn report_error(&self, message: &str);

    /// Report a committed operation.
    fn report_success(&self, _message: &str) {}
}

/// Message catalog for notifications.
///
/// Missing fields fall back to the English defaults, so a config file only
/// needs to list the messages it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Requested amount is above the stock figure.
    pub out_of_stock: String,
    /// Any other add failure.
    pub add_failed: String,
    /// Any remove failure.
    pub remove_failed: String,
    /// Any other update failure.
    pub update_failed: String,
    /// Any clear failure.
    pub clear_failed: String,
    pub added: String,
    pub removed: String,
    pub updated: String,
    pub cleared: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            out_of_stock: "Requested quantity is out of stock".to_string(),
            add_failed: "Failed to add product".to_string(),
            remove_failed: "Failed to remove product".to_string(),
            update_failed: "Failed to update product amount".to_string(),
            clear_failed: "Failed to clear cart".to_string(),
            added: "Product added to cart".to_string(),
            removed: "Product removed from cart".to_string(),
            updated: "Product amount updated".to_string(),
            cleared: "Cart cleared".to_string(),
        }
    }
}

impl Messages {
    /// Message for a rejected operation.
    ///
    /// Stock problems get the stock message whatever the operation; every
    /// other error collapses into the operation's generic failure message.
    pub fn failure(&self, op: Operation, err: &CartError) -> &str {
        if matches!(err, CartError::StockExceeded { .. }) {
            return &self.out_of_stock;
        }
        match op {
            Operation::Add => &self.add_failed,
            Operation::Remove => &self.remove_failed,
            Operation::Update => &self.update_failed,
            Operation::Clear => &self.clear_failed,
        }
    }

    /// Message for a committed operation.
    pub fn success(&self, op: Operation) -> &str {
        match op {
            Operation::Add => &self.added,
            Operation::Remove => &self.removed,
            Operation::Update => &self.updated,
            Operation::Clear => &self.cleared,
        }
    }
}

/// Sink that forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn report_error(&self, message: &str) {
        tracing::warn!(target: "cart::notify", "{}", message);
    }

    fn report_success(&self, message: &str) {
        tracing::info!(target: "cart::notify", "{}", message);
    }
}

/// A notification captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Error(String),
    Success(String),
}

/// Sink that keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications in arrival order.
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Error messages in arrival order.
    pub fn errors(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(m) => Some(m),
                Notification::Success(_) => None,
            })
            .collect()
    }

    /// Success messages in arrival order.
    pub fn successes(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Success(m) => Some(m),
                Notification::Error(_) => None,
            })
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.clear();
        }
    }

    fn push(&self, n: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(n);
        }
    }
}

impl NotificationSink for RecordingSink {
    fn report_error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }

    fn report_success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_data::FetchError;
    use cart_model::ProductId;

    #[test]
    fn test_stock_message_wins_for_every_operation() {
        let messages = Messages::default();
        let err = CartError::StockExceeded {
            id: ProductId::from(1),
            requested: 2,
            available: 1,
        };

        assert_eq!(messages.failure(Operation::Add, &err), messages.out_of_stock);
        assert_eq!(messages.failure(Operation::Update, &err), messages.out_of_stock);
    }

    #[test]
    fn test_generic_failure_per_operation() {
        let messages = Messages::default();
        let lookup = CartError::Lookup(FetchError::Timeout("stock/2".to_string()));
        let missing = CartError::NotFound(ProductId::from(2));

        assert_eq!(messages.failure(Operation::Add, &lookup), "Failed to add product");
        assert_eq!(
            messages.failure(Operation::Update, &lookup),
            "Failed to update product amount"
        );
        assert_eq!(
            messages.failure(Operation::Remove, &missing),
            "Failed to remove product"
        );
    }

    #[test]
    fn test_partial_messages_from_json() {
        let messages: Messages =
            serde_json::from_str(r#"{"add_failed":"Erro na adição do produto"}"#).unwrap();

        assert_eq!(messages.add_failed, "Erro na adição do produto");
        assert_eq!(messages.remove_failed, Messages::default().remove_failed);
    }

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        sink.report_error("bad");
        sink.report_success("good");

        assert_eq!(sink.errors(), vec!["bad".to_string()]);
        assert_eq!(sink.successes(), vec!["good".to_string()]);
        assert_eq!(sink.all().len(), 2);

        sink.clear();
        assert!(sink.all().is_empty());
    }
}
