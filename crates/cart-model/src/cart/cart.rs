//! Cart and cart line types.

use crate::error::ModelError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

/// One product entry in the cart.
///
/// Catalog fields are a snapshot taken when the line was first created and
/// are never refreshed afterwards. Fields the catalog sends that this type
/// does not know about are kept in `extra` so they survive a round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Product title (denormalized for display).
    #[serde(default, alias = "name")]
    pub title: String,
    /// Unit price.
    #[serde(default)]
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Quantity, always >= 1.
    pub amount: i64,
    /// Additional catalog fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CartLine {
    /// Line total (unit price times amount).
    pub fn total(&self) -> f64 {
        self.price * self.amount as f64
    }
}

/// An ordered shopping cart.
///
/// Lines keep insertion order and at most one line exists per product id.
/// The snapshot format is the bare JSON array of lines. Decoding always goes
/// through [`Cart::from_lines`], so a tampered snapshot cannot smuggle in
/// zero amounts or duplicate ids.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// A cart decoded from a snapshot, plus how many stored lines were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCart {
    /// The normalized cart.
    pub cart: Cart,
    /// Lines discarded for a non-positive amount or a repeated id.
    pub dropped: usize,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw lines, enforcing the line invariants.
    ///
    /// Lines with `amount <= 0` are dropped, and for repeated ids only the
    /// first occurrence is kept. Returns the cart and the dropped count.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> (Self, usize) {
        let mut seen = HashSet::new();
        let mut dropped = 0;
        let mut kept = Vec::new();

        for line in lines {
            if line.amount <= 0 || !seen.insert(line.id.clone()) {
                dropped += 1;
                continue;
            }
            kept.push(line);
        }

        (Self { lines: kept }, dropped)
    }

    /// Decode a snapshot produced by [`Cart::to_snapshot`].
    pub fn from_snapshot(bytes: &[u8]) -> Result<LoadedCart, ModelError> {
        let lines: Vec<CartLine> = serde_json::from_slice(bytes)?;
        let (cart, dropped) = Self::from_lines(lines);
        Ok(LoadedCart { cart, dropped })
    }

    /// Encode the cart as a snapshot.
    ///
    /// The encoding is deterministic: equal carts produce identical bytes.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, ModelError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Check whether a product has a line.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Get number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get total item count (sum of amounts).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.amount).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Return a cart with the product's amount replaced.
    ///
    /// The line keeps its position and catalog fields.
    pub fn with_amount(&self, id: &ProductId, amount: i64) -> Result<Cart, ModelError> {
        if amount <= 0 {
            return Err(ModelError::InvalidQuantity(amount));
        }
        if !self.contains(id) {
            return Err(ModelError::ItemNotInCart(id.clone()));
        }

        let lines = self
            .lines
            .iter()
            .map(|l| {
                if &l.id == id {
                    CartLine {
                        amount,
                        ..l.clone()
                    }
                } else {
                    l.clone()
                }
            })
            .collect();
        Ok(Cart { lines })
    }

    /// Return a cart with a new line appended at the end.
    pub fn with_line(&self, line: CartLine) -> Result<Cart, ModelError> {
        if line.amount <= 0 {
            return Err(ModelError::InvalidQuantity(line.amount));
        }
        if self.contains(&line.id) {
            return Err(ModelError::DuplicateItem(line.id));
        }

        let mut lines = self.lines.clone();
        lines.push(line);
        Ok(Cart { lines })
    }

    /// Return a cart without the product's line.
    pub fn without(&self, id: &ProductId) -> Result<Cart, ModelError> {
        if !self.contains(id) {
            return Err(ModelError::ItemNotInCart(id.clone()));
        }

        let lines = self.lines.iter().filter(|l| &l.id != id).cloned().collect();
        Ok(Cart { lines })
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines).0
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.lines.serialize(serializer)
    }
}
