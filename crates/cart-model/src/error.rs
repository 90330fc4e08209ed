//! Cart model error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors produced by cart transitions and snapshot handling.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Item already has a line in the cart.
    #[error("Item already in cart: {0}")]
    DuplicateItem(ProductId),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Snapshot could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
