//! Cart engine error types.

use cart_data::FetchError;
use cart_model::{ModelError, ProductId};
use cart_store::StoreError;
use thiserror::Error;

/// Why a cart operation was rejected.
///
/// None of these escape the engine as failures: they are returned inside
/// [`Outcome::Rejected`](crate::Outcome::Rejected) and reported to the
/// notification sink.
#[derive(Error, Debug)]
pub enum CartError {
    /// Candidate amount exceeds the reported stock.
    #[error("Requested {requested} of {id}, only {available} in stock")]
    StockExceeded {
        id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Stock or catalog lookup failed.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] FetchError),

    /// Operation targets a product that has no line in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// Snapshot could not be encoded or written.
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// Candidate cart violated a line invariant.
    #[error("Invalid cart change: {0}")]
    Invalid(String),
}

impl From<StoreError> for CartError {
    fn from(e: StoreError) -> Self {
        CartError::Persistence(e.to_string())
    }
}

impl From<ModelError> for CartError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::ItemNotInCart(id) => CartError::NotFound(id),
            ModelError::SerializationError(e) => CartError::Persistence(e.to_string()),
            other => CartError::Invalid(other.to_string()),
        }
    }
}
