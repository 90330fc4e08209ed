//! Collaborator traits consulted by the cart engine.

use async_trait::async_trait;
use cart_model::{Product, ProductId, StockInfo};

/// Error type for lookup operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

/// Reports how many units of a product are available.
///
/// Read-only and side-effect free; nothing is reserved.
#[async_trait]
pub trait StockLookup: Send + Sync {
    /// Current stock figure for `id`.
    async fn stock(&self, id: &ProductId) -> Result<StockInfo, FetchError>;
}

/// Supplies catalog metadata for products not yet in the cart.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Catalog record for `id`.
    async fn product(&self, id: &ProductId) -> Result<Product, FetchError>;
}
