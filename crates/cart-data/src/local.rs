//! In-memory catalog and stock source.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use cart_model::{Product, ProductId, StockInfo};
use serde::Deserialize;

use crate::lookup::{FetchError, ProductCatalog, StockLookup};

/// Shape of a JSON database file: `{ "products": [...], "stock": [...] }`.
#[derive(Debug, Default, Deserialize)]
struct DbFile {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<StockInfo>,
}

#[derive(Debug, Default)]
struct Entries {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, i64>,
}

/// Catalog and stock held in memory.
///
/// Stock figures can be changed while the catalog is shared, which lets
/// callers simulate a backend whose availability moves underneath the cart.
#[derive(Debug, Default)]
pub struct LocalCatalog {
    entries: RwLock<Entries>,
}

impl LocalCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product together with its stock figure.
    pub fn with_product(self, product: Product, stock: i64) -> Self {
        self.insert(product, stock);
        self
    }

    /// Parse a JSON database document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, FetchError> {
        let db: DbFile = serde_json::from_slice(bytes)
            .map_err(|e| FetchError::Deserialization(e.to_string()))?;

        let catalog = Self::new();
        if let Ok(mut entries) = catalog.entries.write() {
            for product in db.products {
                entries.products.insert(product.id.clone(), product);
            }
            for stock in db.stock {
                entries.stock.insert(stock.id, stock.amount);
            }
        }
        Ok(catalog)
    }

    /// Load a JSON database file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| FetchError::Request(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&bytes)?;
        tracing::debug!(path = %path.display(), products = catalog.len(), "local catalog loaded");
        Ok(catalog)
    }

    /// Insert or replace a product and its stock figure.
    pub fn insert(&self, product: Product, stock: i64) {
        if let Ok(mut entries) = self.entries.write() {
            entries.stock.insert(product.id.clone(), stock);
            entries.products.insert(product.id.clone(), product);
        }
    }

    /// Change the stock figure for a product.
    pub fn set_stock(&self, id: impl Into<ProductId>, amount: i64) {
        if let Ok(mut entries) = self.entries.write() {
            entries.stock.insert(id.into(), amount);
        }
    }

    /// Number of catalog products.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.products.len()).unwrap_or(0)
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Entries>, FetchError> {
        self.entries
            .read()
            .map_err(|_| FetchError::Request("local catalog lock poisoned".to_string()))
    }
}

#[async_trait]
impl StockLookup for LocalCatalog {
    async fn stock(&self, id: &ProductId) -> Result<StockInfo, FetchError> {
        let entries = self.read()?;
        entries
            .stock
            .get(id)
            .map(|amount| StockInfo::new(id.clone(), *amount))
            .ok_or_else(|| FetchError::NotFound(format!("stock/{}", id)))
    }
}

#[async_trait]
impl ProductCatalog for LocalCatalog {
    async fn product(&self, id: &ProductId) -> Result<Product, FetchError> {
        let entries = self.read()?;
        entries
            .products
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("products/{}", id)))
    }
}
