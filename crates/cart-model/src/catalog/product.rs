//! Catalog product records.

use crate::cart::CartLine;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as returned by the catalog backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    #[serde(default, alias = "name")]
    pub title: String,
    /// Unit price.
    #[serde(default)]
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Fields this type does not model, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with no extra fields.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Snapshot this product into a cart line.
    pub fn into_line(self, amount: i64) -> CartLine {
        let mut extra = self.extra;
        // the line's own amount wins over anything the catalog sent
        extra.remove("amount");

        CartLine {
            id: self.id,
            title: self.title,
            price: self.price,
            image: self.image,
            amount,
            extra,
        }
    }
}
