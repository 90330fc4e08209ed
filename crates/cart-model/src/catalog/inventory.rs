//! Stock figures.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available quantity for a product, as reported by the stock backend.
///
/// Advisory and read-only: nothing is reserved against it. Only consulted
/// while validating a pending cart mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockInfo {
    /// Product the figure belongs to.
    pub id: ProductId,
    /// Quantity available.
    pub amount: i64,
}

impl StockInfo {
    /// Create a stock figure.
    pub fn new(id: impl Into<ProductId>, amount: i64) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }

    /// Check if a specific quantity is available.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.amount
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.amount <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_fulfill() {
        let stock = StockInfo::new(1, 3);
        assert!(stock.can_fulfill(1));
        assert!(stock.can_fulfill(3));
        assert!(!stock.can_fulfill(4));
    }

    #[test]
    fn test_out_of_stock() {
        assert!(StockInfo::new(1, 0).is_out_of_stock());
        assert!(!StockInfo::new(1, 1).is_out_of_stock());
        assert!(!StockInfo::new(1, 0).can_fulfill(1));
    }

    #[test]
    fn test_stock_from_backend_json() {
        let stock: StockInfo = serde_json::from_str(r#"{"id":2,"amount":5}"#).unwrap();
        assert_eq!(stock, StockInfo::new(2, 5));
    }
}
