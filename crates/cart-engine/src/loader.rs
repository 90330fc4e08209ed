//! Startup loading of the persisted cart.

use cart_model::{Cart, LoadedCart};
use cart_store::SnapshotStore;

/// Read the cart snapshot stored under `key`.
///
/// Never fails: a missing key, an unreadable store or an unparsable snapshot
/// all mean "no saved cart" and yield an empty cart. Lines breaking the cart
/// invariants are dropped.
pub fn load_cart(store: &dyn SnapshotStore, key: &str) -> Cart {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::debug!(key, "no saved cart");
            return Cart::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "cart snapshot unreadable, starting empty");
            return Cart::new();
        }
    };

    match Cart::from_snapshot(&bytes) {
        Ok(LoadedCart { cart, dropped }) => {
            if dropped > 0 {
                tracing::warn!(key, dropped, "dropped invalid lines from saved cart");
            }
            tracing::debug!(key, lines = cart.len(), "saved cart loaded");
            cart
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "cart snapshot unparsable, starting empty");
            Cart::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_model::ProductId;
    use cart_store::{MemoryStore, StoreError};

    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::StoreError("unavailable".to_string()))
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
            Err(StoreError::StoreError("unavailable".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_missing_snapshot_is_empty() {
        let cart = load_cart(&MemoryStore::new(), "cart");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_garbage_snapshot_is_empty() {
        let store = MemoryStore::with_entry("cart", "{definitely not a cart");
        assert!(load_cart(&store, "cart").is_empty());
    }

    #[test]
    fn test_store_failure_is_empty() {
        assert!(load_cart(&BrokenStore, "cart").is_empty());
    }

    #[test]
    fn test_loads_saved_lines_in_order() {
        let store = MemoryStore::with_entry(
            "cart",
            r#"[{"id":2,"title":"B","price":1,"image":"","amount":1},
                {"id":1,"title":"A","price":1,"image":"","amount":4}]"#,
        );
        let cart = load_cart(&store, "cart");

        let ids: Vec<_> = cart.lines().iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, vec![ProductId::from(2), ProductId::from(1)]);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_drops_invalid_lines() {
        let store = MemoryStore::with_entry(
            "cart",
            r#"[{"id":1,"amount":0},{"id":2,"amount":2},{"id":2,"amount":9}]"#,
        );
        let cart = load_cart(&store, "cart");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ProductId::from(2)).unwrap().amount, 2);
    }
}
