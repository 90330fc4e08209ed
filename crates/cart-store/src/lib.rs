//! Key-value snapshot stores for the cart.
//!
//! The cart engine persists its state as opaque bytes under a single key.
//! Any type implementing [`SnapshotStore`] can back it:
//!
//! - [`MemoryStore`] keeps values in process memory (tests, embedding)
//! - [`FileStore`] keeps one file per key and survives restarts
//!
//! # Example
//!
//! ```rust
//! use cart_store::{MemoryStore, SnapshotStore};
//!
//! let store = MemoryStore::new();
//! store.set("cart", b"[]").unwrap();
//! assert_eq!(store.get("cart").unwrap(), Some(b"[]".to_vec()));
//! ```

mod error;
mod file;
mod kv;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::{MemoryStore, SnapshotStore};

/// Key under which the cart snapshot is stored by default.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, MemoryStore, SnapshotStore, StoreError, DEFAULT_CART_KEY};
}
