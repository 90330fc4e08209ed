//! Cart domain types for the stock-validated shopping cart.
//!
//! This crate holds the data side of the cart:
//!
//! - **Ids**: [`ProductId`], an opaque integer-or-string identifier
//! - **Cart**: the ordered [`Cart`] of [`CartLine`]s and its snapshot format
//! - **Catalog**: [`Product`] records and transient [`StockInfo`] figures
//!
//! Every transition on [`Cart`] is pure: it returns a new cart and leaves the
//! receiver untouched, so callers can validate a candidate state before
//! committing it.
//!
//! # Example
//!
//! ```rust
//! use cart_model::prelude::*;
//!
//! let product = Product::new(1, "Running Shoe", 179.9, "shoe.jpg");
//! let cart = Cart::new().with_line(product.into_line(1)).unwrap();
//! let cart = cart.with_amount(&ProductId::from(1), 3).unwrap();
//!
//! assert_eq!(cart.item_count(), 3);
//! let bytes = cart.to_snapshot().unwrap();
//! assert_eq!(Cart::from_snapshot(&bytes).unwrap().cart, cart);
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;

pub use cart::{Cart, CartLine, LoadedCart};
pub use catalog::{Product, StockInfo};
pub use error::ModelError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartLine, LoadedCart};
    pub use crate::catalog::{Product, StockInfo};
    pub use crate::error::ModelError;
    pub use crate::ids::ProductId;
}
