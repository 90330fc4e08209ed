//! Shopping cart module.
//!
//! Contains the cart, its lines and the snapshot format.

mod cart;

pub use cart::{Cart, CartLine, LoadedCart};
