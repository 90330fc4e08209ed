//! Stock and catalog lookups for the cart engine.
//!
//! This crate provides:
//! - [`StockLookup`] / [`ProductCatalog`] - the read-only collaborator traits
//! - [`HttpCatalog`] - REST client with connect/total timeouts
//! - [`LocalCatalog`] - in-memory catalog, loadable from a JSON database file
//! - [`FetchError`] - the single failure type both lookups share

mod client;
mod local;
mod lookup;
mod timeout;

pub use client::*;
pub use local::*;
pub use lookup::*;
pub use timeout::*;
