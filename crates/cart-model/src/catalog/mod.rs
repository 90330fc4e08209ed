//! Product catalog module.
//!
//! Contains catalog records and stock figures reported by the backend.

mod inventory;
mod product;

pub use inventory::StockInfo;
pub use product::Product;
