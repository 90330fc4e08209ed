//! Stock-validated cart engine.
//!
//! [`CartEngine`] owns the canonical cart and exposes three mutations:
//! [`add_product`](CartEngine::add_product),
//! [`remove_product`](CartEngine::remove_product) and
//! [`update_product_amount`](CartEngine::update_product_amount). Each one
//! builds a complete candidate cart, validates it against the stock backend,
//! and commits it to the snapshot store and to memory as one step. A failed
//! operation changes nothing and reports through the [`NotificationSink`].
//!
//! # Example
//!
//! ```rust,ignore
//! let deps = CartDeps::from_catalog(catalog, store, Arc::new(TracingSink));
//! let engine = Arc::new(CartEngine::load(deps, DEFAULT_CART_KEY));
//!
//! engine.add_product(&ProductId::from(1)).await;
//! engine.update_product_amount(&ProductId::from(1), 3).await;
//! println!("{} items", engine.cart().item_count());
//! ```

mod engine;
mod error;
mod loader;
mod notify;

pub use engine::{CartDeps, CartEngine, Operation, Outcome};
pub use error::CartError;
pub use loader::load_cart;
pub use notify::{Messages, Notification, NotificationSink, RecordingSink, TracingSink};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartDeps, CartEngine, CartError, Messages, NotificationSink, Operation, Outcome,
        TracingSink,
    };
    pub use cart_model::prelude::*;
}
