//! Local mirror of the shopper's Shopify cart.
//!
//! [`CartStore`] holds the last cart Shopify confirmed together with the
//! loading, error and sidebar flags. State changes only through
//! [`CartCommand`]s; observers follow along through a `watch` channel.
//!
//! # Example
//!
//! ```rust,ignore
//! use goldsabertooth_storefront::cart::{CartCommand, CartStore, FileCartStorage};
//!
//! let storage = Arc::new(FileCartStorage::new(&config.data_dir));
//! let store = CartStore::new(client, storage).await;
//!
//! store.dispatch(CartCommand::add(variant_id)).await;
//! println!("{} items", store.cart_count());
//! ```

mod command;
mod persistence;
mod state;
mod store;

pub use command::CartCommand;
pub use persistence::{
    CART_STORE_NAME, CartPersistence, FileCartStorage, MemoryCartStorage, PersistedCart,
    PersistenceError,
};
pub use state::{CartState, CartStatus};
pub use store::CartStore;
