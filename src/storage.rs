//! Persistence for the grocery list.
//!
//! [`Store`] is a namespaced key-value store of JSON documents on disk;
//! [`GroceryList`] layers the recipe collection's hydrate-then-persist
//! lifecycle on top of it.

/// The hydrated grocery list and its lifecycle.
pub mod grocery_list;
pub use grocery_list::{GroceryList, Hydrated, Unhydrated};

mod store;
pub use store::{Store, StoreError};
