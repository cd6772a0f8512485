//! fish-store: in-memory record store for the fish catalog
//!
//! This crate provides:
//! - The [`Fish`] record and its JSON schema
//! - Process-unique identifier generation
//! - A mutex-guarded [`Store`] supporting list, get, insert and random pick
//!
//! # Usage
//!
//! ```
//! use fish_store::{Fish, Store};
//!
//! let store = Store::new();
//! let salmon = store.insert(Fish::named("Salmon"));
//!
//! assert_eq!(store.get(&salmon.id).unwrap(), salmon);
//! assert_eq!(store.pick_random().unwrap(), salmon.id);
//! ```

pub mod error;
pub mod id;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use id::IdGenerator;
pub use models::Fish;
pub use store::Store;
