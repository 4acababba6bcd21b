//! Kinship Store - Sources of person records
//!
//! The graph is always rebuilt from whatever a [`PersonSource`] currently
//! returns; this crate provides an in-memory source and a JSON file source.

pub mod error;
pub mod json;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use json::JsonFileStore;
pub use memory::MemoryPersonStore;
pub use traits::PersonSource;
