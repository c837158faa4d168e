//! Persisted catalog of known category names.
//!
//! The catalog only needs a string-keyed, string-valued store; [`FileStore`]
//! keeps one file per key on disk and [`MemoryStore`] lives for one process.
mod catalog;
mod store;

pub use catalog::{AddRejected, CATALOG_KEY, Catalog, DEFAULT_CATEGORIES, default_categories};
pub use store::{FileStore, KeyValueStore, MemoryStore};
