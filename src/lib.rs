//! Checklist-driven editing of a test-run category filter.
//!
//! A [`FilterSession`] is opened with the persisted [`Catalog`] and the filter
//! currently committed on the host page. The rendering layer draws
//! [`FilterSession::rows`], forwards clicks as commands, and pushes
//! [`FilterSession::commit`] back into the page.
mod command;
pub mod consts;
mod session;
mod state;

pub use category_catalog::{
    AddRejected, CATALOG_KEY, Catalog, DEFAULT_CATEGORIES, FileStore, KeyValueStore, MemoryStore,
};
pub use category_syntax::{
    CategoryName, FilterExpr, ParsedFilter, Selection, TriState, parse, serialize,
};
pub use command::Command;
pub use session::{FilterSession, Row, RowSnapshot, SessionError, Snapshot};
pub use state::CategoryState;
