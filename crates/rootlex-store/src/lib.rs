//! rootlex-store
//!
//! SQLite persistence for the corpus: schema bootstrap, id-preserving
//! upserts for the pipeline's sinks, catalogue queries for the root and
//! verse views, and canonical-data import from the JSON source files.

pub mod import;
pub mod query;
pub mod schema;
pub mod store;

pub use store::SqliteStore;
