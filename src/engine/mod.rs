// src/engine/mod.rs
//
// Listing query engine: store, filters, derived views and the reload loop
//
// Data flow:
//   DocumentCollection --(RefreshCoordinator)--> RecordStore
//   RecordStore + Filter --(QueryEngine)--> view

pub mod filters;
pub mod query;
pub mod refresh;
pub mod store;

pub use filters::{apply_filters, MessageFilter, PropertyFilter, RecordFilter};
pub use query::QueryEngine;
pub use refresh::{RefreshCoordinator, RefreshState, ReloadOutcome};
pub use store::{decode_documents, RecordStore, SharedStore};
