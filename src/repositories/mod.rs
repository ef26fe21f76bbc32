// src/repositories/mod.rs
//
// Repository layer: the Document Collection Service and its implementations
//
// RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO record validation
// - NO event emission

pub mod document_collection;
pub mod in_memory_collection;
pub mod rest_collection;

pub use document_collection::DocumentCollection;
pub use in_memory_collection::InMemoryDocumentCollection;
pub use rest_collection::RestDocumentCollection;

#[cfg(test)]
pub use document_collection::MockDocumentCollection;
