// src/repositories/document_collection.rs
//
// Document Collection Service contract
//
// RULES:
// - Implementations are DUMB data mappers
// - NO record validation (that happens at the store boundary)
// - NO event emission
// - Every failure surfaces as an AppError; no partial success

use async_trait::async_trait;

use crate::domain::{Document, Fields, OrderBy};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Every document of a collection, in the requested order (or the
    /// service's natural order when `order` is `None`)
    async fn fetch_all(&self, collection: &str, order: Option<OrderBy>)
        -> AppResult<Vec<Document>>;

    /// Create a document and return its new identifier
    async fn create(&self, collection: &str, fields: Fields) -> AppResult<String>;

    /// Merge `fields` into an existing document
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()>;
}
