// src/engine/store.rs
//
// Record Store - the authoritative in-memory copy of one collection
//
// RULES:
// - Contents are only ever replaced wholesale (`load`) or emptied (`clear`)
// - No partial updates; a mutation is followed by a full refetch
// - Identifiers are unique; a batch with duplicates is rejected as a whole

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::domain::{Document, DomainError, DomainResult, Record};

/// Store shared between its single writer (the refresh coordinator) and readers
pub type SharedStore<R> = Arc<RwLock<RecordStore<R>>>;

#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    records: Vec<R>,
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn shared() -> SharedStore<R> {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Replace the held collection. On error the previous contents stay.
    pub fn load(&mut self, records: Vec<R>) -> DomainResult<()> {
        {
            let mut seen = HashSet::with_capacity(records.len());
            for record in &records {
                if !seen.insert(record.id()) {
                    return Err(DomainError::DuplicateId(record.id().to_string()));
                }
            }
        }

        self.records = records;
        Ok(())
    }

    /// Every record, in fetch order
    pub fn all(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode fetched documents, dropping (and logging) any that fail validation
pub fn decode_documents<R: Record>(documents: Vec<Document>) -> Vec<R> {
    documents
        .into_iter()
        .filter_map(|document| {
            let id = document.id.clone();
            match R::from_document(document) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping {} document {}: {}", R::COLLECTION, id, e);
                    None
                }
            }
        })
        .collect()
}
