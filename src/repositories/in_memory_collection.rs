// src/repositories/in_memory_collection.rs
//
// Process-local document collection
//
// Backs tests and offline demos. Keeps documents in insertion order and
// counts fetches so callers can observe how often a collection was read.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Document, Fields, OrderBy, SortDirection};
use crate::error::{AppError, AppResult};

use super::document_collection::DocumentCollection;

#[derive(Default)]
pub struct InMemoryDocumentCollection {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    fetch_delay: Option<Duration>,
    fetch_count: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl InMemoryDocumentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetch sleeps this long before answering
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Replace a collection's contents wholesale
    pub fn seed(&self, collection: &str, documents: Vec<Document>) {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(collection.to_string(), documents);
    }

    /// Number of `fetch_all` calls that have started
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Highest number of fetches that were ever running at the same time
    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned())
    }

    fn snapshot(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

/// Missing and null values sort first, then booleans, numbers, strings,
/// arrays and objects. Within a kind numbers compare numerically and strings
/// lexically; anything else ties.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> CmpOrdering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .unwrap_or(0.0)
            .total_cmp(&y.as_f64().unwrap_or(0.0)),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn sort_documents(documents: &mut [Document], order: &OrderBy) {
    documents.sort_by(|a, b| {
        let ord = compare_field(a.fields.get(&order.field), b.fields.get(&order.field));
        match order.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentCollection for InMemoryDocumentCollection {
    async fn fetch_all(
        &self,
        collection: &str,
        order: Option<OrderBy>,
    ) -> AppResult<Vec<Document>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlightGuard(&self.in_flight);
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }

        let mut documents = self.snapshot(collection);
        if let Some(order) = order {
            sort_documents(&mut documents, &order);
        }
        Ok(documents)
    }

    async fn create(&self, collection: &str, fields: Fields) -> AppResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()> {
        let mut collections = self.collections.lock().unwrap_or_else(PoisonError::into_inner);
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or(AppError::NotFound)?;

        for (key, value) in fields {
            document.fields.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let mut collections = self.collections.lock().unwrap_or_else(PoisonError::into_inner);
        let documents = collections.get_mut(collection).ok_or(AppError::NotFound)?;

        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        Document::new(id, value.as_object().cloned().unwrap())
    }

    #[tokio::test]
    async fn test_fetch_preserves_insertion_order() {
        let store = InMemoryDocumentCollection::new();
        store.seed(
            "properties",
            vec![doc("b", json!({})), doc("a", json!({})), doc("c", json!({}))],
        );

        let ids: Vec<String> = store
            .fetch_all("properties", None)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(store.fetch_count(), 1);
    }

    #[test]
    fn test_compare_field_is_a_total_order() {
        let null = Value::Null;
        let one = json!(1);
        let text = json!("1");
        assert_eq!(compare_field(Some(&null), Some(&null)), CmpOrdering::Equal);
        assert_eq!(compare_field(None, Some(&null)), CmpOrdering::Equal);
        assert_eq!(compare_field(Some(&one), Some(&text)), CmpOrdering::Less);
        assert_eq!(compare_field(Some(&text), Some(&one)), CmpOrdering::Greater);
        assert_eq!(compare_field(Some(&null), Some(&one)), CmpOrdering::Less);
    }

    #[tokio::test]
    async fn test_fetch_sorts_mixed_and_null_values() {
        let store = InMemoryDocumentCollection::new();
        store.seed(
            "properties",
            vec![
                doc("s", json!({ "price": "250" })),
                doc("n2", json!({ "price": null })),
                doc("big", json!({ "price": 300 })),
                doc("n1", json!({})),
                doc("small", json!({ "price": 100 })),
            ],
        );

        let ids: Vec<String> = store
            .fetch_all("properties", Some(OrderBy {
                    field: "price".into(),
                    direction: SortDirection::Asc,
                }))
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["n2", "n1", "small", "big", "s"]);
    }

    #[tokio::test]
    async fn test_fetch_orders_desc() {
        let store = InMemoryDocumentCollection::new();
        store.seed(
            "messages",
            vec![
                doc("old", json!({ "createdAt": "2024-01-01T00:00:00+00:00" })),
                doc("new", json!({ "createdAt": "2024-05-01T00:00:00+00:00" })),
                doc("mid", json!({ "createdAt": "2024-03-01T00:00:00+00:00" })),
            ],
        );

        let ids: Vec<String> = store
            .fetch_all("messages", Some(OrderBy::desc("createdAt")))
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let store = InMemoryDocumentCollection::new();

        let id = store
            .create("messages", json!({ "status": "unread" }).as_object().cloned().unwrap())
            .await
            .unwrap();
        assert_eq!(store.len("messages"), 1);

        store
            .update("messages", &id, json!({ "status": "read" }).as_object().cloned().unwrap())
            .await
            .unwrap();
        assert_eq!(store.get("messages", &id).unwrap().fields["status"], json!("read"));

        store.delete("messages", &id).await.unwrap();
        assert_eq!(store.len("messages"), 0);
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let store = InMemoryDocumentCollection::new();
        store.seed("messages", Vec::new());

        assert!(matches!(
            store.update("messages", "nope", Fields::new()).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            store.delete("messages", "nope").await,
            Err(AppError::NotFound)
        ));
    }
}
