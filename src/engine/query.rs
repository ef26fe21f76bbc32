// src/engine/query.rs
//
// Query Engine - derives the visible subset of a Record Store
//
// The view is a pure function of (store contents, filter). It is recomputed
// whenever either input changes and never cached across a reload.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::domain::Record;
use crate::events::{EventBus, RecordsReloaded};

use super::filters::{apply_filters, RecordFilter};
use super::store::SharedStore;

pub struct QueryEngine<R: Record, F: RecordFilter<R>> {
    store: SharedStore<R>,
    filter: F,
    view: Vec<R>,
}

impl<R, F> QueryEngine<R, F>
where
    R: Record,
    F: RecordFilter<R> + Clone,
{
    pub fn new(store: SharedStore<R>, filter: F) -> Self {
        let mut engine = Self {
            store,
            filter,
            view: Vec::new(),
        };
        engine.recompute();
        engine
    }

    /// Rebuild the view from the current store snapshot
    pub fn recompute(&mut self) {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        self.view = apply_filters(store.all(), &self.filter);
    }

    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.recompute();
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn view(&self) -> &[R] {
        &self.view
    }

    /// Recompute whenever this engine's collection is reloaded.
    ///
    /// The subscription holds a weak reference; it goes quiet once the
    /// engine is dropped.
    pub fn attach(engine: &Arc<Mutex<Self>>, event_bus: &EventBus) {
        let weak: Weak<Mutex<Self>> = Arc::downgrade(engine);
        event_bus.subscribe::<RecordsReloaded, _>(move |event| {
            if event.collection != R::COLLECTION {
                return;
            }
            if let Some(engine) = weak.upgrade() {
                engine
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .recompute();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{City, Message, MessageStatus, Property};
    use crate::engine::filters::{MessageFilter, PropertyFilter};
    use crate::engine::store::RecordStore;

    fn property(id: &str, city: City, price: f64) -> Property {
        Property {
            id: id.into(),
            title: format!("İlan {}", id),
            city,
            price: Some(price),
            rooms: Some(2),
            area: None,
            description: String::new(),
            images: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn view_ids(engine: &QueryEngine<Property, PropertyFilter>) -> Vec<String> {
        engine.view().iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_empty_store_gives_empty_view() {
        let engine = QueryEngine::new(RecordStore::<Property>::shared(), PropertyFilter::new());
        assert!(engine.view().is_empty());
    }

    #[test]
    fn test_unset_filter_is_identity() {
        let store = RecordStore::shared();
        store
            .write()
            .unwrap()
            .load(vec![
                property("1", City::Istanbul, 100.0),
                property("2", City::Ankara, 200.0),
            ])
            .unwrap();

        let engine = QueryEngine::new(store, PropertyFilter::new());
        assert_eq!(view_ids(&engine), vec!["1", "2"]);
    }

    #[test]
    fn test_set_filter_recomputes() {
        let store = RecordStore::shared();
        store
            .write()
            .unwrap()
            .load(vec![
                property("1", City::Istanbul, 100.0),
                property("2", City::Ankara, 200.0),
                property("3", City::Ankara, 300.0),
            ])
            .unwrap();

        let mut engine = QueryEngine::new(store, PropertyFilter::new());
        engine.set_filter(PropertyFilter::new().with_city(City::Ankara));
        assert_eq!(view_ids(&engine), vec!["2", "3"]);

        engine.set_filter(PropertyFilter::new());
        assert_eq!(view_ids(&engine), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let store = RecordStore::shared();
        store
            .write()
            .unwrap()
            .load(vec![property("1", City::Izmir, 10.0), property("2", City::Izmir, 20.0)])
            .unwrap();

        let mut engine = QueryEngine::new(store, PropertyFilter::new().with_price_range(Some(15.0), None));
        let first = engine.view().to_vec();
        engine.recompute();
        assert_eq!(engine.view(), first.as_slice());
    }

    #[test]
    fn test_attached_engine_follows_reloads_of_its_collection() {
        let bus = EventBus::new();
        let store = RecordStore::shared();
        let engine = Arc::new(Mutex::new(QueryEngine::new(
            store.clone(),
            PropertyFilter::new().with_city(City::Antalya),
        )));
        QueryEngine::attach(&engine, &bus);

        store
            .write()
            .unwrap()
            .load(vec![property("a", City::Antalya, 1.0), property("b", City::Ankara, 1.0)])
            .unwrap();

        // Another collection's reload leaves the view alone
        bus.emit(RecordsReloaded::new(Message::COLLECTION, 0));
        assert!(engine.lock().unwrap().view().is_empty());

        bus.emit(RecordsReloaded::new(Property::COLLECTION, 2));
        assert_eq!(view_ids(&engine.lock().unwrap()), vec!["a"]);
    }

    #[test]
    fn test_dropped_engine_is_ignored() {
        let bus = EventBus::new();
        let engine = Arc::new(Mutex::new(QueryEngine::new(
            RecordStore::<Message>::shared(),
            MessageFilter { status: Some(MessageStatus::Unread) },
        )));
        QueryEngine::attach(&engine, &bus);
        drop(engine);

        bus.emit(RecordsReloaded::new(Message::COLLECTION, 0));
        assert_eq!(bus.subscriber_count::<RecordsReloaded>(), 1);
    }
}
