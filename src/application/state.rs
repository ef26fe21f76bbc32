// src/application/state.rs
//
// Session context: everything one UI session owns.
//
// Nothing here is global. Two contexts built from the same collaborators
// share no stores, no views and no sign-in state.

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{Message, Property};
use crate::engine::{
    MessageFilter, PropertyFilter, QueryEngine, RecordStore, RefreshCoordinator,
};
use crate::events::{create_event_bus, EventBus};
use crate::integrations::{AuthProvider, MediaUploader, NotificationSink, SessionHandle};
use crate::repositories::DocumentCollection;
use crate::services::{AuthService, ListingService, MessageService};

pub type ListingView = Arc<Mutex<QueryEngine<Property, PropertyFilter>>>;
pub type InboxView = Arc<Mutex<QueryEngine<Message, MessageFilter>>>;

/// External collaborators a context is built from
pub struct Collaborators {
    pub collection: Arc<dyn DocumentCollection>,
    pub auth: Arc<dyn AuthProvider>,
    pub uploader: Arc<dyn MediaUploader>,
    pub notifier: Arc<dyn NotificationSink>,
    /// Shared with any collaborator that authorizes requests with the token
    pub session: SessionHandle,
}

pub struct SessionContext {
    pub event_bus: Arc<EventBus>,
    pub session: SessionHandle,
    pub listings: Arc<RefreshCoordinator<Property>>,
    pub messages: Arc<RefreshCoordinator<Message>>,
    pub listing_view: ListingView,
    pub inbox_view: InboxView,
    pub listing_service: Arc<ListingService>,
    pub message_service: Arc<MessageService>,
    pub auth_service: Arc<AuthService>,
}

impl SessionContext {
    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            collection,
            auth,
            uploader,
            notifier,
            session,
        } = collaborators;

        let event_bus = Arc::new(create_event_bus());

        let listings = Arc::new(RefreshCoordinator::new(
            collection.clone(),
            RecordStore::shared(),
            event_bus.clone(),
        ));
        let messages = Arc::new(RefreshCoordinator::new(
            collection.clone(),
            RecordStore::shared(),
            event_bus.clone(),
        ));

        let listing_view = Arc::new(Mutex::new(QueryEngine::new(
            listings.store().clone(),
            PropertyFilter::default(),
        )));
        QueryEngine::attach(&listing_view, &event_bus);

        let inbox_view = Arc::new(Mutex::new(QueryEngine::new(
            messages.store().clone(),
            MessageFilter::default(),
        )));
        QueryEngine::attach(&inbox_view, &event_bus);

        let listing_service = Arc::new(ListingService::new(
            collection.clone(),
            uploader,
            listings.clone(),
            session.clone(),
            notifier.clone(),
            event_bus.clone(),
        ));
        let message_service = Arc::new(MessageService::new(
            collection,
            messages.clone(),
            session.clone(),
            notifier.clone(),
            event_bus.clone(),
        ));
        let auth_service = Arc::new(AuthService::new(
            auth,
            session.clone(),
            notifier,
            event_bus.clone(),
        ));

        log::debug!("Session context ready");

        Self {
            event_bus,
            session,
            listings,
            messages,
            listing_view,
            inbox_view,
            listing_service,
            message_service,
            auth_service,
        }
    }

    pub fn listing_filter(&self) -> PropertyFilter {
        self.listing_view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .filter()
            .clone()
    }

    /// Tear down: drop the sign-in and empty every store
    pub fn close(&self) {
        self.auth_service.sign_out();
        self.listings.clear();
        self.messages.clear();
        log::debug!("Session context closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::domain::Document;
    use crate::domain::Record;
    use crate::integrations::identity::client::MockAuthProvider;
    use crate::integrations::identity::new_session_handle;
    use crate::integrations::{DisabledMediaUploader, QueuedNotifier};
    use crate::repositories::InMemoryDocumentCollection;

    fn context(backend: Arc<InMemoryDocumentCollection>) -> SessionContext {
        SessionContext::new(Collaborators {
            collection: backend,
            auth: Arc::new(MockAuthProvider::new()),
            uploader: Arc::new(DisabledMediaUploader),
            notifier: Arc::new(QueuedNotifier::new()),
            session: new_session_handle(),
        })
    }

    fn seeded() -> Arc<InMemoryDocumentCollection> {
        let backend = Arc::new(InMemoryDocumentCollection::new());
        backend.seed(
            Property::COLLECTION,
            vec![Document::new(
                "p1",
                json!({ "title": "Daire", "city": "Ankara" }).as_object().cloned().unwrap(),
            )],
        );
        backend
    }

    #[tokio::test]
    async fn test_contexts_are_independent() {
        let backend = seeded();
        let first = context(backend.clone());
        let second = context(backend);

        first.listing_service.reload().await.unwrap();

        assert_eq!(first.listing_view.lock().unwrap().view().len(), 1);
        assert!(second.listing_view.lock().unwrap().view().is_empty());
    }

    #[tokio::test]
    async fn test_close_clears_stores_and_views() {
        let ctx = context(seeded());
        ctx.listing_service.reload().await.unwrap();

        ctx.close();

        assert!(ctx.listings.store().read().unwrap().is_empty());
        assert!(ctx.listing_view.lock().unwrap().view().is_empty());
        assert!(ctx.auth_service.current_session().is_none());
    }
}
