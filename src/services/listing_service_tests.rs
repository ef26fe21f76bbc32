// src/services/listing_service_tests.rs
//
// Listing Service Tests
//
// Runs the service against the in-memory collection so every write can be
// followed through the refetch into the store and the filtered view.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{Duration, Utc};
    use serde_json::{json, Value};

    use crate::domain::{City, Document, Property, PropertyDraft, Record};
    use crate::engine::{PropertyFilter, QueryEngine, RecordStore, RefreshCoordinator};
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::integrations::identity::new_session_handle;
    use crate::integrations::media::client::MockMediaUploader;
    use crate::integrations::{MediaBlob, NoticeKind, QueuedNotifier, Session, SessionHandle};
    use crate::repositories::InMemoryDocumentCollection;
    use crate::services::{CreateListingRequest, ListingService, UpdateListingRequest};

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    struct Harness {
        backend: Arc<InMemoryDocumentCollection>,
        notifier: Arc<QueuedNotifier>,
        session: SessionHandle,
        bus: Arc<EventBus>,
        refresh: Arc<RefreshCoordinator<Property>>,
    }

    impl Harness {
        fn new() -> Self {
            let backend = Arc::new(InMemoryDocumentCollection::new());
            let bus = Arc::new(EventBus::new());
            let refresh = Arc::new(RefreshCoordinator::new(
                backend.clone(),
                RecordStore::shared(),
                bus.clone(),
            ));
            Self {
                backend,
                notifier: Arc::new(QueuedNotifier::new()),
                session: new_session_handle(),
                bus,
                refresh,
            }
        }

        fn signed_in(self) -> Self {
            *self.session.write().unwrap() = Some(Session {
                user_id: "admin-1".into(),
                email: "admin@example.com".into(),
                id_token: "token".into(),
                expires_at: Utc::now() + Duration::hours(1),
            });
            self
        }

        fn service(&self, uploader: MockMediaUploader) -> ListingService {
            ListingService::new(
                self.backend.clone(),
                Arc::new(uploader),
                self.refresh.clone(),
                self.session.clone(),
                self.notifier.clone(),
                self.bus.clone(),
            )
        }
    }

    fn cdn_uploader() -> MockMediaUploader {
        let mut uploader = MockMediaUploader::new();
        uploader
            .expect_upload()
            .returning(|blob| Ok(format!("https://cdn.example/{}", blob.file_name)));
        uploader
    }

    fn idle_uploader() -> MockMediaUploader {
        let mut uploader = MockMediaUploader::new();
        uploader.expect_upload().never();
        uploader
    }

    fn draft(title: &str, images: Vec<&str>) -> PropertyDraft {
        PropertyDraft {
            title: title.to_string(),
            city: City::Izmir,
            price: 2_500_000.0,
            rooms: 3,
            area: 120.0,
            description: "Deniz manzaralı".to_string(),
            images: images.into_iter().map(String::from).collect(),
        }
    }

    fn blob(name: &str) -> MediaBlob {
        MediaBlob::new(name, "image/jpeg", vec![0xFF, 0xD8])
    }

    fn image_list(document: &Document) -> Vec<String> {
        document.fields["images"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    // ========================================================================
    // CREATE
    // ========================================================================

    #[tokio::test]
    async fn test_create_requires_session() {
        let harness = Harness::new();
        let service = harness.service(idle_uploader());

        let result = service
            .create_listing(CreateListingRequest {
                draft: draft("Daire", vec![]),
                new_images: vec![blob("a.jpg")],
            })
            .await;

        assert!(matches!(result, Err(AppError::Auth(_))));
        assert_eq!(harness.backend.len(Property::COLLECTION), 0);
        assert_eq!(harness.notifier.drain()[0].kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn test_create_uploads_in_order_and_reloads() {
        let harness = Harness::new().signed_in();
        let service = harness.service(cdn_uploader());

        let id = service
            .create_listing(CreateListingRequest {
                draft: draft("Daire", vec![]),
                new_images: vec![blob("1.jpg"), blob("2.jpg")],
            })
            .await
            .unwrap();

        let stored = harness.backend.get(Property::COLLECTION, &id).unwrap();
        assert_eq!(
            image_list(&stored),
            vec!["https://cdn.example/1.jpg", "https://cdn.example/2.jpg"]
        );
        assert!(stored.fields.contains_key("createdAt"));
        assert!(stored.fields.contains_key("updatedAt"));

        let listing = service.get_listing(&id).unwrap();
        assert_eq!(listing.city, City::Izmir);
        assert_eq!(listing.rooms, Some(3));

        let notices = harness.notifier.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Success);
    }

    #[tokio::test]
    async fn test_invalid_draft_uploads_nothing() {
        let harness = Harness::new().signed_in();
        let service = harness.service(idle_uploader());

        let result = service
            .create_listing(CreateListingRequest {
                draft: draft("  ", vec![]),
                new_images: vec![blob("a.jpg")],
            })
            .await;

        assert!(matches!(result, Err(AppError::Domain(_))));
        assert_eq!(harness.backend.len(Property::COLLECTION), 0);
    }

    #[tokio::test]
    async fn test_failed_upload_aborts_create() {
        let harness = Harness::new().signed_in();
        let mut uploader = MockMediaUploader::new();
        uploader.expect_upload().times(2).returning(|blob| {
            if blob.file_name == "bad.png" {
                Err(AppError::Other("413 Payload Too Large".into()))
            } else {
                Ok("https://cdn.example/ok.jpg".into())
            }
        });
        let service = harness.service(uploader);

        let result = service
            .create_listing(CreateListingRequest {
                draft: draft("Daire", vec![]),
                new_images: vec![blob("ok.jpg"), blob("bad.png"), blob("never.jpg")],
            })
            .await;

        match result {
            Err(AppError::Upload(msg)) => assert!(msg.contains("bad.png")),
            other => panic!("expected upload error, got {:?}", other),
        }
        assert_eq!(harness.backend.len(Property::COLLECTION), 0);
        assert_eq!(harness.backend.fetch_count(), 0);
    }

    // ========================================================================
    // UPDATE
    // ========================================================================

    #[tokio::test]
    async fn test_update_keeps_existing_images_first_and_created_at() {
        let harness = Harness::new().signed_in();
        let created_at = "2024-03-01T10:00:00+00:00";
        harness.backend.seed(
            Property::COLLECTION,
            vec![Document::new(
                "p1",
                json!({
                    "title": "Eski",
                    "city": "İzmir",
                    "images": ["https://cdn.example/old1.jpg", "https://cdn.example/old2.jpg"],
                    "createdAt": created_at
                })
                .as_object()
                .cloned()
                .unwrap(),
            )],
        );
        let service = harness.service(cdn_uploader());

        service
            .update_listing(UpdateListingRequest {
                listing_id: "p1".into(),
                draft: draft("Yeni", vec!["https://cdn.example/old2.jpg"]),
                new_images: vec![blob("new.jpg")],
            })
            .await
            .unwrap();

        let stored = harness.backend.get(Property::COLLECTION, "p1").unwrap();
        assert_eq!(
            image_list(&stored),
            vec!["https://cdn.example/old2.jpg", "https://cdn.example/new.jpg"]
        );
        assert_eq!(stored.fields["createdAt"], Value::String(created_at.into()));
        assert_eq!(service.get_listing("p1").unwrap().title, "Yeni");
    }

    #[tokio::test]
    async fn test_update_missing_listing_is_not_found() {
        let harness = Harness::new().signed_in();
        let service = harness.service(idle_uploader());

        let result = service
            .update_listing(UpdateListingRequest {
                listing_id: "ghost".into(),
                draft: draft("Daire", vec![]),
                new_images: vec![],
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    // ========================================================================
    // DELETE
    // ========================================================================

    #[tokio::test]
    async fn test_delete_then_reload_removes_from_store_and_view() {
        let harness = Harness::new().signed_in();
        harness.backend.seed(
            Property::COLLECTION,
            vec![
                Document::new("p1", json!({ "title": "A", "city": "Ankara" }).as_object().cloned().unwrap()),
                Document::new("p2", json!({ "title": "B", "city": "Ankara" }).as_object().cloned().unwrap()),
            ],
        );
        let service = harness.service(idle_uploader());
        let engine = Arc::new(Mutex::new(QueryEngine::new(
            harness.refresh.store().clone(),
            PropertyFilter::new().with_city(City::Ankara),
        )));
        QueryEngine::attach(&engine, &harness.bus);

        service.reload().await.unwrap();
        assert_eq!(engine.lock().unwrap().view().len(), 2);

        service.delete_listing("p1").await.unwrap();

        assert!(service.get_listing("p1").is_none());
        let view = engine.lock().unwrap().view().to_vec();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "p2");
    }

    #[tokio::test]
    async fn test_delete_signed_out_leaves_collection_alone() {
        let harness = Harness::new();
        harness.backend.seed(
            Property::COLLECTION,
            vec![Document::new("p1", json!({ "title": "A", "city": "Ankara" }).as_object().cloned().unwrap())],
        );
        let service = harness.service(idle_uploader());

        assert!(matches!(service.delete_listing("p1").await, Err(AppError::Auth(_))));
        assert_eq!(harness.backend.len(Property::COLLECTION), 1);
    }

    #[tokio::test]
    async fn test_mutations_emit_events() {
        let harness = Harness::new().signed_in();
        let service = harness.service(cdn_uploader());

        let id = service
            .create_listing(CreateListingRequest {
                draft: draft("Daire", vec![]),
                new_images: vec![],
            })
            .await
            .unwrap();
        service.delete_listing(&id).await.unwrap();

        let types: Vec<String> = harness
            .bus
            .get_event_log()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(
            types,
            vec!["RecordCreated", "RecordsReloaded", "RecordDeleted", "RecordsReloaded"]
        );
    }
}
