// src/application/commands/commands_tests.rs
//
// End-to-end command flows over the in-memory collection

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use serde_json::json;

    use crate::application::commands::*;
    use crate::application::dto::*;
    use crate::application::error_handling::ErrorType;
    use crate::application::state::{Collaborators, SessionContext};
    use crate::domain::{Document, Message, Property, Record};
    use crate::integrations::identity::client::MockAuthProvider;
    use crate::integrations::identity::new_session_handle;
    use crate::integrations::media::client::MockMediaUploader;
    use crate::integrations::{QueuedNotifier, Session};
    use crate::repositories::InMemoryDocumentCollection;

    fn doc(id: &str, value: serde_json::Value) -> Document {
        Document::new(id, value.as_object().cloned().unwrap())
    }

    fn context(backend: Arc<InMemoryDocumentCollection>) -> SessionContext {
        let mut auth = MockAuthProvider::new();
        auth.expect_sign_in().returning(|credentials| {
            if credentials.password == "doğru" {
                Ok(Session {
                    user_id: "admin-1".into(),
                    email: credentials.email.clone(),
                    id_token: "token".into(),
                    expires_at: Utc::now() + Duration::hours(1),
                })
            } else {
                Err(crate::error::AppError::Auth("INVALID_PASSWORD".into()))
            }
        });

        let mut uploader = MockMediaUploader::new();
        uploader
            .expect_upload()
            .returning(|blob| Ok(format!("https://cdn.example/{}", blob.file_name)));

        SessionContext::new(Collaborators {
            collection: backend,
            auth: Arc::new(auth),
            uploader: Arc::new(uploader),
            notifier: Arc::new(QueuedNotifier::new()),
            session: new_session_handle(),
        })
    }

    fn seeded() -> Arc<InMemoryDocumentCollection> {
        let backend = Arc::new(InMemoryDocumentCollection::new());
        backend.seed(
            Property::COLLECTION,
            vec![
                doc("p1", json!({ "title": "Stüdyo", "city": "İstanbul", "price": 100, "rooms": 1 })),
                doc("p2", json!({ "title": "Daire", "city": "Ankara", "price": "200", "rooms": 2 })),
                doc("p3", json!({ "title": "Villa", "city": "Ankara", "price": 300, "rooms": 3 })),
            ],
        );
        backend.seed(
            Message::COLLECTION,
            vec![doc(
                "m1",
                json!({ "name": "Ali", "email": "ali@example.com", "message": "Merhaba", "status": "unread" }),
            )],
        );
        backend
    }

    fn login_form(password: &str) -> LoginForm {
        LoginForm {
            email: "admin@example.com".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_browse_and_filter_listings() {
        let ctx = context(seeded());

        let all = load_listings(&ctx).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].price, Some(200.0));

        let ankara = apply_listing_filter(
            &ctx,
            FilterForm {
                city: "Ankara".into(),
                min_price: "150".into(),
                max_price: "250".into(),
                ..FilterForm::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(ankara.len(), 1);
        assert_eq!(ankara[0].id, "p2");
        assert_eq!(ctx.listing_filter().city, Some(crate::domain::City::Ankara));

        let cleared = apply_listing_filter(&ctx, FilterForm::default()).await.unwrap();
        assert_eq!(cleared.len(), 3);
    }

    #[tokio::test]
    async fn test_bad_filter_is_validation_error_and_keeps_view() {
        let ctx = context(seeded());
        load_listings(&ctx).await.unwrap();

        let err = apply_listing_filter(
            &ctx,
            FilterForm {
                min_price: "ucuz".into(),
                ..FilterForm::default()
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.error_type, ErrorType::Validation);
        assert_eq!(visible_listings(&ctx).len(), 3);
    }

    #[tokio::test]
    async fn test_admin_listing_lifecycle() {
        let backend = seeded();
        let ctx = context(backend.clone());

        let denied = delete_listing(&ctx, "p1").await.unwrap_err();
        assert_eq!(denied.error_type, ErrorType::Auth);

        let rejected = login(&ctx, login_form("yanlış")).await.unwrap_err();
        assert_eq!(rejected.error_type, ErrorType::Auth);

        let session = login(&ctx, login_form("doğru")).await.unwrap();
        assert_eq!(session.email, "admin@example.com");
        assert!(current_user(&ctx).await.unwrap().is_some());

        let form = ListingForm {
            title: "Yalı".into(),
            city: "İstanbul".into(),
            price: "9000000".into(),
            rooms: "5+2".into(),
            area: "400".into(),
            description: "Boğaz kıyısında".into(),
            existing_images: vec![],
        };
        let uploads = vec![UploadDto {
            file_name: "on.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![1, 2, 3],
        }];
        let id = create_listing(&ctx, form, uploads).await.unwrap();

        let created = get_listing(&ctx, &id).await.unwrap();
        assert_eq!(created.rooms, Some(5));
        assert_eq!(created.images, vec!["https://cdn.example/on.jpg"]);
        assert_eq!(visible_listings(&ctx).len(), 4);

        delete_listing(&ctx, "p1").await.unwrap();
        let missing = get_listing(&ctx, "p1").await.unwrap_err();
        assert_eq!(missing.error_type, ErrorType::NotFound);
        assert_eq!(backend.len(Property::COLLECTION), 3);
    }

    #[tokio::test]
    async fn test_inbox_flow() {
        let ctx = context(seeded());
        login(&ctx, login_form("doğru")).await.unwrap();

        submit_contact_form(
            &ctx,
            ContactForm {
                name: "Zeynep".into(),
                email: "zeynep@example.com".into(),
                phone: String::new(),
                message: "Kiralık var mı?".into(),
            },
        )
        .await
        .unwrap();

        let inbox = load_inbox(&ctx).await.unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox_summary(&ctx).await.unwrap().unread_count, 2);

        mark_message_read(&ctx, "m1").await.unwrap();
        let again = mark_message_read(&ctx, "m1").await.unwrap_err();
        assert_eq!(again.error_type, ErrorType::DomainError);

        let unread = show_unread_only(&ctx, true).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].name, "Zeynep");

        delete_message(&ctx, &unread[0].id).await.unwrap();
        assert!(show_unread_only(&ctx, true).await.unwrap().is_empty());

        logout(&ctx).await.unwrap();
        assert!(current_user(&ctx).await.unwrap().is_none());
        assert!(show_unread_only(&ctx, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_contact_form_validation() {
        let ctx = context(seeded());

        let err = submit_contact_form(
            &ctx,
            ContactForm {
                name: "Can".into(),
                email: "can@".into(),
                phone: String::new(),
                message: "Selam".into(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.error_type, ErrorType::DomainError);
    }
}
