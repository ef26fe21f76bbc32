// src/services/message_service.rs
//
// Message Service - contact form submissions and the admin inbox
//
// RULES:
// - Submitting is public; reading, marking and deleting need a session
// - Status only moves unread -> read
// - Inbox writes are followed by a full refetch

use std::sync::{Arc, PoisonError};

use chrono::Utc;
use serde_json::Value;

use crate::domain::{validate_message_draft, Fields, Message, MessageDraft, MessageStatus, Record};
use crate::engine::{RefreshCoordinator, ReloadOutcome};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, MessageMarkedRead, RecordCreated, RecordDeleted};
use crate::integrations::{NotificationSink, SessionHandle};
use crate::repositories::DocumentCollection;

use super::auth_service::require_session;
use super::notices::{refresh_after_mutation, report_failure, report_success};

pub struct MessageService {
    collection: Arc<dyn DocumentCollection>,
    refresh: Arc<RefreshCoordinator<Message>>,
    session: SessionHandle,
    notifier: Arc<dyn NotificationSink>,
    event_bus: Arc<EventBus>,
}

impl MessageService {
    pub fn new(
        collection: Arc<dyn DocumentCollection>,
        refresh: Arc<RefreshCoordinator<Message>>,
        session: SessionHandle,
        notifier: Arc<dyn NotificationSink>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            collection,
            refresh,
            session,
            notifier,
            event_bus,
        }
    }

    /// Refetch the inbox. Admin only.
    pub async fn reload(&self) -> AppResult<ReloadOutcome> {
        let result = match require_session(&self.session) {
            Ok(_) => self.refresh.request_reload().await,
            Err(e) => Err(e),
        };
        result.map_err(|e| report_failure(&*self.notifier, "Loading messages", e))
    }

    pub fn unread_count(&self) -> usize {
        self.refresh
            .store()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .all()
            .iter()
            .filter(|m| m.is_unread())
            .count()
    }

    pub async fn mark_as_read(&self, message_id: &str) -> AppResult<()> {
        if let Err(e) = self.write_read_status(message_id).await {
            return Err(report_failure(&*self.notifier, "Marking message as read", e));
        }

        self.event_bus
            .emit(MessageMarkedRead::new(message_id.to_string()));
        report_success(&*self.notifier, "Message marked as read");
        refresh_after_mutation(&self.refresh, &*self.notifier).await;

        Ok(())
    }

    async fn write_read_status(&self, message_id: &str) -> AppResult<()> {
        require_session(&self.session)?;

        let current = self
            .refresh
            .store()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(message_id)
            .map(|m| m.status)
            .ok_or(AppError::NotFound)?;
        let next: MessageStatus = current.mark_read()?;

        let mut fields = Fields::new();
        fields.insert("status".into(), Value::String(next.as_str().to_string()));

        self.collection
            .update(Message::COLLECTION, message_id, fields)
            .await
            .map_err(AppError::into_mutation)
    }

    pub async fn delete_message(&self, message_id: &str) -> AppResult<()> {
        let result = match require_session(&self.session) {
            Ok(_) => self
                .collection
                .delete(Message::COLLECTION, message_id)
                .await
                .map_err(AppError::into_mutation),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            return Err(report_failure(&*self.notifier, "Deleting message", e));
        }

        self.event_bus
            .emit(RecordDeleted::new(Message::COLLECTION, message_id.to_string()));
        report_success(&*self.notifier, "Message deleted");
        refresh_after_mutation(&self.refresh, &*self.notifier).await;

        Ok(())
    }

    /// Public contact form. The inbox is refetched only for a signed-in admin.
    pub async fn submit_message(&self, draft: MessageDraft) -> AppResult<String> {
        let result = match validate_message_draft(&draft) {
            Ok(()) => self
                .collection
                .create(Message::COLLECTION, draft.to_fields_at(Utc::now()))
                .await
                .map_err(AppError::into_mutation),
            Err(e) => Err(AppError::Domain(e)),
        };
        let message_id = match result {
            Ok(id) => id,
            Err(e) => return Err(report_failure(&*self.notifier, "Sending message", e)),
        };

        self.event_bus
            .emit(RecordCreated::new(Message::COLLECTION, message_id.clone()));
        report_success(&*self.notifier, "Your message has been sent");
        if require_session(&self.session).is_ok() {
            refresh_after_mutation(&self.refresh, &*self.notifier).await;
        }

        Ok(message_id)
    }
}
