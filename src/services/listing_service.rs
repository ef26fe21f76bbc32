// src/services/listing_service.rs
//
// Listing Service - admin create / update / delete of property listings
//
// CRITICAL RULES:
// - Every write requires a live session
// - Drafts are validated before any image is uploaded
// - Images upload one at a time, in order; the first failure aborts the write
// - Every successful write is followed by a full refetch of the collection

use std::sync::{Arc, PoisonError};

use chrono::Utc;

use crate::domain::{validate_property_draft, Property, PropertyDraft, Record};
use crate::engine::{RefreshCoordinator, ReloadOutcome};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, RecordCreated, RecordDeleted, RecordUpdated};
use crate::integrations::media::upload_all;
use crate::integrations::{MediaBlob, MediaUploader, NotificationSink, SessionHandle};
use crate::repositories::DocumentCollection;

use super::auth_service::require_session;
use super::notices::{refresh_after_mutation, report_failure, report_success};

/// Request to publish a new listing
#[derive(Debug, Clone)]
pub struct CreateListingRequest {
    pub draft: PropertyDraft,
    /// Files picked in the form, uploaded in this order
    pub new_images: Vec<MediaBlob>,
}

/// Request to rewrite an existing listing
///
/// `draft.images` holds the existing URLs the admin kept; uploads are
/// appended after them.
#[derive(Debug, Clone)]
pub struct UpdateListingRequest {
    pub listing_id: String,
    pub draft: PropertyDraft,
    pub new_images: Vec<MediaBlob>,
}

pub struct ListingService {
    collection: Arc<dyn DocumentCollection>,
    uploader: Arc<dyn MediaUploader>,
    refresh: Arc<RefreshCoordinator<Property>>,
    session: SessionHandle,
    notifier: Arc<dyn NotificationSink>,
    event_bus: Arc<EventBus>,
}

impl ListingService {
    pub fn new(
        collection: Arc<dyn DocumentCollection>,
        uploader: Arc<dyn MediaUploader>,
        refresh: Arc<RefreshCoordinator<Property>>,
        session: SessionHandle,
        notifier: Arc<dyn NotificationSink>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            collection,
            uploader,
            refresh,
            session,
            notifier,
            event_bus,
        }
    }

    /// Refetch all listings, reporting a failure to the user
    pub async fn reload(&self) -> AppResult<ReloadOutcome> {
        self.refresh
            .request_reload()
            .await
            .map_err(|e| report_failure(&*self.notifier, "Loading listings", e))
    }

    pub fn get_listing(&self, listing_id: &str) -> Option<Property> {
        self.refresh
            .store()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(listing_id)
            .cloned()
    }

    pub async fn create_listing(&self, request: CreateListingRequest) -> AppResult<String> {
        let listing_id = match self.write_new_listing(request).await {
            Ok(id) => id,
            Err(e) => return Err(report_failure(&*self.notifier, "Creating listing", e)),
        };

        self.event_bus
            .emit(RecordCreated::new(Property::COLLECTION, listing_id.clone()));
        report_success(&*self.notifier, "Listing created");
        refresh_after_mutation(&self.refresh, &*self.notifier).await;

        Ok(listing_id)
    }

    async fn write_new_listing(&self, request: CreateListingRequest) -> AppResult<String> {
        require_session(&self.session)?;
        validate_property_draft(&request.draft)?;

        let mut draft = request.draft;
        let uploaded = upload_all(&*self.uploader, request.new_images).await?;
        draft.images.extend(uploaded);

        self.collection
            .create(Property::COLLECTION, draft.to_fields_at(Utc::now(), true))
            .await
            .map_err(AppError::into_mutation)
    }

    pub async fn update_listing(&self, request: UpdateListingRequest) -> AppResult<()> {
        let listing_id = request.listing_id.clone();
        if let Err(e) = self.write_listing_update(request).await {
            return Err(report_failure(&*self.notifier, "Updating listing", e));
        }

        self.event_bus
            .emit(RecordUpdated::new(Property::COLLECTION, listing_id));
        report_success(&*self.notifier, "Listing updated");
        refresh_after_mutation(&self.refresh, &*self.notifier).await;

        Ok(())
    }

    async fn write_listing_update(&self, request: UpdateListingRequest) -> AppResult<()> {
        require_session(&self.session)?;
        if request.listing_id.trim().is_empty() {
            return Err(AppError::Validation("Listing id is required".to_string()));
        }
        validate_property_draft(&request.draft)?;

        let mut draft = request.draft;
        let uploaded = upload_all(&*self.uploader, request.new_images).await?;
        draft.images.extend(uploaded);

        // createdAt is left as stored
        self.collection
            .update(
                Property::COLLECTION,
                &request.listing_id,
                draft.to_fields_at(Utc::now(), false),
            )
            .await
            .map_err(AppError::into_mutation)
    }

    pub async fn delete_listing(&self, listing_id: &str) -> AppResult<()> {
        let result = match require_session(&self.session) {
            Ok(_) => self
                .collection
                .delete(Property::COLLECTION, listing_id)
                .await
                .map_err(AppError::into_mutation),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            return Err(report_failure(&*self.notifier, "Deleting listing", e));
        }

        self.event_bus
            .emit(RecordDeleted::new(Property::COLLECTION, listing_id.to_string()));
        report_success(&*self.notifier, "Listing deleted");
        refresh_after_mutation(&self.refresh, &*self.notifier).await;

        Ok(())
    }
}
