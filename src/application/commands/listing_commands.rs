// src/application/commands/listing_commands.rs
//
// Listing Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Never contain business logic

use std::sync::PoisonError;

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::SessionContext,
};
use crate::services::{CreateListingRequest, UpdateListingRequest};

/// Current listing view, after the active filter
pub fn visible_listings(ctx: &SessionContext) -> Vec<PropertyDto> {
    ctx.listing_view
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .view()
        .iter()
        .cloned()
        .map(PropertyDto::from)
        .collect()
}

/// Refetch every listing and return the filtered view
pub async fn load_listings(ctx: &SessionContext) -> Result<Vec<PropertyDto>, ErrorResponse> {
    ctx.listing_service.reload().await.to_error_response()?;
    Ok(visible_listings(ctx))
}

/// Replace the active filter
pub async fn apply_listing_filter(
    ctx: &SessionContext,
    form: FilterForm,
) -> Result<Vec<PropertyDto>, ErrorResponse> {
    let filter = form.to_filter().to_error_response()?;
    ctx.listing_view
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .set_filter(filter);
    Ok(visible_listings(ctx))
}

pub async fn get_listing(ctx: &SessionContext, listing_id: &str) -> Result<PropertyDto, ErrorResponse> {
    ctx.listing_service
        .get_listing(listing_id)
        .map(PropertyDto::from)
        .ok_or_else(|| ErrorResponse::not_found("Listing"))
}

pub async fn create_listing(
    ctx: &SessionContext,
    form: ListingForm,
    uploads: Vec<UploadDto>,
) -> Result<String, ErrorResponse> {
    let draft = form.into_draft().to_error_response()?;
    let request = CreateListingRequest {
        draft,
        new_images: uploads.into_iter().map(Into::into).collect(),
    };

    ctx.listing_service
        .create_listing(request)
        .await
        .to_error_response()
}

pub async fn update_listing(
    ctx: &SessionContext,
    listing_id: String,
    form: ListingForm,
    uploads: Vec<UploadDto>,
) -> Result<(), ErrorResponse> {
    let draft = form.into_draft().to_error_response()?;
    let request = UpdateListingRequest {
        listing_id,
        draft,
        new_images: uploads.into_iter().map(Into::into).collect(),
    };

    ctx.listing_service
        .update_listing(request)
        .await
        .to_error_response()
}

pub async fn delete_listing(ctx: &SessionContext, listing_id: &str) -> Result<(), ErrorResponse> {
    ctx.listing_service
        .delete_listing(listing_id)
        .await
        .to_error_response()
}
