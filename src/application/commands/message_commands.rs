// src/application/commands/message_commands.rs
//
// Message Command Handlers

use std::sync::PoisonError;

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::SessionContext,
};
use crate::engine::MessageFilter;

fn visible_messages(ctx: &SessionContext) -> Vec<MessageDto> {
    ctx.inbox_view
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .view()
        .iter()
        .cloned()
        .map(MessageDto::from)
        .collect()
}

/// Refetch the inbox, newest first
pub async fn load_inbox(ctx: &SessionContext) -> Result<Vec<MessageDto>, ErrorResponse> {
    ctx.message_service.reload().await.to_error_response()?;
    Ok(visible_messages(ctx))
}

/// Toggle the "unread only" inbox view
pub async fn show_unread_only(
    ctx: &SessionContext,
    unread_only: bool,
) -> Result<Vec<MessageDto>, ErrorResponse> {
    let filter = if unread_only {
        MessageFilter::unread()
    } else {
        MessageFilter::default()
    };
    ctx.inbox_view
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .set_filter(filter);
    Ok(visible_messages(ctx))
}

pub async fn inbox_summary(ctx: &SessionContext) -> Result<InboxSummaryDto, ErrorResponse> {
    Ok(InboxSummaryDto {
        unread_count: ctx.message_service.unread_count(),
        refresh: ctx.messages.state(),
    })
}

pub async fn mark_message_read(ctx: &SessionContext, message_id: &str) -> Result<(), ErrorResponse> {
    ctx.message_service
        .mark_as_read(message_id)
        .await
        .to_error_response()
}

pub async fn delete_message(ctx: &SessionContext, message_id: &str) -> Result<(), ErrorResponse> {
    ctx.message_service
        .delete_message(message_id)
        .await
        .to_error_response()
}

/// Public contact form
pub async fn submit_contact_form(
    ctx: &SessionContext,
    form: ContactForm,
) -> Result<String, ErrorResponse> {
    ctx.message_service
        .submit_message(form.into())
        .await
        .to_error_response()
}
