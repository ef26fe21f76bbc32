// src/application/commands/auth_commands.rs
//
// Auth Command Handlers

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::SessionContext,
};

pub async fn login(ctx: &SessionContext, form: LoginForm) -> Result<SessionDto, ErrorResponse> {
    let session = ctx
        .auth_service
        .sign_in(form.into())
        .await
        .to_error_response()?;
    Ok(session.into())
}

/// Sign out and drop the admin inbox from memory
pub async fn logout(ctx: &SessionContext) -> Result<(), ErrorResponse> {
    ctx.auth_service.sign_out();
    ctx.messages.clear();
    Ok(())
}

pub async fn current_user(ctx: &SessionContext) -> Result<Option<SessionDto>, ErrorResponse> {
    Ok(ctx
        .auth_service
        .require_session()
        .ok()
        .map(SessionDto::from))
}
