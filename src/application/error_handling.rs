// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes transport details; those go to the log

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Record not found (404)
    NotFound,

    /// Invalid form input (400)
    Validation,

    /// Record invariant or status transition violated (422)
    DomainError,

    /// Loading a collection failed
    Fetch,

    /// Create / update / delete failed
    Mutation,

    /// Image upload failed
    Upload,

    /// Sign-in rejected or session missing
    Auth,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Record not found", None),

            AppError::Validation(message) => Self::new(ErrorType::Validation, message, None),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Fetch(details) => {
                Self::new(ErrorType::Fetch, "Could not load records", Some(details))
            }

            AppError::Mutation(details) => {
                Self::new(ErrorType::Mutation, "Could not save changes", Some(details))
            }

            AppError::Upload(details) => {
                Self::new(ErrorType::Upload, "Image upload failed", Some(details))
            }

            AppError::Auth(message) => Self::new(ErrorType::Auth, message, None),

            other => {
                // Log full error for debugging
                log::error!("Internal error: {:?}", other);
                Self::new(
                    ErrorType::Internal,
                    "Internal error",
                    Some("Check logs for details".to_string()),
                )
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}
