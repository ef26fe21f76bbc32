// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Remote read of a collection failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Remote create / update / delete failed
    #[error("Mutation error: {0}")]
    Mutation(String),

    /// Media upload failed
    #[error("Upload error: {0}")]
    Upload(String),

    /// Credentials rejected or no active session
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Form input that could not be turned into a request
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Rewrap a collaborator failure as a fetch failure, keeping its message.
    pub fn into_fetch(self) -> Self {
        match self {
            AppError::Fetch(_) => self,
            other => AppError::Fetch(other.to_string()),
        }
    }

    /// Rewrap a collaborator failure as a mutation failure.
    ///
    /// `NotFound` and domain errors pass through untouched so callers can
    /// still tell them apart.
    pub fn into_mutation(self) -> Self {
        match self {
            AppError::Mutation(_) | AppError::NotFound | AppError::Domain(_) => self,
            other => AppError::Mutation(other.to_string()),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
