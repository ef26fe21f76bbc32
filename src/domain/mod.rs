// src/domain/mod.rs
//
// Domain Root - record schemas and their invariants
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod message;
pub mod property;
pub mod record;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Record boundary
pub use record::{Document, Fields, OrderBy, Record, SortDirection};

// Property listings
pub use property::{validate_property, validate_property_draft, City, Property, PropertyDraft};

// Contact messages
pub use message::{validate_message, validate_message_draft, Message, MessageDraft, MessageStatus};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of record invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Duplicate record identifier: {0}")]
    DuplicateId(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
