use std::sync::OnceLock;

use regex::Regex;

use super::entity::{Message, MessageDraft};
use crate::domain::{DomainError, DomainResult};

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Stored messages only need a usable identifier
pub fn validate_message(message: &Message) -> DomainResult<()> {
    if message.id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Record identifier cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Contact form rules: a name, a body and a plausible email
pub fn validate_message_draft(draft: &MessageDraft) -> DomainResult<()> {
    if draft.name.trim().is_empty() {
        return Err(DomainError::MissingField("name".to_string()));
    }
    if draft.message.trim().is_empty() {
        return Err(DomainError::MissingField("message".to_string()));
    }
    if !email_pattern().is_match(draft.email.trim()) {
        return Err(DomainError::InvalidField {
            field: "email".to_string(),
            reason: format!("'{}' is not an email address", draft.email),
        });
    }
    Ok(())
}
