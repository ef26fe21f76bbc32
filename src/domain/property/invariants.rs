use super::entity::{Property, PropertyDraft};
use crate::domain::{DomainError, DomainResult};

/// Validates all Property invariants
/// Applied to every document before it enters a Record Store
pub fn validate_property(property: &Property) -> DomainResult<()> {
    validate_id(&property.id)?;
    validate_title(&property.title)?;
    validate_amount("price", property.price)?;
    validate_amount("area", property.area)?;
    validate_timestamps(property)?;
    Ok(())
}

/// Validates listing content about to be written
pub fn validate_property_draft(draft: &PropertyDraft) -> DomainResult<()> {
    validate_title(&draft.title)?;
    if draft.description.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Listing description cannot be empty".to_string(),
        ));
    }
    validate_amount("price", Some(draft.price))?;
    validate_amount("area", Some(draft.area))?;
    Ok(())
}

fn validate_id(id: &str) -> DomainResult<()> {
    if id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Record identifier cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Listing title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Numeric attributes are finite and non-negative when present
fn validate_amount(field: &str, value: Option<f64>) -> DomainResult<()> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(DomainError::InvalidField {
            field: field.to_string(),
            reason: format!("must be a non-negative number, got {}", v),
        }),
        _ => Ok(()),
    }
}

fn validate_timestamps(property: &Property) -> DomainResult<()> {
    if let (Some(created), Some(updated)) = (property.created_at, property.updated_at) {
        if updated < created {
            return Err(DomainError::InvariantViolation(format!(
                "Updated timestamp {} precedes creation {}",
                updated, created
            )));
        }
    }
    Ok(())
}
