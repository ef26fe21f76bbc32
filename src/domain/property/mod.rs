pub mod entity;
pub mod invariants;

pub use entity::{City, Property, PropertyDraft};
pub use invariants::{validate_property, validate_property_draft};
