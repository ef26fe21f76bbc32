pub mod entity;
pub mod invariants;

pub use entity::{Message, MessageDraft, MessageStatus};
pub use invariants::{validate_message, validate_message_draft};
