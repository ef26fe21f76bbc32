use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::{
    read_string, read_timestamp, timestamp_value, Document, Fields, OrderBy, Record,
};
use crate::domain::{DomainError, DomainResult};

use super::invariants::validate_message;

/// An inbound contact message from the public site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Read state of a message. Only `Unread -> Read` is a valid transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Unread,
    Read,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Unread => "unread",
            MessageStatus::Read => "read",
        }
    }

    /// The status after marking as read
    pub fn mark_read(self) -> DomainResult<MessageStatus> {
        match self {
            MessageStatus::Unread => Ok(MessageStatus::Read),
            MessageStatus::Read => Err(DomainError::InvalidStateTransition(
                "message is already read".to_string(),
            )),
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(MessageStatus::Unread),
            "read" => Ok(MessageStatus::Read),
            other => Err(DomainError::InvalidField {
                field: "status".to_string(),
                reason: format!("unknown status '{}'", other),
            }),
        }
    }
}

impl Message {
    pub fn is_unread(&self) -> bool {
        self.status == MessageStatus::Unread
    }
}

/// A contact form submission before it is stored
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl MessageDraft {
    /// New submissions always start unread
    pub fn to_fields_at(&self, at: DateTime<Utc>) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::String(self.name.clone()));
        fields.insert("email".into(), Value::String(self.email.clone()));
        fields.insert("phone".into(), Value::String(self.phone.clone()));
        fields.insert("message".into(), Value::String(self.message.clone()));
        fields.insert(
            "status".into(),
            Value::String(MessageStatus::Unread.as_str().to_string()),
        );
        fields.insert("createdAt".into(), timestamp_value(at));
        fields
    }
}

impl Record for Message {
    const COLLECTION: &'static str = "messages";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_document(document: Document) -> DomainResult<Self> {
        let fields = &document.fields;

        // Only an explicit "unread" marks a message unread
        let status = match read_string(fields, "status")? {
            Some(s) => s.parse()?,
            None => MessageStatus::Read,
        };

        let message = Message {
            name: read_string(fields, "name")?.unwrap_or_default(),
            email: read_string(fields, "email")?.unwrap_or_default(),
            phone: read_string(fields, "phone")?.unwrap_or_default(),
            message: read_string(fields, "message")?.unwrap_or_default(),
            status,
            created_at: read_timestamp(fields, "createdAt")?,
            id: document.id,
        };

        validate_message(&message)?;
        Ok(message)
    }

    fn fetch_order() -> Option<OrderBy> {
        Some(OrderBy::desc("createdAt"))
    }
}
