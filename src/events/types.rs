// src/events/types.rs
//
// All events in the system.
// Each event represents an immutable fact that has already occurred.
//
// RULES:
// - Events are facts, not commands
// - Events carry only the data a view needs to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($ty:ident) => {
        impl DomainEvent for $ty {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($ty) }
        }
    };
}

// ============================================================================
// STORE EVENTS
// ============================================================================

/// Emitted after a Record Store was replaced by a fresh fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsReloaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub collection: String,
    pub record_count: usize,
}

impl RecordsReloaded {
    pub fn new(collection: &str, record_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            collection: collection.to_string(),
            record_count,
        }
    }
}

impl_domain_event!(RecordsReloaded);

/// Emitted when a reload attempt failed. The store still holds the previous set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub collection: String,
    pub reason: String,
}

impl ReloadFailed {
    pub fn new(collection: &str, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            collection: collection.to_string(),
            reason,
        }
    }
}

impl_domain_event!(ReloadFailed);

// ============================================================================
// MUTATION EVENTS
// ============================================================================

/// Emitted when a record was created remotely
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub collection: String,
    pub record_id: String,
}

impl RecordCreated {
    pub fn new(collection: &str, record_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            collection: collection.to_string(),
            record_id,
        }
    }
}

impl_domain_event!(RecordCreated);

/// Emitted when a record was fully or partially updated remotely
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub collection: String,
    pub record_id: String,
}

impl RecordUpdated {
    pub fn new(collection: &str, record_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            collection: collection.to_string(),
            record_id,
        }
    }
}

impl_domain_event!(RecordUpdated);

/// Emitted when a record was deleted remotely
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub collection: String,
    pub record_id: String,
}

impl RecordDeleted {
    pub fn new(collection: &str, record_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            collection: collection.to_string(),
            record_id,
        }
    }
}

impl_domain_event!(RecordDeleted);

/// Emitted when a contact message moved from unread to read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageMarkedRead {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub message_id: String,
}

impl MessageMarkedRead {
    pub fn new(message_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            message_id,
        }
    }
}

impl_domain_event!(MessageMarkedRead);

// ============================================================================
// SESSION EVENTS
// ============================================================================

/// Emitted after a successful admin sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_email: String,
}

impl SessionStarted {
    pub fn new(user_email: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_email,
        }
    }
}

impl_domain_event!(SessionStarted);

/// Emitted on sign-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_email: String,
}

impl SessionEnded {
    pub fn new(user_email: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_email,
        }
    }
}

impl_domain_event!(SessionEnded);
