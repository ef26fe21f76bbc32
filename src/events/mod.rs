// src/events/mod.rs
//
// Internal Event System - Public API
//
// EventHandler is internal to the bus and must not be exported

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Mutations
    MessageMarkedRead,
    RecordCreated,
    RecordDeleted,
    RecordUpdated,
    // Store
    RecordsReloaded,
    ReloadFailed,
    // Session
    SessionEnded,
    SessionStarted,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
