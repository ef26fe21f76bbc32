// src/lib.rs
// ListingHub - listing query engine for a real-estate site
//
// Architecture:
// - Domain-centric: record schemas and their invariants live in `domain`
// - One store per collection, replaced wholesale by a full refetch
// - Views are pure functions of (store, filter), recomputed on every reload
// - Event-driven: coordinators and services emit, views subscribe
// - Explicit: every UI session owns its own context; nothing is global

// ============================================================================
// CORE
// ============================================================================

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    // Record boundary
    Document,
    DomainError,
    DomainResult,
    Fields,
    OrderBy,
    Record,
    SortDirection,
    // Listings
    City,
    Property,
    PropertyDraft,
    // Messages
    Message,
    MessageDraft,
    MessageStatus,
};

// ============================================================================
// PUBLIC API - Errors & Config
// ============================================================================

pub use config::{AppConfig, HttpConfig};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Engine
// ============================================================================

pub use engine::{
    apply_filters,
    MessageFilter,
    PropertyFilter,
    QueryEngine,
    RecordFilter,
    RecordStore,
    RefreshCoordinator,
    RefreshState,
    ReloadOutcome,
    SharedStore,
};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    EventLogEntry,
    MessageMarkedRead,
    RecordCreated,
    RecordDeleted,
    RecordUpdated,
    RecordsReloaded,
    ReloadFailed,
    SessionEnded,
    SessionStarted,
};

// ============================================================================
// PUBLIC API - Collaborators
// ============================================================================

pub use repositories::{DocumentCollection, InMemoryDocumentCollection, RestDocumentCollection};

pub use integrations::{
    AuthProvider,
    Credentials,
    DisabledMediaUploader,
    HttpMediaUploader,
    LogNotifier,
    MediaBlob,
    MediaUploader,
    Notice,
    NoticeKind,
    NotificationSink,
    PasswordAuthClient,
    QueuedNotifier,
    Session,
    SessionHandle,
};

// ============================================================================
// PUBLIC API - Services & Application Layer
// ============================================================================

pub use services::{
    AuthService,
    CreateListingRequest,
    ListingService,
    MessageService,
    UpdateListingRequest,
};

pub use application::{Collaborators, ErrorResponse, ErrorType, SessionContext};

// Re-export application submodules
pub use application::commands;
pub use application::dto;
