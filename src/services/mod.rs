// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services validate, call collaborators, emit events, notify the user and
// trigger the refetch. They never hold records themselves.

pub mod auth_service;
pub mod listing_service;
pub mod message_service;
mod notices;

#[cfg(test)]
mod listing_service_tests;

pub use auth_service::{require_session, AuthService};

pub use listing_service::{
    CreateListingRequest,
    ListingService,
    UpdateListingRequest,
};

pub use message_service::MessageService;
