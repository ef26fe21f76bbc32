// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept DTOs, return DTOs
// - Commands turn AppError into ErrorResponse
// - Commands NEVER contain business logic

pub mod auth_commands;
pub mod listing_commands;
pub mod message_commands;

#[cfg(test)]
mod commands_tests;

pub use auth_commands::*;
pub use listing_commands::*;
pub use message_commands::*;
