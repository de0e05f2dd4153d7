//! API request handlers.

/// Chat and history handlers.
pub mod chat;
/// Health check handler.
pub mod health;
