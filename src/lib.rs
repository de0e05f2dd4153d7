//! # Mnemo - Memory-Augmented Conversation Server
//!
//! A conversational backend that augments every language-model call with
//! two independent memory sources: a short-term recency log of a user's
//! prior exchanges (libsql) and a long-term semantic index of past
//! conversation text (Weaviate).
//!
//! ## Overview
//!
//! Mnemo can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `mnemo-server` binary
//! 2. **As a library** - Import the pipeline into your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use mnemo::{ChatService, SharedClients};
//! use mnemo::db::DatabaseProvider;
//! use mnemo::index::IndexProvider;
//! use std::sync::Arc;
//!
//! let store = Arc::from(DatabaseProvider::Memory.create_log().await?);
//! let clients = Arc::new(SharedClients::new(config.generation.clone(), IndexProvider::from_env()));
//! let chat = ChatService::new(store, clients, &config.context);
//!
//! let reply = chat.process_message("user-1", "hello!").await?;
//! println!("{}", reply.text);
//! ```
//!
//! ## Request Flow
//!
//! ```text
//! message ──┬─> recency log (last N exchanges)   ──┐
//!           └─> semantic index (top-k near text) ──┴─> merge + dedup
//!                                     │
//!                     prompt  <───────┘
//!                        │
//!                 generation service
//!                        │
//!           relational commit, then semantic insert
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`chat`] - Context assembly, prompt rendering, the request pipeline
//! - [`clients`] - Lazily-initialized shared service clients
//! - [`db`] - Relational exchange log (SQLite, Turso)
//! - [`index`] - Semantic index clients (Weaviate, in-memory)
//! - [`llm`] - Text-generation client
//! - [`types`] - Common types and error handling

#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Context assembly and the request pipeline.
pub mod chat;
/// Lazily-initialized shared service clients.
pub mod clients;
/// Relational exchange log.
pub mod db;
/// Semantic index clients.
pub mod index;
/// Text-generation clients and abstractions.
pub mod llm;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use chat::ChatService;
pub use clients::SharedClients;
pub use db::{DatabaseProvider, ExchangeLog, ExchangeStore};
pub use index::{IndexProvider, SemanticIndex};
pub use llm::{GenerationClient, GenerationSettings};
pub use types::{AppError, Result};
pub use utils::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// The request pipeline
    pub chat: Arc<ChatService>,
}
