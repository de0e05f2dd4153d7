//! The context-retrieval-and-assembly pipeline.
//!
//! An incoming message fans out to the two memory sources (recency log,
//! semantic index), the results are deduplicated and ordered into a
//! bounded context window, the window is rendered into a prompt, the
//! generation service is invoked, and the finished exchange is recorded
//! in both stores.

/// Context window assembly: entry type, dedup, ordering.
pub mod context;
/// Prompt rendering from an assembled context window.
pub mod prompt;
/// The request pipeline and dual-store persistence.
pub mod service;

pub use context::{ContextEntry, merge_context};
pub use prompt::{Prompt, build_prompt};
pub use service::ChatService;
