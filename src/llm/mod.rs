//! Text-generation client.
//!
//! One narrow contract: hand the service a rendered system instruction and
//! the current user turn, get generated text back. A fixed model, a fixed
//! sampling temperature, and a bounded request timeout; any failure is
//! request-fatal and never retried here.

/// Core generation trait and settings.
pub mod client;
/// OpenAI chat-completions implementation.
pub mod openai;

pub use client::{GenerationClient, GenerationSettings};
pub use openai::OpenAIClient;
