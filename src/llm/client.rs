use crate::types::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Generic client trait for the text-generation service.
///
/// Implementations own their transport; callers only see text in, text
/// out. Errors are surfaced as-is so the pipeline can abort the request.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate a completion from a system instruction and a user turn.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// Fixed sampling and deadline settings for generation requests.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl GenerationSettings {
    pub fn new(model: impl Into<String>, temperature: f32, timeout: Duration) -> Self {
        Self {
            model: model.into(),
            temperature,
            timeout,
        }
    }
}
