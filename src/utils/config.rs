use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Top-level server configuration, assembled from environment variables.
///
/// Database and semantic index endpoints are resolved separately via
/// `DatabaseProvider::from_env` and `IndexProvider::from_env`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub generation: GenerationConfig,
    pub context: ContextConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Settings for the text-generation service.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    /// Hard deadline for a single generation request, in seconds.
    pub timeout_secs: u64,
}

/// Bounds on the assembled context window.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextConfig {
    /// Maximum recent exchanges fetched from the relational log (N).
    pub recent_window: usize,
    /// Maximum matches fetched from the semantic index (top_k).
    pub relevant_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|e| AppError::Configuration(format!("Invalid PORT: {}", e)))?,
            },
            generation: GenerationConfig {
                api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
                api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                model: env::var("GENERATION_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
                temperature: env::var("GENERATION_TEMPERATURE")
                    .unwrap_or_else(|_| "0.9".to_string())
                    .parse()
                    .map_err(|e| {
                        AppError::Configuration(format!("Invalid GENERATION_TEMPERATURE: {}", e))
                    })?,
                timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .map_err(|e| {
                        AppError::Configuration(format!("Invalid GENERATION_TIMEOUT_SECS: {}", e))
                    })?,
            },
            context: ContextConfig {
                recent_window: env::var("RECENT_WINDOW")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .map_err(|e| AppError::Configuration(format!("Invalid RECENT_WINDOW: {}", e)))?,
                relevant_limit: env::var("RELEVANT_LIMIT")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .map_err(|e| {
                        AppError::Configuration(format!("Invalid RELEVANT_LIMIT: {}", e))
                    })?,
            },
        })
    }
}
