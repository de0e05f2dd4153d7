//! Shared service clients with lazy one-time initialization.
//!
//! `SharedClients` holds the process-wide handles to the generation
//! service and the semantic index. Each client is constructed at most
//! once per process, on first use, behind a `tokio::sync::OnceCell`:
//! concurrent first callers coalesce on a single construction, and a
//! construction error is returned to the caller without filling the
//! cell, so the next request retries.
//!
//! The registry is plain data owned by `AppState` - nothing here is a
//! process global.

use crate::index::{IndexProvider, SemanticIndex};
use crate::llm::{GenerationClient, GenerationSettings, OpenAIClient};
use crate::types::{AppError, Result};
use crate::utils::config::GenerationConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

pub struct SharedClients {
    generation_config: GenerationConfig,
    index_provider: IndexProvider,
    generation: OnceCell<Arc<dyn GenerationClient>>,
    semantic: OnceCell<Arc<dyn SemanticIndex>>,
}

impl SharedClients {
    pub fn new(generation_config: GenerationConfig, index_provider: IndexProvider) -> Self {
        Self {
            generation_config,
            index_provider,
            generation: OnceCell::new(),
            semantic: OnceCell::new(),
        }
    }

    /// Construct a registry with both clients already built.
    ///
    /// For tests and embedders that assemble their own clients; the lazy
    /// construction path is never taken.
    pub fn with_clients(
        generation: Arc<dyn GenerationClient>,
        semantic: Arc<dyn SemanticIndex>,
    ) -> Self {
        Self {
            generation_config: GenerationConfig {
                api_key: None,
                api_base: String::new(),
                model: String::new(),
                temperature: 0.0,
                timeout_secs: 0,
            },
            index_provider: IndexProvider::InMemory,
            generation: OnceCell::new_with(Some(generation)),
            semantic: OnceCell::new_with(Some(semantic)),
        }
    }

    /// Handle to the generation client, constructing it on first use.
    pub async fn generation_client(&self) -> Result<Arc<dyn GenerationClient>> {
        self.generation
            .get_or_try_init(|| async {
                let api_key = self.generation_config.api_key.clone().ok_or_else(|| {
                    AppError::Configuration("OPENAI_API_KEY is not set".to_string())
                })?;

                let settings = GenerationSettings::new(
                    self.generation_config.model.clone(),
                    self.generation_config.temperature,
                    Duration::from_secs(self.generation_config.timeout_secs),
                );

                let client =
                    OpenAIClient::new(api_key, self.generation_config.api_base.clone(), settings);
                Ok(Arc::new(client) as Arc<dyn GenerationClient>)
            })
            .await
            .cloned()
    }

    /// Handle to the semantic index, constructing it on first use.
    pub async fn semantic_index(&self) -> Result<Arc<dyn SemanticIndex>> {
        self.semantic
            .get_or_try_init(|| async {
                let index = self.index_provider.create_index()?;
                Ok(Arc::from(index))
            })
            .await
            .cloned()
    }
}
