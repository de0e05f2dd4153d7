//! Semantic Index Abstraction Layer
//!
//! This module provides a unified interface for the long-term semantic
//! memory source: inserting conversation text and querying it by
//! similarity to new input.
//!
//! # Providers
//!
//! - `WeaviateIndex` - Weaviate server with `nearText` search (production)
//! - `InMemoryIndex` - deterministic word-overlap ranking (testing, offline dev)
//!
//! # Example
//!
//! ```rust,ignore
//! use mnemo::index::IndexProvider;
//!
//! let index = IndexProvider::from_env().create_index()?;
//! index.insert("Other:hi, me:hello", "user-1", Utc::now()).await?;
//! let matches = index.query_near_text("greetings", 5).await?;
//! ```

use crate::types::{Result, SemanticMatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod weaviate;

pub use weaviate::WeaviateIndex;

// ============================================================================
// Semantic Index Provider Configuration
// ============================================================================

/// Configuration for semantic index providers.
#[derive(Debug, Clone)]
pub enum IndexProvider {
    /// Weaviate server (e.g., "http://localhost:8080").
    Weaviate {
        /// Base URL of the Weaviate instance.
        url: String,
    },
    /// In-memory index for testing and offline development.
    InMemory,
}

impl IndexProvider {
    /// Create a semantic index instance from this provider configuration.
    pub fn create_index(&self) -> Result<Box<dyn SemanticIndex>> {
        match self {
            IndexProvider::Weaviate { url } => {
                let index = WeaviateIndex::new(url.clone())?;
                Ok(Box::new(index))
            }
            IndexProvider::InMemory => Ok(Box::new(InMemoryIndex::new())),
        }
    }

    /// Create a provider from environment variables.
    ///
    /// `WEAVIATE_URL` selects the Weaviate backend; anything else falls
    /// back to the in-memory index.
    pub fn from_env() -> Self {
        if let Ok(url) = std::env::var("WEAVIATE_URL") {
            if !url.is_empty() {
                return IndexProvider::Weaviate { url };
            }
        }

        IndexProvider::InMemory
    }
}

// ============================================================================
// Semantic Index Trait
// ============================================================================

/// Abstract trait for the semantic memory source.
///
/// A failed operation is reported as an error; callers decide whether a
/// failure degrades (retrieval) or aborts (nothing else here may).
#[async_trait]
pub trait SemanticIndex: Send + Sync {
    /// Get the name of this index provider.
    fn provider_name(&self) -> &'static str;

    /// Insert a text record with its owner and timestamp.
    async fn insert(&self, text: &str, user_id: &str, timestamp: DateTime<Utc>) -> Result<()>;

    /// Find up to `limit` records ranked by similarity to `text`.
    async fn query_near_text(&self, text: &str, limit: usize) -> Result<Vec<SemanticMatch>>;
}

// ============================================================================
// In-Memory Index (testing / offline development)
// ============================================================================

use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// In-memory semantic index.
///
/// Ranks by case-insensitive word overlap with the query, ties broken by
/// timestamp descending. Deterministic, which is exactly what tests need;
/// not persisted.
pub struct InMemoryIndex {
    records: Arc<RwLock<Vec<IndexedText>>>,
}

#[derive(Debug, Clone)]
struct IndexedText {
    text: String,
    timestamp: DateTime<Utc>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn overlap(query_words: &HashSet<String>, text: &str) -> usize {
        tokenize(text)
            .into_iter()
            .collect::<HashSet<_>>()
            .intersection(query_words)
            .count()
    }
}

impl Default for InMemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

#[async_trait]
impl SemanticIndex for InMemoryIndex {
    fn provider_name(&self) -> &'static str {
        "in-memory"
    }

    async fn insert(&self, text: &str, _user_id: &str, timestamp: DateTime<Utc>) -> Result<()> {
        self.records.write().push(IndexedText {
            text: text.to_string(),
            timestamp,
        });
        Ok(())
    }

    async fn query_near_text(&self, text: &str, limit: usize) -> Result<Vec<SemanticMatch>> {
        let query_words: HashSet<String> = tokenize(text).into_iter().collect();

        let mut scored: Vec<(usize, IndexedText)> = self
            .records
            .read()
            .iter()
            .map(|r| (Self::overlap(&query_words, &r.text), r.clone()))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.timestamp.cmp(&a.1.timestamp)));
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .map(|(_, r)| SemanticMatch {
                text: r.text,
                timestamp: r.timestamp,
            })
            .collect())
    }
}
