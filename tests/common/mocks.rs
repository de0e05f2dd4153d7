//! Mock implementations for testing.
//!
//! Hand-rolled test doubles for the three external collaborators: the
//! generation service, the semantic index, and the relational exchange
//! log. Shared across test files without duplication.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mnemo::db::ExchangeStore;
use mnemo::index::SemanticIndex;
use mnemo::llm::GenerationClient;
use mnemo::types::{AppError, Exchange, Result, SemanticMatch};
use std::sync::Mutex;

/// Fixed timestamp helper for deterministic ordering in tests.
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

// ============================================================================
// Generation
// ============================================================================

/// Mock generation client with a fixed response.
///
/// Records every `(system, user)` pair it is asked to complete so tests
/// can assert on the rendered prompt.
pub struct MockGenerationClient {
    response: String,
    should_fail: bool,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl MockGenerationClient {
    /// A client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A client that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// System prompts seen so far.
    pub fn seen_system_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(system, _)| system.clone())
            .collect()
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        if self.should_fail {
            return Err(AppError::Generation("Mock generation failure".to_string()));
        }
        self.requests
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

// ============================================================================
// Semantic index
// ============================================================================

/// Mock semantic index with canned matches and switchable failures.
pub struct MockIndex {
    matches: Vec<SemanticMatch>,
    fail_queries: bool,
    fail_inserts: bool,
    pub inserted: Mutex<Vec<String>>,
}

impl MockIndex {
    /// An index returning the given matches, in order.
    pub fn with_matches(matches: Vec<SemanticMatch>) -> Self {
        Self {
            matches,
            fail_queries: false,
            fail_inserts: false,
            inserted: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::with_matches(Vec::new())
    }

    /// An index whose queries fail; inserts still succeed.
    pub fn failing_queries() -> Self {
        Self {
            fail_queries: true,
            ..Self::empty()
        }
    }

    /// An index whose inserts fail; queries still succeed.
    pub fn failing_inserts(matches: Vec<SemanticMatch>) -> Self {
        Self {
            fail_inserts: true,
            ..Self::with_matches(matches)
        }
    }

    pub fn inserted_texts(&self) -> Vec<String> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SemanticIndex for MockIndex {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn insert(&self, text: &str, _user_id: &str, _timestamp: DateTime<Utc>) -> Result<()> {
        if self.fail_inserts {
            return Err(AppError::Index("Mock index insert failure".to_string()));
        }
        self.inserted.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn query_near_text(&self, _text: &str, limit: usize) -> Result<Vec<SemanticMatch>> {
        if self.fail_queries {
            return Err(AppError::Index("Mock index query failure".to_string()));
        }
        Ok(self.matches.iter().take(limit).cloned().collect())
    }
}

// ============================================================================
// Exchange store
// ============================================================================

/// Mock exchange store with seedable contents and switchable failures.
pub struct MockStore {
    exchanges: Mutex<Vec<Exchange>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MockStore {
    pub fn seeded(exchanges: Vec<Exchange>) -> Self {
        Self {
            exchanges: Mutex::new(exchanges),
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn empty() -> Self {
        Self::seeded(Vec::new())
    }

    /// A store whose reads fail; writes still succeed.
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::empty()
        }
    }

    /// A store whose writes fail; reads still succeed.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::empty()
        }
    }

    pub fn recorded(&self) -> Vec<Exchange> {
        self.exchanges.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExchangeStore for MockStore {
    async fn insert_exchange(
        &self,
        user_id: &str,
        incoming_text: &str,
        outgoing_text: &str,
    ) -> Result<Exchange> {
        if self.fail_writes {
            return Err(AppError::Database("Mock store write failure".to_string()));
        }
        let exchange = Exchange {
            id: format!("ex-{}", self.exchanges.lock().unwrap().len()),
            user_id: user_id.to_string(),
            incoming_text: incoming_text.to_string(),
            outgoing_text: outgoing_text.to_string(),
            created_at: Utc::now(),
        };
        self.exchanges.lock().unwrap().push(exchange.clone());
        Ok(exchange)
    }

    async fn recent_exchanges(&self, user_id: &str, limit: usize) -> Result<Vec<Exchange>> {
        if self.fail_reads {
            return Err(AppError::Database("Mock store read failure".to_string()));
        }
        let mut exchanges: Vec<Exchange> = self
            .exchanges
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        exchanges.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        exchanges.truncate(limit);
        Ok(exchanges)
    }
}

/// Build an exchange with a fixed timestamp.
pub fn exchange_at(user_id: &str, incoming: &str, outgoing: &str, secs: i64) -> Exchange {
    Exchange {
        id: format!("ex-{}", secs),
        user_id: user_id.to_string(),
        incoming_text: incoming.to_string(),
        outgoing_text: outgoing.to_string(),
        created_at: ts(secs),
    }
}
