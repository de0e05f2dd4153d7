use crate::index::SemanticIndex;
use crate::types::{AppError, Result, SemanticMatch};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use std::time::Duration;

/// Weaviate collection holding one object per recorded exchange.
const CLASS_NAME: &str = "ChatMessage";

/// Connect timeout for index requests. The index is best-effort on the
/// read path, so a slow server must not stall the whole request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Semantic index backed by a Weaviate server.
///
/// Inserts go through the REST objects endpoint; similarity queries use
/// a GraphQL `nearText` search. Vectorization happens server-side, so no
/// embeddings are computed here.
pub struct WeaviateIndex {
    http: reqwest::Client,
    base_url: String,
}

impl WeaviateIndex {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Index(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl SemanticIndex for WeaviateIndex {
    fn provider_name(&self) -> &'static str {
        "weaviate"
    }

    async fn insert(&self, text: &str, user_id: &str, timestamp: DateTime<Utc>) -> Result<()> {
        let body = json!({
            "class": CLASS_NAME,
            "properties": {
                "text": text,
                "user_id": user_id,
                "timestamp": timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            }
        });

        let response = self
            .http
            .post(format!("{}/v1/objects", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Index(format!("Weaviate insert failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Index(format!(
                "Weaviate insert returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn query_near_text(&self, text: &str, limit: usize) -> Result<Vec<SemanticMatch>> {
        // serde_json handles quoting/escaping of the concept string.
        let concept = serde_json::to_string(text)
            .map_err(|e| AppError::Index(format!("Failed to encode query text: {}", e)))?;

        let query = format!(
            "{{ Get {{ {}(nearText: {{concepts: [{}]}}, limit: {}) {{ text timestamp }} }} }}",
            CLASS_NAME, concept, limit
        );

        let response = self
            .http
            .post(format!("{}/v1/graphql", self.base_url))
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| AppError::Index(format!("Weaviate query failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Index(format!(
                "Weaviate query returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Index(format!("Invalid Weaviate response: {}", e)))?;

        if let Some(errors) = body.get("errors") {
            if errors.as_array().is_none_or(|a| !a.is_empty()) {
                return Err(AppError::Index(format!("Weaviate query errors: {}", errors)));
            }
        }

        let objects = body["data"]["Get"][CLASS_NAME]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let matches = objects
            .iter()
            .filter_map(|obj| {
                let text = obj.get("text")?.as_str()?.to_string();
                // Objects written before the timestamp property existed sort last.
                let timestamp = obj
                    .get("timestamp")
                    .and_then(|t| t.as_str())
                    .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or(DateTime::UNIX_EPOCH);
                Some(SemanticMatch { text, timestamp })
            })
            .collect();

        Ok(matches)
    }
}
