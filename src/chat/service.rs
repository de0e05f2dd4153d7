use crate::chat::context::merge_context;
use crate::chat::prompt::build_prompt;
use crate::clients::SharedClients;
use crate::db::ExchangeStore;
use crate::index::SemanticIndex;
use crate::types::{ChatReply, Exchange, Result};
use crate::utils::config::ContextConfig;
use std::sync::Arc;
use tracing::warn;

/// The request pipeline: retrieve, merge, generate, record.
///
/// One instance serves all concurrent requests; everything mutable lives
/// behind the shared-client registry.
pub struct ChatService {
    store: Arc<dyn ExchangeStore>,
    clients: Arc<SharedClients>,
    recent_window: usize,
    relevant_limit: usize,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn ExchangeStore>,
        clients: Arc<SharedClients>,
        context: &ContextConfig,
    ) -> Self {
        Self {
            store,
            clients,
            recent_window: context.recent_window,
            relevant_limit: context.relevant_limit,
        }
    }

    /// Process one incoming message and return the generated reply.
    ///
    /// Retrieval faults degrade to an empty source and the request goes
    /// on; client construction, generation, and the relational write are
    /// fatal to the request.
    pub async fn process_message(&self, user_id: &str, message: &str) -> Result<ChatReply> {
        let generation = self.clients.generation_client().await?;
        let index = self.clients.semantic_index().await?;

        // The two sources are independent; query them concurrently.
        let (recent, relevant) = tokio::join!(
            self.store.recent_exchanges(user_id, self.recent_window),
            index.query_near_text(message, self.relevant_limit),
        );

        let recent = recent.unwrap_or_else(|e| {
            warn!(error = %e, user_id, "recency lookup failed, continuing without recent context");
            Vec::new()
        });
        let relevant = relevant.unwrap_or_else(|e| {
            warn!(error = %e, user_id, "semantic search failed, continuing without relevant context");
            Vec::new()
        });

        let context = merge_context(recent, relevant);
        let prompt = build_prompt(&context, message);

        let reply = generation.complete(&prompt.system, &prompt.user).await?;

        self.record_exchange(index.as_ref(), user_id, message, &reply)
            .await?;

        Ok(ChatReply::text(reply))
    }

    /// Record a finished exchange in both stores.
    ///
    /// The relational write commits first and is fatal on failure. The
    /// semantic insert that follows is best-effort: a fault leaves the
    /// exchange in the relational log only and is not rolled back or
    /// retried.
    pub async fn record_exchange(
        &self,
        index: &dyn SemanticIndex,
        user_id: &str,
        incoming_text: &str,
        outgoing_text: &str,
    ) -> Result<Exchange> {
        let exchange = self
            .store
            .insert_exchange(user_id, incoming_text, outgoing_text)
            .await?;

        let composite = format!("Other:{}, me:{}", incoming_text, outgoing_text);
        if let Err(e) = index
            .insert(&composite, user_id, exchange.created_at)
            .await
        {
            warn!(error = %e, user_id, "semantic index insert failed, exchange kept in relational log only");
        }

        Ok(exchange)
    }

    /// A user's recorded exchanges in chronological order, bounded by `limit`.
    pub async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<Exchange>> {
        let mut exchanges = self.store.recent_exchanges(user_id, limit).await?;
        exchanges.reverse();
        Ok(exchanges)
    }
}
