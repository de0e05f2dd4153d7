//! Database abstraction traits
//!
//! This module provides the `ExchangeStore` trait that abstracts the
//! relational exchange log (in-memory SQLite, file-based SQLite, remote
//! Turso), and the `DatabaseProvider` configuration enum used to pick a
//! backend at startup.
//!
//! # Example
//!
//! ```rust,ignore
//! use mnemo::db::DatabaseProvider;
//!
//! // In-memory database (default for development/testing)
//! let log = DatabaseProvider::Memory.create_log().await?;
//!
//! // File-based SQLite
//! let log = DatabaseProvider::SQLite { path: "data.db".into() }.create_log().await?;
//! ```

use crate::types::{Exchange, Result};
use async_trait::async_trait;

/// Database provider configuration
#[derive(Debug, Clone, Default)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Create an exchange log from this provider configuration
    pub async fn create_log(&self) -> Result<Box<dyn ExchangeStore>> {
        match self {
            DatabaseProvider::Memory => {
                let log = super::exchange_log::ExchangeLog::new_memory().await?;
                Ok(Box::new(log))
            }
            DatabaseProvider::SQLite { path } => {
                let log = super::exchange_log::ExchangeLog::new_local(path).await?;
                Ok(Box::new(log))
            }
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                let log = super::exchange_log::ExchangeLog::new_remote(
                    url.clone(),
                    auth_token.clone(),
                )
                .await?;
                Ok(Box::new(log))
            }
        }
    }

    /// Create from environment variables or use defaults
    pub fn from_env() -> Self {
        // Check for Turso configuration first
        #[cfg(feature = "turso")]
        {
            if let (Ok(url), Ok(token)) = (
                std::env::var("TURSO_DATABASE_URL"),
                std::env::var("TURSO_AUTH_TOKEN"),
            ) {
                if !url.is_empty() && !token.is_empty() {
                    return DatabaseProvider::Turso {
                        url,
                        auth_token: token,
                    };
                }
            }
        }

        // Check for SQLite file path
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            if !path.is_empty() && path != ":memory:" {
                return DatabaseProvider::SQLite { path };
            }
        }

        // Default to in-memory
        DatabaseProvider::Memory
    }
}

/// Narrow contract for the relational exchange log.
///
/// Implementations append exchanges and serve recency queries; nothing
/// else. A failed query is reported as an error so callers can decide
/// whether to degrade or abort.
#[async_trait]
pub trait ExchangeStore: Send + Sync {
    /// Append one exchange and return the stored record.
    async fn insert_exchange(
        &self,
        user_id: &str,
        incoming_text: &str,
        outgoing_text: &str,
    ) -> Result<Exchange>;

    /// Fetch up to `limit` most recent exchanges for a user, ordered by
    /// creation time descending.
    async fn recent_exchanges(&self, user_id: &str, limit: usize) -> Result<Vec<Exchange>>;
}

#[async_trait]
impl ExchangeStore for super::exchange_log::ExchangeLog {
    async fn insert_exchange(
        &self,
        user_id: &str,
        incoming_text: &str,
        outgoing_text: &str,
    ) -> Result<Exchange> {
        super::exchange_log::ExchangeLog::insert_exchange(
            self,
            user_id,
            incoming_text,
            outgoing_text,
        )
        .await
    }

    async fn recent_exchanges(&self, user_id: &str, limit: usize) -> Result<Vec<Exchange>> {
        super::exchange_log::ExchangeLog::recent_exchanges(self, user_id, limit).await
    }
}
