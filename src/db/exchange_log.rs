use crate::types::{AppError, Exchange, Result};
use chrono::{DateTime, Utc};
use libsql::{Builder, Connection, Database};
use uuid::Uuid;

/// Durable relational log of exchanges, backed by libsql.
///
/// Supports in-memory and local SQLite databases, plus remote Turso
/// behind the `turso` feature. The log is append-only: exchanges are
/// never updated or deleted once written.
pub struct ExchangeLog {
    db: Database,
}

impl ExchangeLog {
    /// Create an in-memory log (ephemeral, lost on restart).
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {}", e)))?;

        let log = Self { db };
        log.initialize_schema().await?;

        Ok(log)
    }

    /// Create a log backed by a local SQLite file.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database '{}': {}", path, e)))?;

        let log = Self { db };
        log.initialize_schema().await?;

        Ok(log)
    }

    /// Connect to a remote Turso database.
    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;

        let log = Self { db };
        log.initialize_schema().await?;

        Ok(log)
    }

    pub fn connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        // created_at holds unix microseconds so descending order stays
        // strict even for back-to-back inserts.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS exchanges (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                incoming_text TEXT NOT NULL,
                outgoing_text TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create exchanges table: {}", e)))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_exchanges_user_created
             ON exchanges(user_id, created_at DESC)",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create exchanges index: {}", e)))?;

        Ok(())
    }

    /// Append one exchange and return the stored record.
    pub async fn insert_exchange(
        &self,
        user_id: &str,
        incoming_text: &str,
        outgoing_text: &str,
    ) -> Result<Exchange> {
        let conn = self.connection()?;
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO exchanges (id, user_id, incoming_text, outgoing_text, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                id.as_str(),
                user_id,
                incoming_text,
                outgoing_text,
                created_at.timestamp_micros(),
            ),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert exchange: {}", e)))?;

        Ok(Exchange {
            id,
            user_id: user_id.to_string(),
            incoming_text: incoming_text.to_string(),
            outgoing_text: outgoing_text.to_string(),
            created_at,
        })
    }

    /// Fetch up to `limit` most recent exchanges for a user, newest first.
    pub async fn recent_exchanges(&self, user_id: &str, limit: usize) -> Result<Vec<Exchange>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, user_id, incoming_text, outgoing_text, created_at
                 FROM exchanges WHERE user_id = ?
                 ORDER BY created_at DESC LIMIT ?",
                (user_id, limit as i64),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query exchanges: {}", e)))?;

        let mut exchanges = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            exchanges.push(Exchange {
                id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
                user_id: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
                incoming_text: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
                outgoing_text: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
                created_at: micros_to_datetime(
                    row.get::<i64>(4)
                        .map_err(|e| AppError::Database(e.to_string()))?,
                )?,
            });
        }

        Ok(exchanges)
    }
}

fn micros_to_datetime(micros: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| AppError::Database(format!("Invalid stored timestamp: {}", micros)))
}
