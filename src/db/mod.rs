//! Relational storage for the recency log.
//!
//! The exchange log is the authoritative record of conversations: every
//! accepted exchange is committed here before anything else happens.
//! Backends: in-memory SQLite (default), file-based SQLite, or remote
//! Turso behind the `turso` feature.

pub mod exchange_log;
pub mod traits;

pub use exchange_log::ExchangeLog;
pub use traits::{DatabaseProvider, ExchangeStore};
