//! Database layer - ticket store trait and backends
//!
//! # Design Principles
//!
//! - One parameterized statement per operation, values always bound
//! - Rows are mapped to tickets by column name, not position
//! - Handlers receive the store as `Arc<dyn TicketStore>`
//! - No retries, locks or transactions: errors surface immediately

pub mod error;
pub mod memory;
pub mod remote;
pub mod rows;
pub mod sql;
pub mod sqlite;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{Ticket, TicketFields, TicketFilter};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use sqlite::SqliteStore;

/// Storage for ticket rows (testable)
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Insert a row and return the id the store assigned.
    async fn insert(&self, fields: &TicketFields) -> Result<i64, StoreError>;

    /// Rows matching `filter`, in the store's natural order.
    async fn list(&self, filter: TicketFilter) -> Result<Vec<Ticket>, StoreError>;

    /// Overwrite every field of `ticket_id`. Returns rows affected.
    async fn update(&self, ticket_id: i64, fields: &TicketFields) -> Result<u64, StoreError>;

    /// Remove `ticket_id`. Returns rows affected.
    async fn delete(&self, ticket_id: i64) -> Result<u64, StoreError>;

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}

/// Environment variable holding the database URL
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable holding the database auth token
pub const DATABASE_AUTH_TOKEN_ENV: &str = "DATABASE_AUTH_TOKEN";

/// Database connection settings, fixed for the life of the process
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: auth_token.filter(|t| !t.is_empty()),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Open the store named by `config.url`.
///
/// | scheme | backend |
/// |--------|---------|
/// | `libsql://`, `https://`, `http://` | [`RemoteStore`] |
/// | `sqlite:` | [`SqliteStore`] |
/// | `memory:` | [`MemoryStore`] |
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn TicketStore>, StoreError> {
    let url = config.url.as_str();

    let store: Arc<dyn TicketStore> = if url.starts_with("libsql://")
        || url.starts_with("https://")
        || url.starts_with("http://")
    {
        Arc::new(RemoteStore::connect(url, config.auth_token.clone()).await?)
    } else if url.starts_with("sqlite:") {
        Arc::new(SqliteStore::connect(url).await?)
    } else if url == "memory:" {
        Arc::new(MemoryStore::new())
    } else {
        return Err(StoreError::UnsupportedUrl(url.to_string()));
    };

    tracing::info!(backend = store.backend(), "ticket store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let config = DatabaseConfig::new("libsql://db.turso.io", Some("hunter2".into()));
        let rendered = format!("{config:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn empty_token_is_none() {
        let config = DatabaseConfig::new("memory:", Some(String::new()));
        assert!(config.auth_token.is_none());
    }

    #[tokio::test]
    async fn connect_dispatches_on_scheme() {
        let memory = connect(&DatabaseConfig::new("memory:", None)).await.unwrap();
        assert_eq!(memory.backend(), "memory");

        let sqlite = connect(&DatabaseConfig::new("sqlite::memory:", None))
            .await
            .unwrap();
        assert_eq!(sqlite.backend(), "sqlite");

        let remote = connect(&DatabaseConfig::new("libsql://db.example.io", None))
            .await
            .unwrap();
        assert_eq!(remote.backend(), "libsql-remote");
    }

    #[tokio::test]
    async fn connect_rejects_unknown_scheme() {
        let err = connect(&DatabaseConfig::new("postgres://localhost/db", None))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::UnsupportedUrl(_)));
    }
}
