//! Local SQLite store using an sqlx pool.
//!
//! Runs the same statements as the remote store against a file or
//! in-memory database. The `customers` table is created if absent.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use super::{sql, StoreError, TicketStore};
use crate::models::{Ticket, TicketFields, TicketFilter, PENDING_STATUS};

/// Default maximum connections for file databases.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Row as read from `customers`
#[derive(Debug, FromRow)]
struct TicketRow {
    ticket_id: i64,
    ticket_name: String,
    title: String,
    description: String,
    customer_name: String,
    customer_email: String,
    status: Option<String>,
    priority: Option<String>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket::new(
            row.ticket_id,
            TicketFields {
                ticket_name: row.ticket_name,
                title: row.title,
                description: row.description,
                customer_name: row.customer_name,
                customer_email: row.customer_email,
                status: row.status,
                priority: row.priority,
            },
        )
    }
}

/// Ticket store backed by SQLite
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open `url` (e.g. `sqlite://tickets.db` or `sqlite::memory:`).
    ///
    /// In-memory databases are private to a connection, so they get a
    /// single connection that is never recycled.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(DEFAULT_MAX_CONNECTIONS)
                .connect_with(options)
                .await?
        };

        let store = Self { pool };
        store.ensure_table().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create `customers` if it does not exist yet.
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        sqlx::query(sql::CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Number of rows in `customers`
    pub async fn count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl TicketStore for SqliteStore {
    async fn insert(&self, fields: &TicketFields) -> Result<i64, StoreError> {
        let result = sqlx::query(sql::INSERT_TICKET)
            .bind(&fields.ticket_name)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.customer_name)
            .bind(&fields.customer_email)
            .bind(&fields.status)
            .bind(&fields.priority)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn list(&self, filter: TicketFilter) -> Result<Vec<Ticket>, StoreError> {
        let rows: Vec<TicketRow> = match filter {
            TicketFilter::All => {
                sqlx::query_as(sql::SELECT_TICKETS)
                    .fetch_all(&self.pool)
                    .await?
            }
            TicketFilter::Pending => {
                sqlx::query_as(sql::SELECT_TICKETS_BY_STATUS)
                    .bind(PENDING_STATUS)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    async fn update(&self, ticket_id: i64, fields: &TicketFields) -> Result<u64, StoreError> {
        let result = sqlx::query(sql::UPDATE_TICKET)
            .bind(&fields.ticket_name)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.customer_name)
            .bind(&fields.customer_email)
            .bind(&fields.status)
            .bind(&fields.priority)
            .bind(ticket_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, ticket_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query(sql::DELETE_TICKET)
            .bind(ticket_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
