//! Remote libSQL store.
//!
//! The `libsql::Database` handle is built once and shared by every request.
//! Each operation opens its own `Connection` so `last_insert_rowid` is never
//! read from another request's insert.

use async_trait::async_trait;
use libsql::params::Params;
use libsql::{Builder, Connection, Database, Value};

use super::rows::ResultSet;
use super::{sql, StoreError, TicketStore};
use crate::models::{Ticket, TicketFields, TicketFilter, PENDING_STATUS};

/// Ticket store backed by a remote libSQL/Turso database
pub struct RemoteStore {
    db: Database,
}

impl RemoteStore {
    /// Build a database handle for `url` (`libsql://`, `https://` or `http://`).
    ///
    /// No request is made until the first statement runs.
    pub async fn connect(url: &str, auth_token: Option<String>) -> Result<Self, StoreError> {
        let db = Builder::new_remote(url.to_string(), auth_token.unwrap_or_default())
            .build()
            .await?;
        Ok(Self { db })
    }

    fn connection(&self) -> Result<Connection, StoreError> {
        Ok(self.db.connect()?)
    }

    async fn execute(
        &self,
        conn: &Connection,
        sql: &str,
        args: Vec<Value>,
    ) -> Result<u64, StoreError> {
        tracing::debug!(sql, args = args.len(), "executing remote statement");
        Ok(conn.execute(sql, Params::Positional(args)).await?)
    }

    async fn query(&self, sql: &str, args: Vec<Value>) -> Result<ResultSet, StoreError> {
        tracing::debug!(sql, args = args.len(), "running remote query");
        let rows = self.connection()?.query(sql, Params::Positional(args)).await?;
        ResultSet::collect(rows).await
    }
}

fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::Text(s.to_string()))
}

fn field_args(fields: &TicketFields) -> Vec<Value> {
    vec![
        Value::Text(fields.ticket_name.clone()),
        Value::Text(fields.title.clone()),
        Value::Text(fields.description.clone()),
        Value::Text(fields.customer_name.clone()),
        Value::Text(fields.customer_email.clone()),
        optional_text(fields.status.as_deref()),
        optional_text(fields.priority.as_deref()),
    ]
}

#[async_trait]
impl TicketStore for RemoteStore {
    async fn insert(&self, fields: &TicketFields) -> Result<i64, StoreError> {
        let conn = self.connection()?;
        self.execute(&conn, sql::INSERT_TICKET, field_args(fields))
            .await?;
        Ok(conn.last_insert_rowid())
    }

    async fn list(&self, filter: TicketFilter) -> Result<Vec<Ticket>, StoreError> {
        let result = match filter {
            TicketFilter::All => self.query(sql::SELECT_TICKETS, vec![]).await?,
            TicketFilter::Pending => {
                self.query(
                    sql::SELECT_TICKETS_BY_STATUS,
                    vec![Value::Text(PENDING_STATUS.to_string())],
                )
                .await?
            }
        };
        result.into_tickets()
    }

    async fn update(&self, ticket_id: i64, fields: &TicketFields) -> Result<u64, StoreError> {
        let mut args = field_args(fields);
        args.push(Value::Integer(ticket_id));
        let conn = self.connection()?;
        self.execute(&conn, sql::UPDATE_TICKET, args).await
    }

    async fn delete(&self, ticket_id: i64) -> Result<u64, StoreError> {
        let conn = self.connection()?;
        self.execute(&conn, sql::DELETE_TICKET, vec![Value::Integer(ticket_id)])
            .await
    }

    fn backend(&self) -> &'static str {
        "libsql-remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::net::TcpListener;

    fn fields() -> TicketFields {
        TicketFields {
            ticket_name: "TCK-9".into(),
            title: "Laptop".into(),
            description: "Battery swollen".into(),
            customer_name: "Cy".into(),
            customer_email: "cy@example.com".into(),
            status: None,
            priority: Some("high".into()),
        }
    }

    #[test]
    fn field_args_follow_insert_column_order() {
        let args = field_args(&fields());
        assert_eq!(args.len(), sql::INSERT_TICKET.matches('?').count());
        assert_eq!(args[0], Value::Text("TCK-9".into()));
        assert_eq!(args[4], Value::Text("cy@example.com".into()));
        assert_eq!(args[5], Value::Null);
        assert_eq!(args[6], Value::Text("high".into()));
    }

    #[tokio::test]
    async fn unreachable_store_is_upstream_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = RemoteStore::connect(&format!("http://{addr}"), None)
            .await
            .unwrap();
        let err = store.delete(1).await.unwrap_err();
        assert!(matches!(err, StoreError::Remote(_)));
        assert!(err.is_upstream());
    }
}
