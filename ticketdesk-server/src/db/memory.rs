//! In-memory ticket store for tests and demos.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TicketStore};
use crate::models::{Ticket, TicketFields, TicketFilter};

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, TicketFields>,
}

/// Ticket store held in process memory.
///
/// Ids are handed out like SQLite's AUTOINCREMENT: strictly increasing
/// and never reused after a delete.
#[derive(Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn insert(&self, fields: &TicketFields) -> Result<i64, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, fields.clone());
        Ok(id)
    }

    async fn list(&self, filter: TicketFilter) -> Result<Vec<Ticket>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, fields)| Ticket::new(*id, fields.clone()))
            .filter(|t| filter.matches(t))
            .collect())
    }

    async fn update(&self, ticket_id: i64, fields: &TicketFields) -> Result<u64, StoreError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&ticket_id) {
            Some(row) => {
                *row = fields.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, ticket_id: i64) -> Result<u64, StoreError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&ticket_id).map_or(0, |_| 1))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
