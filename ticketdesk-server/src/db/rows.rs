//! Result sets and column-name based ticket mapping.
//!
//! Columns are looked up by name, never by position, so reordering the
//! table's columns cannot shift values into the wrong fields.

use std::collections::HashMap;

use libsql::Value;

use super::StoreError;
use crate::models::{Ticket, TicketFields};

/// Rows plus column names returned by one query
#[derive(Debug, Default)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    /// Drain a libSQL cursor, keeping column names alongside the values.
    pub async fn collect(mut rows: libsql::Rows) -> Result<Self, StoreError> {
        let count = rows.column_count();
        let columns = (0..count)
            .map(|i| rows.column_name(i).unwrap_or_default().to_string())
            .collect();

        let mut values = Vec::new();
        while let Some(row) = rows.next().await? {
            let cells = (0..count)
                .map(|i| row.get_value(i))
                .collect::<Result<Vec<_>, _>>()?;
            values.push(cells);
        }

        Ok(Self {
            columns,
            rows: values,
        })
    }

    /// Map every row onto a ticket.
    pub fn into_tickets(self) -> Result<Vec<Ticket>, StoreError> {
        let index = ColumnIndex::new(&self.columns)?;
        self.rows.iter().map(|row| index.ticket(row)).collect()
    }
}

struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(columns: &[String]) -> Result<Self, StoreError> {
        let positions: HashMap<String, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        for required in super::sql::TICKET_COLUMNS {
            if !positions.contains_key(required) {
                return Err(StoreError::decode(format!(
                    "result set has no '{required}' column"
                )));
            }
        }

        Ok(Self { positions })
    }

    fn cell<'r>(&self, row: &'r [Value], column: &str) -> Result<&'r Value, StoreError> {
        self.positions
            .get(column)
            .and_then(|&i| row.get(i))
            .ok_or_else(|| StoreError::decode(format!("row is missing column '{column}'")))
    }

    fn integer(&self, row: &[Value], column: &str) -> Result<i64, StoreError> {
        match self.cell(row, column)? {
            Value::Integer(value) => Ok(*value),
            other => Err(StoreError::decode(format!(
                "column '{column}' holds {}, expected integer",
                type_name(other)
            ))),
        }
    }

    fn text(&self, row: &[Value], column: &str) -> Result<String, StoreError> {
        match self.cell(row, column)? {
            Value::Text(value) => Ok(value.clone()),
            other => Err(StoreError::decode(format!(
                "column '{column}' holds {}, expected text",
                type_name(other)
            ))),
        }
    }

    fn optional_text(&self, row: &[Value], column: &str) -> Result<Option<String>, StoreError> {
        match self.cell(row, column)? {
            Value::Null => Ok(None),
            Value::Text(value) => Ok(Some(value.clone())),
            other => Err(StoreError::decode(format!(
                "column '{column}' holds {}, expected text or null",
                type_name(other)
            ))),
        }
    }

    fn ticket(&self, row: &[Value]) -> Result<Ticket, StoreError> {
        Ok(Ticket::new(
            self.integer(row, "ticket_id")?,
            TicketFields {
                ticket_name: self.text(row, "ticket_name")?,
                title: self.text(row, "title")?,
                description: self.text(row, "description")?,
                customer_name: self.text(row, "customer_name")?,
                customer_email: self.text(row, "customer_email")?,
                status: self.optional_text(row, "status")?,
                priority: self.optional_text(row, "priority")?,
            },
        ))
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Integer(_) => "integer",
        Value::Real(_) => "float",
        Value::Text(_) => "text",
        Value::Blob(_) => "blob",
    }
}
