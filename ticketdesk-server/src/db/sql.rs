//! SQL statements, one per operation.
//!
//! SQLite dialect with positional `?` placeholders. Values are always bound.

pub const TABLE: &str = "customers";

/// Columns read back into a [`Ticket`](crate::models::Ticket)
pub const TICKET_COLUMNS: [&str; 8] = [
    "ticket_id",
    "ticket_name",
    "title",
    "description",
    "customer_name",
    "customer_email",
    "status",
    "priority",
];

pub const INSERT_TICKET: &str = "INSERT INTO customers \
     (ticket_name, title, description, customer_name, customer_email, status, priority) \
     VALUES (?, ?, ?, ?, ?, ?, ?)";

pub const SELECT_TICKETS: &str = "SELECT ticket_id, ticket_name, title, description, \
     customer_name, customer_email, status, priority FROM customers";

pub const SELECT_TICKETS_BY_STATUS: &str = "SELECT ticket_id, ticket_name, title, description, \
     customer_name, customer_email, status, priority FROM customers WHERE status = ?";

pub const UPDATE_TICKET: &str = "UPDATE customers SET \
     ticket_name = ?, title = ?, description = ?, customer_name = ?, \
     customer_email = ?, status = ?, priority = ? \
     WHERE ticket_id = ?";

pub const DELETE_TICKET: &str = "DELETE FROM customers WHERE ticket_id = ?";

/// Table definition for local SQLite databases
pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS customers (
    ticket_id INTEGER PRIMARY KEY AUTOINCREMENT,
    ticket_name TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    customer_name TEXT NOT NULL,
    customer_email TEXT NOT NULL,
    status TEXT,
    priority TEXT
)";

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn statements_bind_every_value() {
        assert_eq!(placeholders(INSERT_TICKET), 7);
        assert_eq!(placeholders(UPDATE_TICKET), 8);
        assert_eq!(placeholders(DELETE_TICKET), 1);
        assert_eq!(placeholders(SELECT_TICKETS), 0);
        assert_eq!(placeholders(SELECT_TICKETS_BY_STATUS), 1);
        assert!(!SELECT_TICKETS_BY_STATUS.contains("'pending'"));
    }

    #[test]
    fn selects_read_every_ticket_column() {
        for column in TICKET_COLUMNS {
            assert!(SELECT_TICKETS.contains(column), "missing {column}");
            assert!(CREATE_TABLE.contains(column), "missing {column}");
        }
        assert!(SELECT_TICKETS.contains(TABLE));
    }
}
