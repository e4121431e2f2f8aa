//! Ticket records and payload validation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::validation::{ValidationError, ValidationErrors};

/// Status value matched by the pending filter
pub const PENDING_STATUS: &str = "pending";

/// Ticket fields as supplied by a client (everything but the id).
///
/// Updates replace every field, so this is also the update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFields {
    pub ticket_name: String,
    pub title: String,
    pub description: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

/// A stored ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: i64,
    #[serde(flatten)]
    pub fields: TicketFields,
}

impl Ticket {
    pub fn new(ticket_id: i64, fields: TicketFields) -> Self {
        Self { ticket_id, fields }
    }

    pub fn is_pending(&self) -> bool {
        self.fields.status.as_deref() == Some(PENDING_STATUS)
    }
}

/// Which rows a list operation returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TicketFilter {
    #[default]
    All,
    /// Only rows whose status is exactly `"pending"`
    Pending,
}

impl TicketFilter {
    pub fn from_pending_flag(pending: bool) -> Self {
        if pending {
            Self::Pending
        } else {
            Self::All
        }
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            Self::All => true,
            Self::Pending => ticket.is_pending(),
        }
    }
}

impl TicketFields {
    /// Validate a decoded JSON body.
    ///
    /// Every problem is collected rather than stopping at the first one.
    /// A `ticket_id` key is type-checked and then ignored: ids come from
    /// the store on create and from the path on update.
    pub fn from_json(body: &JsonValue) -> Result<Self, ValidationErrors> {
        let obj = body
            .as_object()
            .ok_or_else(|| ValidationErrors::single(ValidationError::NotAnObject))?;

        let mut errors = Vec::new();

        let mut required = |field: &'static str| -> String {
            match required_string(obj, field) {
                Ok(value) => value,
                Err(e) => {
                    errors.push(e);
                    String::new()
                }
            }
        };

        let ticket_name = required("ticket_name");
        let title = required("title");
        let description = required("description");
        let customer_name = required("customer_name");
        let customer_email = required("customer_email");

        let status = optional_string(obj, "status").unwrap_or_else(|e| {
            errors.push(e);
            None
        });
        let priority = optional_string(obj, "priority").unwrap_or_else(|e| {
            errors.push(e);
            None
        });

        if let Some(id) = obj.get("ticket_id") {
            if !id.is_null() && !is_integer_like(id) {
                errors.push(ValidationError::WrongType {
                    field: "ticket_id",
                    expected: "an integer",
                });
            }
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(Self {
            ticket_name,
            title,
            description,
            customer_name,
            customer_email,
            status,
            priority,
        })
    }
}

fn required_string(
    obj: &Map<String, JsonValue>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => Err(ValidationError::Missing { field }),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

/// Integers, whole-number floats like `5.0`, and decimal strings like `"5"`.
fn is_integer_like(value: &JsonValue) -> bool {
    match value {
        JsonValue::Number(n) => {
            n.is_i64()
                || n.as_f64().is_some_and(|f| {
                    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
                })
        }
        JsonValue::String(s) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

fn optional_string(
    obj: &Map<String, JsonValue>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "a string or null",
        }),
    }
}
