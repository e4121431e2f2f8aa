//! Validation error types

use std::fmt;

use serde::Serialize;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field absent or null
    Missing { field: &'static str },

    /// Field present but holding the wrong JSON type
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// Body is not valid JSON
    InvalidJson { reason: String },

    /// Body is JSON but not an object
    NotAnObject,

    /// Path segment could not be parsed
    InvalidPath { field: &'static str, value: String },

    /// Query parameter could not be parsed
    InvalidQuery { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the offending field, `body` for whole-body failures
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::WrongType { field, .. }
            | Self::InvalidPath { field, .. }
            | Self::InvalidQuery { field, .. } => field,
            Self::InvalidJson { .. } | Self::NotAnObject => "body",
        }
    }

    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing",
            Self::WrongType { .. } => "wrong_type",
            Self::InvalidJson { .. } => "invalid_json",
            Self::NotAnObject => "not_an_object",
            Self::InvalidPath { .. } => "invalid_path",
            Self::InvalidQuery { .. } => "invalid_query",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::WrongType { field, expected } => {
                write!(f, "{} must be {}", field, expected)
            }
            Self::InvalidJson { reason } => write!(f, "invalid JSON body: {}", reason),
            Self::NotAnObject => write!(f, "body must be a JSON object"),
            Self::InvalidPath { field, value } => {
                write!(f, "invalid {} in path: '{}'", field, value)
            }
            Self::InvalidQuery { field, value } => {
                write!(f, "invalid {} query value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// All failures found while validating one request
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn single(err: ValidationError) -> Self {
        Self(vec![err])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Field-level detail as rendered in error responses
    pub fn detail(&self) -> Vec<FieldDetail> {
        self.0
            .iter()
            .map(|e| FieldDetail {
                field: e.field(),
                kind: e.kind(),
                message: e.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self::single(err)
    }
}

/// Serialized form of one validation failure
#[derive(Debug, Serialize)]
pub struct FieldDetail {
    pub field: &'static str,
    pub kind: &'static str,
    pub message: String,
}
