//! Database error type

/// Errors raised by a [`TicketStore`](super::TicketStore).
///
/// Messages from the underlying store are carried through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Remote libSQL database failed: unreachable, refused the token, or
    /// rejected the statement
    #[error("libsql error: {0}")]
    Remote(#[from] libsql::Error),

    /// Result could not be mapped onto a ticket
    #[error("unexpected database response: {0}")]
    Decode(String),

    /// Local SQLite failure
    #[error("sqlite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Database URL scheme not recognised
    #[error("unsupported database url '{0}' (expected libsql://, https://, http://, sqlite: or memory:)")]
    UnsupportedUrl(String),
}

impl StoreError {
    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// True when the failure came from the remote database
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}
