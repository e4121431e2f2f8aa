//! Custom Axum extractors
//!
//! Rejections are mapped to [`ApiError::Validation`] so every malformed
//! request gets the same 422 body.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{TicketFields, TicketFilter, ValidationError};

/// Validated ticket body
pub struct ValidTicket(pub TicketFields);

impl<S> FromRequest<S> for ValidTicket
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::from(ValidationError::InvalidJson {
                reason: e.body_text(),
            })
        })?;

        let body: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::from(ValidationError::InvalidJson {
                reason: e.to_string(),
            })
        })?;

        Ok(Self(TicketFields::from_json(&body)?))
    }
}

/// Extract `{ticket_id}` from the path as an integer
pub struct TicketId(pub i64);

impl<S> FromRequestParts<S> for TicketId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::from(ValidationError::InvalidPath {
                    field: "ticket_id",
                    value: e.body_text(),
                })
            })?;

        let id = raw.parse::<i64>().map_err(|_| {
            ApiError::from(ValidationError::InvalidPath {
                field: "ticket_id",
                value: raw.clone(),
            })
        })?;

        Ok(Self(id))
    }
}

/// Extract the `pending` query flag as a list filter
pub struct PendingFilter(pub TicketFilter);

impl<S> FromRequestParts<S> for PendingFilter
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<HashMap<String, String>> =
            Query::from_request_parts(parts, state).await.map_err(|e| {
                ApiError::from(ValidationError::InvalidQuery {
                    field: "pending",
                    value: e.body_text(),
                })
            })?;

        let pending = match params.get("pending") {
            None => false,
            Some(raw) => parse_flag(raw).ok_or_else(|| {
                ApiError::from(ValidationError::InvalidQuery {
                    field: "pending",
                    value: raw.clone(),
                })
            })?,
        };

        Ok(Self(TicketFilter::from_pending_flag(pending)))
    }
}

/// Parse a boolean query value.
///
/// Accepts the usual spellings, case-insensitive. Surrounding whitespace
/// is not stripped.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}
