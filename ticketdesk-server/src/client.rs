//! HTTP client for a running ticketdesk server

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::{Ticket, TicketFields};

/// Default server address
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Errors returned by [`TicketClient`]
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct DeleteBody {
    message: String,
}

/// Thin typed wrapper over the ticket endpoints
#[derive(Clone)]
pub struct TicketClient {
    http: Client,
    base_url: String,
}

impl TicketClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/tickets/", self.base_url)
    }

    fn item_url(&self, ticket_id: i64) -> String {
        format!("{}/tickets/{}", self.base_url, ticket_id)
    }

    /// GET /tickets/, optionally only pending ones
    pub async fn list(&self, pending: bool) -> Result<Vec<Ticket>, ClientError> {
        let mut request = self.http.get(self.collection_url());
        if pending {
            request = request.query(&[("pending", "true")]);
        }
        decode(request.send().await?).await
    }

    /// POST /tickets/
    pub async fn create(&self, fields: &TicketFields) -> Result<Ticket, ClientError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(fields)
            .send()
            .await?;
        decode(response).await
    }

    /// PUT /tickets/{ticket_id}
    pub async fn update(&self, ticket_id: i64, fields: &TicketFields) -> Result<Ticket, ClientError> {
        let response = self
            .http
            .put(self.item_url(ticket_id))
            .json(fields)
            .send()
            .await?;
        decode(response).await
    }

    /// DELETE /tickets/{ticket_id}, returning the server's message
    pub async fn delete(&self, ticket_id: i64) -> Result<String, ClientError> {
        let response = self.http.delete(self.item_url(ticket_id)).send().await?;
        let body: DeleteBody = decode(response).await?;
        Ok(body.message)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.message)
        .unwrap_or(text);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
