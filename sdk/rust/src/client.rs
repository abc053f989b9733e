use reqwest::{Client, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },
}

pub struct TicketClient {
    client: Client,
    base_url: String,
}

impl TicketClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Take a new ticket.
    pub async fn get_ticket(&self) -> Result<String, SdkError> {
        self.get_text("/get_ticket").await
    }

    /// Call the next waiting ticket.
    pub async fn call_ticket(&self) -> Result<String, SdkError> {
        self.get_text("/call_ticket").await
    }

    /// Report how many people are waiting.
    pub async fn list_tickets(&self) -> Result<String, SdkError> {
        self.get_text("/list_tickets").await
    }

    /// Raw GET against the service, for callers that need headers or status.
    pub async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn get_text(&self, path: &str) -> Result<String, SdkError> {
        let resp = self.get(path).await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(SdkError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
