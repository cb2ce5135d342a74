//! Client for the bet-maker service (line-provider → bet-maker).

use reqwest::Client;
use url::Url;

use super::{ClientError, ensure_success, normalize_base};
use crate::objects::EventUpdateBatch;

/// Typed HTTP client for the bet-maker **notification webhook**.
#[derive(Debug, Clone)]
pub struct BetMakerClient {
    http: Client,
    base_url: Url,
}

impl BetMakerClient {
    /// Create a new `BetMakerClient`.
    ///
    /// * `base_url` – root URL of the bet-maker (e.g. `http://127.0.0.1:8001/`).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_base(base_url),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /updated` – push changed events.
    ///
    /// Only the status code of the reply is looked at.
    pub async fn send_event_updates(&self, batch: &EventUpdateBatch) -> Result<(), ClientError> {
        let body = batch.to_wire_body()?;
        let url = self.base_url.join("updated")?;

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        ensure_success(resp).await
    }
}
