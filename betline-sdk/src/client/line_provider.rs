//! Client for the line-provider service (bet-maker → line-provider).

use reqwest::Client;
use url::Url;

use super::{ClientError, normalize_base, parse_response};
use crate::objects::Event;

/// Typed HTTP client for the line-provider **event API**.
#[derive(Debug, Clone)]
pub struct LineProviderClient {
    http: Client,
    base_url: Url,
}

impl LineProviderClient {
    /// Create a new `LineProviderClient`.
    ///
    /// * `base_url` – root URL of the line-provider (e.g. `http://127.0.0.1:8002/`).
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

    /// `GET /event/new` – events currently open for betting.
    pub async fn open_events(&self) -> Result<Vec<Event>, ClientError> {
        let url = self.base_url.join("event/new")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }
}
