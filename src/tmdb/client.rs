use axum::body::Bytes;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::types::UpstreamRequest;
use crate::config::TmdbConfig;

/// Message returned to callers for every kind of upstream failure.
pub const FETCH_ERROR: &str = "Failed to fetch data from TMDB";

/// Cheap endpoint used to check that TMDB is reachable and the key works.
pub const HEALTH_ENDPOINT: &str = "/configuration";

const API_KEY_PARAM: &str = "api_key";

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("TMDB API key is missing")]
    MissingApiKey,
    #[error("Request failed: {0}")]
    Transport(reqwest::Error),
    #[error("TMDB returned status {0}")]
    Status(StatusCode),
    #[error("Invalid JSON from TMDB: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TmdbError {
    fn from(e: reqwest::Error) -> Self {
        // The URL carries the API key in its query string.
        TmdbError::Transport(e.without_url())
    }
}

pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, TmdbError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tmdb-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().map(str::to_string),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Caller parameters with the API key merged in. The key is written
    /// last so a caller-supplied `api_key` can never replace it.
    fn query_for(&self, request: &UpstreamRequest) -> Result<Vec<(String, String)>, TmdbError> {
        let api_key = self.api_key.as_ref().ok_or(TmdbError::MissingApiKey)?;

        let mut query: Vec<(String, String)> = request
            .params
            .iter()
            .filter(|(k, _)| *k != API_KEY_PARAM)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        query.push((API_KEY_PARAM.to_string(), api_key.clone()));

        Ok(query)
    }

    /// GET `{base_url}{endpoint}` and return the JSON body as received.
    ///
    /// Any failure is logged here with its cause; callers only need to
    /// turn the error into the generic envelope.
    pub async fn fetch(&self, request: &UpstreamRequest) -> Result<Bytes, TmdbError> {
        let result = self.send(request).await;

        if let Err(ref e) = result {
            warn!(endpoint = %request.endpoint, error = %e, "TMDB request failed");
        }

        result
    }

    async fn send(&self, request: &UpstreamRequest) -> Result<Bytes, TmdbError> {
        let query = self.query_for(request)?;

        debug!(
            endpoint = %request.endpoint,
            params = request.params.len(),
            "Fetching from TMDB"
        );

        let response = self
            .client
            .get(self.url(&request.endpoint))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TmdbError::Status(status));
        }

        let body = response.bytes().await?;

        // Relay the payload untouched, but only if it is JSON.
        serde_json::from_slice::<serde::de::IgnoredAny>(&body)?;

        Ok(body)
    }
}
