//! chucknorris.io client.
//!
//! Two endpoints, both plain JSON over GET:
//! - `/jokes/categories` → `["animal", "career", ...]`
//! - `/jokes/random?category=dev` → `{"value": "...", ...}`

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use crate::api::{ApiError, Joke, JokeSource};
use crate::core::config::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

pub struct ChuckNorrisClient {
    base_url: String,
    client: reqwest::Client,
}

impl ChuckNorrisClient {
    pub fn new(base_url: Option<String>, timeout: Option<Duration>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            }
        };

        Self { base_url, client }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        info!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("Response status for {}: {}", path, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("API error: {} - {}", status, err_body);
            return Err(ApiError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl JokeSource for ChuckNorrisClient {
    fn name(&self) -> &str {
        "chucknorris.io"
    }

    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        let categories: Vec<String> = self.get_json("/jokes/categories", &[]).await?;
        debug!("Received {} categories", categories.len());
        if categories.is_empty() {
            return Err(ApiError::Empty);
        }
        Ok(categories)
    }

    async fn random_joke(&self, category: &str) -> Result<Joke, ApiError> {
        self.get_json("/jokes/random", &[("category", category)])
            .await
    }
}
