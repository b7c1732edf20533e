use anyhow::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use super::{CatalogSource, FetchError};
use crate::config::ApiConfig;
use crate::domain::ShowId;
use crate::models::{Episode, Show};

/// HTTP client for the TVMaze REST API.
#[derive(Clone)]
pub struct TvMazeClient {
    client: Client,
    base_url: String,
}

impl TvMazeClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());

        if config.request_timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_seconds));
        }

        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(FetchError::BadResponse {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl CatalogSource for TvMazeClient {
    async fn shows(&self) -> Result<Vec<Show>, FetchError> {
        let shows: Vec<Show> = self.get_json("/shows").await?;
        info!(count = shows.len(), "Fetched show catalog");
        Ok(shows)
    }

    async fn episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, FetchError> {
        let episodes: Vec<Episode> = self
            .get_json(&format!("/shows/{show_id}/episodes"))
            .await?;
        info!(show_id = %show_id, count = episodes.len(), "Fetched episodes");
        Ok(episodes)
    }
}
