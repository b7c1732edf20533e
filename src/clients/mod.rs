//! Remote catalog sources.
//!
//! [`CatalogSource`] is the seam between the controller and the network; the
//! production implementation is [`tvmaze::TvMazeClient`].

pub mod tvmaze;

pub use tvmaze::TvMazeClient;

use crate::domain::ShowId;
use crate::models::{Episode, Show};
use thiserror::Error;

/// Why a fetch failed. All variants end in the same user-visible error screen.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response status: {status}")]
    BadResponse { status: u16 },

    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::BadResponse {
                status: status.as_u16(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Read-only source of shows and their episodes.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every show, in upstream order.
    async fn shows(&self) -> Result<Vec<Show>, FetchError>;

    /// Fetches the episodes of one show, in upstream order.
    async fn episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, FetchError>;
}
