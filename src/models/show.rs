use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::media::{ImageLinks, Rating, deserialize_optional_date};
use crate::domain::ShowId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    #[serde(default)]
    pub name: String,
    pub summary: Option<String>,
    pub image: Option<ImageLinks>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: Rating,
    pub runtime: Option<u32>,
    pub status: Option<String>,
    pub language: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub premiered: Option<NaiveDate>,
    pub url: Option<String>,
}

impl Show {
    /// Genres, status, rating and runtime, in that order, skipping unknowns.
    #[must_use]
    pub fn detail_parts(&self) -> Vec<String> {
        let mut parts = Vec::new();

        if !self.genres.is_empty() {
            parts.push(self.genres.join(", "));
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            parts.push(status.to_string());
        }
        if let Some(average) = self.rating.average {
            parts.push(format!("★ {average:.1}"));
        }
        if let Some(runtime) = self.runtime {
            parts.push(format!("{runtime} min"));
        }

        parts
    }
}
