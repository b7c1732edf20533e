use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::media::{ImageLinks, deserialize_optional_date};
use crate::domain::EpisodeCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub season: u32,
    /// `null` upstream for specials.
    pub number: Option<u32>,
    pub summary: Option<String>,
    pub image: Option<ImageLinks>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub airdate: Option<NaiveDate>,
    pub runtime: Option<u32>,
}

impl Episode {
    /// Specials without a number format as `E00`.
    #[must_use]
    pub fn code(&self) -> EpisodeCode {
        EpisodeCode::new(self.season, self.number.unwrap_or(0))
    }

    #[must_use]
    pub fn detail_parts(&self) -> Vec<String> {
        let mut parts = Vec::new();

        if let Some(airdate) = self.airdate {
            parts.push(format!("Aired {}", airdate.format("%Y-%m-%d")));
        }
        if let Some(runtime) = self.runtime {
            parts.push(format!("{runtime} min"));
        }

        parts
    }
}
