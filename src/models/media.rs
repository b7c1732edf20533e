use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Image references as TVMaze sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLinks {
    pub medium: Option<String>,
    pub original: Option<String>,
}

impl ImageLinks {
    /// The medium-size image, falling back to the original.
    #[must_use]
    pub fn best(&self) -> Option<&str> {
        fn usable(url: &Option<String>) -> Option<&str> {
            url.as_deref().filter(|url| !url.is_empty())
        }
        usable(&self.medium).or_else(|| usable(&self.original))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub average: Option<f32>,
}

/// Accepts `null`, `""` and `"YYYY-MM-DD"`.
///
/// TVMaze sends an empty string as the airdate of unaired episodes.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
