//! Domain types for the show/episode browser with strong typing.
//!
//! Newtypes keep TVMaze show ids apart from positional indices, and the
//! display code of an episode is a value type with its own formatting.

pub mod events;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// TVMaze identifier of a show.
///
/// # Examples
///
/// ```rust
/// use tvbrowse::domain::ShowId;
///
/// let id = ShowId::new(82);
/// assert_eq!(id.value(), 82);
/// assert_eq!(id.to_string(), "82");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(u32);

impl ShowId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ShowId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl FromStr for ShowId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Zero-padded `S{season}E{number}` code of an episode.
///
/// Not unique across shows, and not guaranteed unique within one either.
///
/// ```rust
/// use tvbrowse::domain::EpisodeCode;
///
/// assert_eq!(EpisodeCode::new(2, 7).to_string(), "S02E07");
/// assert_eq!(EpisodeCode::new(12, 1).to_string(), "S12E01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpisodeCode {
    pub season: u32,
    pub number: u32,
}

impl EpisodeCode {
    #[must_use]
    pub const fn new(season: u32, number: u32) -> Self {
        Self { season, number }
    }
}

impl fmt::Display for EpisodeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.number)
    }
}

impl FromStr for EpisodeCode {
    type Err = String;

    /// Parses `S01E02` (case-insensitive, padding optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let rest = upper
            .strip_prefix('S')
            .ok_or_else(|| format!("'{s}' is not an episode code"))?;
        let (season, number) = rest
            .split_once('E')
            .ok_or_else(|| format!("'{s}' is not an episode code"))?;

        let season = season
            .parse()
            .map_err(|_| format!("Invalid season in '{s}'"))?;
        let number = number
            .parse()
            .map_err(|_| format!("Invalid episode number in '{s}'"))?;

        Ok(Self::new(season, number))
    }
}

/// Which record type a listing holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Show,
    Episode,
}

impl ItemKind {
    #[must_use]
    pub const fn noun(&self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Episode => "episode",
        }
    }

    /// Label of the "everything" option of the selection control.
    #[must_use]
    pub const fn all_label(&self) -> &'static str {
        match self {
            Self::Show => "All shows",
            Self::Episode => "All episodes",
        }
    }
}
