use crate::domain::ShowId;
use crate::models::{Episode, Show};
use crate::services::EpisodeCache;
use crate::services::listing::Listing;

/// Identifies one issued fetch. Only the latest ticket of a tracker is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.0
    }
}

/// Monotonic request-generation counter for one control.
///
/// Survives reloads: a reload calls [`RequestTracker::restart`] instead of
/// replacing the tracker, so generations never repeat within a process.
#[derive(Debug, Default, Clone)]
pub struct RequestTracker {
    latest: u64,
    session_start: u64,
}

impl RequestTracker {
    /// Issues a new ticket, making every earlier one stale.
    pub const fn issue(&mut self) -> FetchTicket {
        self.latest += 1;
        FetchTicket(self.latest)
    }

    /// Makes every issued ticket stale without issuing a new one.
    pub const fn invalidate(&mut self) {
        self.latest += 1;
    }

    /// Makes every issued ticket stale and marks it as belonging to a
    /// finished session.
    pub const fn restart(&mut self) {
        self.latest += 1;
        self.session_start = self.latest;
    }

    #[must_use]
    pub const fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Whether `ticket` was issued before the last restart.
    #[must_use]
    pub const fn predates_restart(&self, ticket: FetchTicket) -> bool {
        ticket.0 <= self.session_start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a fetch; search and selection are inert.
    Loading(&'static str),

    Loaded,

    /// Show selection is cleared.
    Prompt(&'static str),

    /// A fetch failed. Only a reload leaves this phase.
    Error(&'static str),
}

impl Phase {
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Which full set the screen is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Catalog,
    Episodes(Option<ShowId>),
}

/// Everything the browser knows, owned by the controller.
#[derive(Debug)]
pub struct AppState {
    pub phase: Phase,

    pub scope: Scope,

    pub catalog: Option<Listing<Show>>,

    /// Episodes of the show in `scope`, once loaded.
    pub episodes: Option<Listing<Episode>>,

    pub cache: EpisodeCache,

    pub catalog_requests: RequestTracker,

    pub episode_requests: RequestTracker,
}

impl AppState {
    #[must_use]
    pub fn new(phase: Phase, scope: Scope) -> Self {
        Self {
            phase,
            scope,
            catalog: None,
            episodes: None,
            cache: EpisodeCache::new(),
            catalog_requests: RequestTracker::default(),
            episode_requests: RequestTracker::default(),
        }
    }

    #[must_use]
    pub const fn active_show(&self) -> Option<ShowId> {
        match self.scope {
            Scope::Episodes(show) => show,
            Scope::Catalog => None,
        }
    }

    /// Name of `show_id` if the catalog has been loaded.
    #[must_use]
    pub fn show_name(&self, show_id: ShowId) -> Option<&str> {
        self.catalog
            .as_ref()?
            .items()
            .iter()
            .find(|show| show.id == show_id)
            .map(|show| show.name.as_str())
    }
}
