//! Controller for the show/episode browser.
//!
//! [`Controller`] is a synchronous state machine: input events and fetch
//! completions go in, [`Effect`]s and [`Screen`]s come out. Fetches are run by
//! whoever drives it, either [`Browser`] (one request at a time) or the
//! interactive loop (many in flight). Completions carry the [`FetchTicket`]
//! they were issued with and are dropped unless that ticket is still current,
//! so a slow response can never overwrite a newer selection.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::listing::Listing;
use super::render::{RenderOptions, RenderedView};
use super::selection::{SelectOption, SelectionKey};
use crate::clients::{CatalogSource, FetchError};
use crate::config::DisplayConfig;
use crate::constants::messages;
use crate::domain::ShowId;
use crate::domain::events::{InputEvent, PickTarget};
use crate::models::{Episode, Show};
use crate::state::{AppState, FetchTicket, Phase, Scope};

/// Where a session begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    /// Load the show catalog first.
    #[default]
    Catalog,

    /// Go straight to the episodes of one show.
    Show(ShowId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerOptions {
    pub start: StartMode,
    pub render: RenderOptions,
    pub sort_shows: bool,
    pub auto_select_first_show: bool,
}

impl ControllerOptions {
    #[must_use]
    pub fn from_display(display: &DisplayConfig, start: StartMode) -> Self {
        Self {
            start,
            render: RenderOptions::from(display),
            sort_shows: display.sort_shows,
            auto_select_first_show: display.auto_select_first_show,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Shows,
    Episodes(ShowId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub target: FetchTarget,
}

/// Work the controller asks its driver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Effect {
    None,
    Fetch(FetchRequest),
}

#[derive(Debug)]
pub enum Outcome {
    Shows(Result<Vec<Show>, FetchError>),
    Episodes(ShowId, Result<Vec<Episode>, FetchError>),
}

#[derive(Debug)]
pub struct Completion {
    pub ticket: FetchTicket,
    pub outcome: Outcome,
}

/// Why an input changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("Nothing to search or pick until the list has loaded")]
    Inactive,

    #[error("No option matches")]
    NoSuchOption,
}

/// Runs one fetch against `source`.
pub async fn execute(source: Arc<dyn CatalogSource>, request: FetchRequest) -> Completion {
    let outcome = match request.target {
        FetchTarget::Shows => Outcome::Shows(source.shows().await),
        FetchTarget::Episodes(show_id) => {
            Outcome::Episodes(show_id, source.episodes(show_id).await)
        }
    };

    Completion {
        ticket: request.ticket,
        outcome,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowHeader {
    pub id: ShowId,
    pub name: Option<String>,
}

/// What the user currently sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    /// Loading, prompt or error text in place of the cards. No status line.
    Message { text: String, is_error: bool },

    Listing {
        show: Option<ShowHeader>,
        view: RenderedView,
        search: String,
        selection: SelectionKey,
        options: Vec<SelectOption>,
    },
}

impl Screen {
    fn message(text: &str, is_error: bool) -> Self {
        Self::Message {
            text: text.to_string(),
            is_error,
        }
    }

    /// The status line, empty for message screens.
    #[must_use]
    pub fn status(&self) -> &str {
        match self {
            Self::Message { .. } => "",
            Self::Listing { view, .. } => &view.status,
        }
    }

    #[must_use]
    pub fn view(&self) -> Option<&RenderedView> {
        match self {
            Self::Message { .. } => None,
            Self::Listing { view, .. } => Some(view),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Message { is_error: true, .. })
    }
}

pub struct Controller {
    options: ControllerOptions,
    state: AppState,
}

impl Controller {
    #[must_use]
    pub fn new(options: ControllerOptions) -> Self {
        let state = Self::initial_state(options.start);
        Self { options, state }
    }

    fn initial_state(start: StartMode) -> AppState {
        match start {
            StartMode::Catalog => {
                AppState::new(Phase::Loading(messages::LOADING_SHOWS), Scope::Catalog)
            }
            StartMode::Show(show_id) => AppState::new(
                Phase::Loading(messages::LOADING_EPISODES),
                Scope::Episodes(Some(show_id)),
            ),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub const fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// First effect of a session.
    pub fn start(&mut self) -> Effect {
        match self.options.start {
            StartMode::Catalog => self.load_catalog(),
            StartMode::Show(show_id) => self.select_show(Some(show_id)),
        }
    }

    /// Discards all state, the cache included, and starts over. Fetches
    /// still in flight from before the reload are neither applied nor cached.
    pub fn reload(&mut self) -> Effect {
        info!("Reloading");
        let mut state = Self::initial_state(self.options.start);
        state.catalog_requests = std::mem::take(&mut self.state.catalog_requests);
        state.episode_requests = std::mem::take(&mut self.state.episode_requests);
        state.catalog_requests.restart();
        state.episode_requests.restart();
        self.state = state;
        self.start()
    }

    /// Applies one user input. `Options`, `Help` and `Quit` belong to the
    /// surface and are ignored here.
    pub fn handle(&mut self, event: &InputEvent) -> Result<Effect, Rejected> {
        match event {
            InputEvent::Search(text) => self.search(text).map(|()| Effect::None),
            InputEvent::Pick(target) => self.pick(*target).map(|()| Effect::None),
            InputEvent::SelectShow(show) => Ok(self.select_show(*show)),
            InputEvent::ShowCatalog => Ok(self.show_catalog()),
            InputEvent::Reload => Ok(self.reload()),
            InputEvent::Options | InputEvent::Help | InputEvent::Quit => Ok(Effect::None),
        }
    }

    /// Search box input.
    pub fn search(&mut self, text: &str) -> Result<(), Rejected> {
        if !self.state.phase.is_loaded() {
            return Err(Rejected::Inactive);
        }

        let applied = match self.state.scope {
            Scope::Catalog => self.state.catalog.as_mut().map(|l| l.set_search(text)),
            Scope::Episodes(_) => self.state.episodes.as_mut().map(|l| l.set_search(text)),
        };
        applied.ok_or(Rejected::Inactive)
    }

    /// Selection control change.
    pub fn pick(&mut self, target: PickTarget) -> Result<(), Rejected> {
        if !self.state.phase.is_loaded() {
            return Err(Rejected::Inactive);
        }

        let listing_picked = match self.state.scope {
            Scope::Catalog => self.state.catalog.as_mut().map(|l| l.pick(target)),
            Scope::Episodes(_) => self.state.episodes.as_mut().map(|l| l.pick(target)),
        };

        match listing_picked {
            Some(true) => Ok(()),
            Some(false) => Err(Rejected::NoSuchOption),
            None => Err(Rejected::Inactive),
        }
    }

    /// Show selection change. Serves cached episodes immediately, otherwise
    /// asks for a fetch. Every call makes earlier episode fetches stale.
    pub fn select_show(&mut self, show: Option<ShowId>) -> Effect {
        if self.state.phase.is_error() {
            return Effect::None;
        }

        let ticket = self.state.episode_requests.issue();
        self.state.scope = Scope::Episodes(show);
        self.state.episodes = None;

        let Some(show_id) = show else {
            self.state.phase = Phase::Prompt(messages::SELECT_SHOW);
            return Effect::None;
        };

        if let Some(cached) = self.state.cache.get(show_id) {
            debug!(show_id = %show_id, count = cached.len(), "Episode cache hit");
            self.state.episodes = Some(Listing::new(cached));
            self.state.phase = Phase::Loaded;
            return Effect::None;
        }

        info!(show_id = %show_id, "Loading episodes");
        self.state.phase = Phase::Loading(messages::LOADING_EPISODES);
        Effect::Fetch(FetchRequest {
            ticket,
            target: FetchTarget::Episodes(show_id),
        })
    }

    /// Back to the show listing, fetching it if it was never loaded.
    pub fn show_catalog(&mut self) -> Effect {
        if self.state.phase.is_error() {
            return Effect::None;
        }

        self.state.episode_requests.invalidate();
        self.state.episodes = None;
        self.state.scope = Scope::Catalog;

        if self.state.catalog.is_some() {
            self.state.phase = Phase::Loaded;
            Effect::None
        } else {
            self.load_catalog()
        }
    }

    fn load_catalog(&mut self) -> Effect {
        info!("Loading show catalog");
        self.state.phase = Phase::Loading(messages::LOADING_SHOWS);
        Effect::Fetch(FetchRequest {
            ticket: self.state.catalog_requests.issue(),
            target: FetchTarget::Shows,
        })
    }

    /// Applies a finished fetch. Stale completions only ever touch the cache.
    pub fn complete(&mut self, completion: Completion) -> Effect {
        match completion.outcome {
            Outcome::Shows(result) => self.complete_shows(completion.ticket, result),
            Outcome::Episodes(show_id, result) => {
                self.complete_episodes(completion.ticket, show_id, result);
                Effect::None
            }
        }
    }

    fn complete_shows(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Show>, FetchError>,
    ) -> Effect {
        if !self.state.catalog_requests.is_current(ticket) {
            debug!(generation = ticket.generation(), "Dropping stale catalog response");
            return Effect::None;
        }

        let in_catalog = self.state.scope == Scope::Catalog;

        match result {
            Ok(mut shows) => {
                if self.options.sort_shows {
                    sort_shows(&mut shows);
                }
                let first = shows.first().map(|show| show.id);
                self.state.catalog = Some(Listing::new(shows));

                if !in_catalog {
                    return Effect::None;
                }

                self.state.phase = Phase::Loaded;
                match first {
                    Some(show_id) if self.options.auto_select_first_show => {
                        self.select_show(Some(show_id))
                    }
                    _ => Effect::None,
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to load shows");
                if in_catalog {
                    self.state.phase = Phase::Error(messages::SHOWS_FAILED);
                }
                Effect::None
            }
        }
    }

    fn complete_episodes(
        &mut self,
        ticket: FetchTicket,
        show_id: ShowId,
        result: Result<Vec<Episode>, FetchError>,
    ) {
        if self.state.episode_requests.predates_restart(ticket) {
            debug!(show_id = %show_id, "Dropping episode response from before the reload");
            return;
        }

        let current = self.state.episode_requests.is_current(ticket)
            && self.state.active_show() == Some(show_id);

        match result {
            Ok(episodes) => {
                let episodes = self.state.cache.put(show_id, episodes);
                if !current {
                    debug!(show_id = %show_id, "Cached stale episode response without applying it");
                    return;
                }
                self.state.episodes = Some(Listing::new(episodes));
                self.state.phase = Phase::Loaded;
            }
            Err(e) => {
                if !current {
                    debug!(show_id = %show_id, error = %e, "Ignoring stale episode failure");
                    return;
                }
                warn!(show_id = %show_id, error = %e, "Failed to load episodes");
                self.state.episodes = None;
                self.state.phase = Phase::Error(messages::EPISODES_FAILED);
            }
        }
    }

    /// Renders the current state. Every call rebuilds the whole screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        let render = &self.options.render;

        match self.state.phase {
            Phase::Loading(text) | Phase::Prompt(text) => Screen::message(text, false),
            Phase::Error(text) => Screen::message(text, true),
            Phase::Loaded => match self.state.scope {
                Scope::Catalog => self.state.catalog.as_ref().map_or_else(
                    || Screen::message(messages::LOADING_SHOWS, false),
                    |listing| listing_screen(listing, None, render),
                ),
                Scope::Episodes(show) => match (show, self.state.episodes.as_ref()) {
                    (Some(show_id), Some(listing)) => {
                        let header = ShowHeader {
                            id: show_id,
                            name: self.state.show_name(show_id).map(str::to_string),
                        };
                        listing_screen(listing, Some(header), render)
                    }
                    _ => Screen::message(messages::SELECT_SHOW, false),
                },
            },
        }
    }
}

fn listing_screen<T: super::render::Listable>(
    listing: &Listing<T>,
    show: Option<ShowHeader>,
    render: &RenderOptions,
) -> Screen {
    Screen::Listing {
        show,
        view: listing.render(render),
        search: listing.search_text().to_string(),
        selection: listing.selection(),
        options: listing.options(),
    }
}

/// Case-insensitive by name, stable for equal names.
pub fn sort_shows(shows: &mut [Show]) {
    shows.sort_by_cached_key(|show| show.name.to_lowercase());
}

/// Drives a [`Controller`] one fetch at a time. Used by the one-shot commands.
pub struct Browser {
    source: Arc<dyn CatalogSource>,
    controller: Controller,
}

impl Browser {
    pub fn new(source: Arc<dyn CatalogSource>, options: ControllerOptions) -> Self {
        Self {
            source,
            controller: Controller::new(options),
        }
    }

    #[must_use]
    pub const fn controller(&self) -> &Controller {
        &self.controller
    }

    /// For inputs that never fetch, such as search and pick.
    pub const fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub async fn start(&mut self) -> Screen {
        let effect = self.controller.start();
        self.run(effect).await;
        self.controller.screen()
    }

    /// Rejected inputs leave the screen as it was.
    pub async fn handle(&mut self, event: &InputEvent) -> Screen {
        let effect = self.controller.handle(event).unwrap_or_else(|rejected| {
            debug!(%rejected, "Input ignored");
            Effect::None
        });
        self.run(effect).await;
        self.controller.screen()
    }

    /// Runs `effect` and whatever follows from it until nothing is pending.
    pub async fn run(&mut self, mut effect: Effect) {
        while let Effect::Fetch(request) = effect {
            let completion = execute(Arc::clone(&self.source), request).await;
            effect = self.controller.complete(completion);
        }
    }
}
