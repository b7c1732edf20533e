//! Controller scenarios against an in-memory catalog.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tvbrowse::clients::{CatalogSource, FetchError};
use tvbrowse::constants::messages;
use tvbrowse::domain::ShowId;
use tvbrowse::domain::events::{InputEvent, PickTarget};
use tvbrowse::models::{Episode, Rating, Show};
use tvbrowse::services::browser::{Completion, FetchTarget, Outcome};
use tvbrowse::services::{
    Browser, Controller, ControllerOptions, Effect, Rejected, Screen, SelectionKey, StartMode,
    StatusStyle,
};
use tvbrowse::state::Phase;

#[derive(Default)]
struct FakeCatalog {
    shows: Vec<Show>,
    episodes: HashMap<ShowId, Vec<Episode>>,
    fail_shows: bool,
    fail_episodes: bool,
    episode_calls: AtomicUsize,
}

#[async_trait::async_trait]
impl CatalogSource for FakeCatalog {
    async fn shows(&self) -> Result<Vec<Show>, FetchError> {
        if self.fail_shows {
            return Err(FetchError::Network("connection refused".to_string()));
        }
        Ok(self.shows.clone())
    }

    async fn episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, FetchError> {
        self.episode_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_episodes {
            return Err(FetchError::BadResponse { status: 500 });
        }
        self.episodes
            .get(&show_id)
            .cloned()
            .ok_or(FetchError::BadResponse { status: 404 })
    }
}

fn show(id: u32, name: &str) -> Show {
    Show {
        id: ShowId::new(id),
        name: name.to_string(),
        summary: Some(format!("<p>All about {name}.</p>")),
        image: None,
        genres: vec!["Drama".to_string()],
        rating: Rating { average: Some(7.5) },
        runtime: Some(60),
        status: Some("Ended".to_string()),
        language: Some("English".to_string()),
        premiered: None,
        url: None,
    }
}

fn episodes(names: &[&str]) -> Vec<Episode> {
    names
        .iter()
        .zip(1..)
        .map(|(name, number)| Episode {
            id: number,
            name: (*name).to_string(),
            season: 1,
            number: Some(number),
            summary: None,
            image: None,
            airdate: None,
            runtime: None,
        })
        .collect()
}

fn catalog() -> FakeCatalog {
    let mut eps = HashMap::new();
    eps.insert(ShowId::new(1), episodes(&["Pilot", "Ohio", "Kansas City"]));
    eps.insert(ShowId::new(2), episodes(&["Alpha", "Beta"]));

    FakeCatalog {
        shows: vec![show(2, "zebra Show"), show(1, "Anthology")],
        episodes: eps,
        ..FakeCatalog::default()
    }
}

fn titles(screen: &Screen) -> Vec<String> {
    screen
        .view()
        .map(|v| v.cards.iter().map(|c| c.title.clone()).collect())
        .unwrap_or_default()
}

fn options(start: StartMode) -> ControllerOptions {
    ControllerOptions {
        start,
        sort_shows: true,
        ..ControllerOptions::default()
    }
}

#[tokio::test]
async fn search_narrows_episode_list() {
    let mut browser = Browser::new(Arc::new(catalog()), options(StartMode::Show(ShowId::new(1))));

    let screen = browser.start().await;
    assert_eq!(titles(&screen), vec!["Pilot", "Ohio", "Kansas City"]);
    assert_eq!(screen.status(), "3 / 3 episode(s) found");

    let screen = browser.handle(&InputEvent::Search("an".to_string())).await;
    assert_eq!(titles(&screen), vec!["Kansas City"]);
    assert_eq!(screen.status(), "1 / 3 episode(s) found");

    let screen = browser.handle(&InputEvent::Search(String::new())).await;
    assert_eq!(screen.view().unwrap().displayed, 3);
}

#[tokio::test]
async fn catalog_is_sorted_and_searchable() {
    let mut browser = Browser::new(Arc::new(catalog()), options(StartMode::Catalog));

    let screen = browser.start().await;
    assert_eq!(titles(&screen), vec!["Anthology", "zebra Show"]);
    assert_eq!(screen.status(), "2 / 2 show(s) found");

    let card = &screen.view().unwrap().cards[0];
    assert_eq!(card.code, None);
    assert_eq!(card.details, vec!["Drama", "Ended", "★ 7.5", "60 min"]);

    let screen = browser.handle(&InputEvent::Search("ZEBRA".to_string())).await;
    assert_eq!(titles(&screen), vec!["zebra Show"]);
    assert_eq!(screen.status(), "1 / 2 show(s) found");
}

#[tokio::test]
async fn pick_and_search_reset_each_other() {
    let mut browser = Browser::new(Arc::new(catalog()), options(StartMode::Show(ShowId::new(1))));
    browser.start().await;

    browser.handle(&InputEvent::Search("o".to_string())).await;
    let screen = browser.handle(&InputEvent::Pick(PickTarget::Number(3))).await;
    match &screen {
        Screen::Listing {
            search, selection, ..
        } => {
            assert_eq!(search, "");
            assert_eq!(*selection, SelectionKey::Index(2));
        }
        Screen::Message { .. } => panic!("expected a listing"),
    }
    assert_eq!(titles(&screen), vec!["Kansas City"]);
    assert_eq!(screen.status(), "1 / 3 episode(s) found");

    let screen = browser.handle(&InputEvent::Search("pilot".to_string())).await;
    match &screen {
        Screen::Listing { selection, .. } => assert_eq!(*selection, SelectionKey::All),
        Screen::Message { .. } => panic!("expected a listing"),
    }
    assert_eq!(titles(&screen), vec!["Pilot"]);
}

#[tokio::test]
async fn failed_catalog_fetch_shows_error_and_freezes_controls() {
    let source = FakeCatalog {
        fail_shows: true,
        ..catalog()
    };
    let mut browser = Browser::new(Arc::new(source), options(StartMode::Catalog));

    let screen = browser.start().await;
    assert_eq!(
        screen,
        Screen::Message {
            text: messages::SHOWS_FAILED.to_string(),
            is_error: true
        }
    );
    assert_eq!(screen.status(), "");
    assert!(screen.view().is_none());

    assert_eq!(browser.controller_mut().search("a"), Err(Rejected::Inactive));
    let screen = browser
        .handle(&InputEvent::SelectShow(Some(ShowId::new(1))))
        .await;
    assert!(screen.is_error());
}

#[tokio::test]
async fn failed_episode_fetch_recovers_on_reload() {
    let source = Arc::new(FakeCatalog {
        fail_episodes: true,
        ..catalog()
    });
    let mut browser = Browser::new(source.clone(), options(StartMode::Catalog));
    browser.start().await;

    let screen = browser
        .handle(&InputEvent::SelectShow(Some(ShowId::new(1))))
        .await;
    assert_eq!(
        screen,
        Screen::Message {
            text: messages::EPISODES_FAILED.to_string(),
            is_error: true
        }
    );
    assert!(browser.controller().state().episodes.is_none());

    let screen = browser.handle(&InputEvent::ShowCatalog).await;
    assert!(screen.is_error());

    let screen = browser.handle(&InputEvent::Reload).await;
    assert_eq!(titles(&screen), vec!["Anthology", "zebra Show"]);
    assert_eq!(source.episode_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn episodes_are_fetched_once_per_show() {
    let source = Arc::new(catalog());
    let mut browser = Browser::new(source.clone(), options(StartMode::Catalog));
    browser.start().await;

    let first = browser
        .handle(&InputEvent::SelectShow(Some(ShowId::new(1))))
        .await;
    browser.handle(&InputEvent::ShowCatalog).await;
    browser
        .handle(&InputEvent::SelectShow(Some(ShowId::new(2))))
        .await;
    let again = browser
        .handle(&InputEvent::SelectShow(Some(ShowId::new(1))))
        .await;

    assert_eq!(first, again);
    assert_eq!(source.episode_calls.load(Ordering::SeqCst), 2);
    assert_eq!(browser.controller().state().cache.len(), 2);

    match again {
        Screen::Listing { show, .. } => {
            let show = show.unwrap();
            assert_eq!(show.id, ShowId::new(1));
            assert_eq!(show.name.as_deref(), Some("Anthology"));
        }
        Screen::Message { .. } => panic!("expected a listing"),
    }
}

#[tokio::test]
async fn auto_select_opens_first_sorted_show() {
    let opts = ControllerOptions {
        auto_select_first_show: true,
        ..options(StartMode::Catalog)
    };
    let mut browser = Browser::new(Arc::new(catalog()), opts);

    let screen = browser.start().await;
    assert_eq!(titles(&screen), vec!["Pilot", "Ohio", "Kansas City"]);
    assert_eq!(
        browser.controller().state().active_show(),
        Some(ShowId::new(1))
    );
}

#[tokio::test]
async fn showing_status_style() {
    let mut opts = options(StartMode::Show(ShowId::new(2)));
    opts.render.status_style = StatusStyle::Showing;
    let mut browser = Browser::new(Arc::new(catalog()), opts);

    let screen = browser.start().await;
    assert_eq!(screen.status(), "Showing 2/2 episode(s)");
}

fn fetch_request(effect: Effect) -> tvbrowse::services::browser::FetchRequest {
    match effect {
        Effect::Fetch(request) => request,
        Effect::None => panic!("expected a fetch"),
    }
}

fn loaded_catalog_controller() -> Controller {
    let mut controller = Controller::new(options(StartMode::Catalog));
    let request = fetch_request(controller.start());
    assert_eq!(request.target, FetchTarget::Shows);

    let effect = controller.complete(Completion {
        ticket: request.ticket,
        outcome: Outcome::Shows(Ok(vec![show(1, "Show A"), show(2, "Show B")])),
    });
    assert_eq!(effect, Effect::None);
    controller
}

#[test]
fn late_response_for_previous_show_is_not_shown() {
    let mut controller = loaded_catalog_controller();

    let request_a = fetch_request(controller.select_show(Some(ShowId::new(1))));
    let request_b = fetch_request(controller.select_show(Some(ShowId::new(2))));

    let _ = controller.complete(Completion {
        ticket: request_b.ticket,
        outcome: Outcome::Episodes(ShowId::new(2), Ok(episodes(&["Alpha", "Beta"]))),
    });
    let _ = controller.complete(Completion {
        ticket: request_a.ticket,
        outcome: Outcome::Episodes(ShowId::new(1), Ok(episodes(&["Pilot"]))),
    });

    let screen = controller.screen();
    assert_eq!(titles(&screen), vec!["Alpha", "Beta"]);
    assert_eq!(controller.state().active_show(), Some(ShowId::new(2)));

    // The stale response still filled the cache.
    assert!(controller.state().cache.contains(ShowId::new(1)));
    assert_eq!(controller.select_show(Some(ShowId::new(1))), Effect::None);
    assert_eq!(titles(&controller.screen()), vec!["Pilot"]);
}

#[test]
fn early_response_for_previous_show_is_not_shown() {
    let mut controller = loaded_catalog_controller();

    let request_a = fetch_request(controller.select_show(Some(ShowId::new(1))));
    let request_b = fetch_request(controller.select_show(Some(ShowId::new(2))));

    let _ = controller.complete(Completion {
        ticket: request_a.ticket,
        outcome: Outcome::Episodes(ShowId::new(1), Ok(episodes(&["Pilot"]))),
    });
    assert_eq!(controller.phase(), Phase::Loading(messages::LOADING_EPISODES));

    let _ = controller.complete(Completion {
        ticket: request_b.ticket,
        outcome: Outcome::Episodes(ShowId::new(2), Ok(episodes(&["Alpha", "Beta"]))),
    });

    assert_eq!(titles(&controller.screen()), vec!["Alpha", "Beta"]);
}

#[test]
fn stale_failure_does_not_clobber_current_view() {
    let mut controller = loaded_catalog_controller();

    let request_a = fetch_request(controller.select_show(Some(ShowId::new(1))));
    let request_b = fetch_request(controller.select_show(Some(ShowId::new(2))));

    let _ = controller.complete(Completion {
        ticket: request_b.ticket,
        outcome: Outcome::Episodes(ShowId::new(2), Ok(episodes(&["Alpha"]))),
    });
    let _ = controller.complete(Completion {
        ticket: request_a.ticket,
        outcome: Outcome::Episodes(
            ShowId::new(1),
            Err(FetchError::Network("timed out".to_string())),
        ),
    });

    assert_eq!(controller.phase(), Phase::Loaded);
    assert_eq!(titles(&controller.screen()), vec!["Alpha"]);
}

#[test]
fn leaving_for_the_catalog_discards_pending_episodes() {
    let mut controller = loaded_catalog_controller();

    let request = fetch_request(controller.select_show(Some(ShowId::new(1))));
    assert_eq!(controller.show_catalog(), Effect::None);

    let _ = controller.complete(Completion {
        ticket: request.ticket,
        outcome: Outcome::Episodes(ShowId::new(1), Ok(episodes(&["Pilot"]))),
    });

    assert_eq!(titles(&controller.screen()), vec!["Show A", "Show B"]);
}

#[test]
fn show_chosen_during_catalog_load_is_kept() {
    let mut controller = Controller::new(ControllerOptions {
        auto_select_first_show: true,
        ..options(StartMode::Catalog)
    });
    let shows_request = fetch_request(controller.start());

    let episodes_request = fetch_request(controller.select_show(Some(ShowId::new(2))));
    let _ = controller.complete(Completion {
        ticket: episodes_request.ticket,
        outcome: Outcome::Episodes(ShowId::new(2), Ok(episodes(&["Alpha"]))),
    });

    let effect = controller.complete(Completion {
        ticket: shows_request.ticket,
        outcome: Outcome::Shows(Ok(vec![show(1, "Show A"), show(2, "Show B")])),
    });

    assert_eq!(effect, Effect::None);
    assert_eq!(controller.state().active_show(), Some(ShowId::new(2)));
    match controller.screen() {
        Screen::Listing { show, view, .. } => {
            assert_eq!(show.unwrap().name.as_deref(), Some("Show B"));
            assert_eq!(view.status, "1 / 1 episode(s) found");
        }
        Screen::Message { .. } => panic!("expected a listing"),
    }
}

#[test]
fn fetches_from_before_a_reload_are_discarded() {
    let mut controller = Controller::new(options(StartMode::Catalog));
    let before = fetch_request(controller.start());

    let after = fetch_request(controller.reload());
    assert_ne!(before.ticket, after.ticket);

    let _ = controller.complete(Completion {
        ticket: after.ticket,
        outcome: Outcome::Shows(Ok(vec![show(1, "Show A")])),
    });
    assert_eq!(controller.phase(), Phase::Loaded);

    let _ = controller.complete(Completion {
        ticket: before.ticket,
        outcome: Outcome::Shows(Err(FetchError::Network("timed out".to_string()))),
    });
    assert_eq!(controller.phase(), Phase::Loaded);
    assert_eq!(titles(&controller.screen()), vec!["Show A"]);
}

#[test]
fn episodes_from_before_a_reload_stay_out_of_the_cache() {
    let mut controller = loaded_catalog_controller();
    let stale = fetch_request(controller.select_show(Some(ShowId::new(1))));

    let shows = fetch_request(controller.reload());
    let _ = controller.complete(Completion {
        ticket: shows.ticket,
        outcome: Outcome::Shows(Ok(vec![show(1, "Show A")])),
    });

    let _ = controller.complete(Completion {
        ticket: stale.ticket,
        outcome: Outcome::Episodes(ShowId::new(1), Ok(episodes(&["Pilot"]))),
    });

    assert!(controller.state().cache.is_empty());
    assert_eq!(titles(&controller.screen()), vec!["Show A"]);
    assert!(matches!(
        controller.select_show(Some(ShowId::new(1))),
        Effect::Fetch(_)
    ));
}

#[test]
fn rejected_inputs_are_reported() {
    let mut controller = loaded_catalog_controller();
    assert_eq!(
        controller.handle(&InputEvent::Pick(PickTarget::Number(99))),
        Err(Rejected::NoSuchOption)
    );

    let _ = controller.select_show(Some(ShowId::new(1)));
    assert_eq!(
        controller.handle(&InputEvent::Search("pilot".to_string())),
        Err(Rejected::Inactive)
    );
}
