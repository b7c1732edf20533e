mod browse;
mod episodes;
mod init;
mod shows;

pub use browse::cmd_browse;
pub use episodes::cmd_episodes;
pub use init::cmd_init;
pub use shows::cmd_shows;

use std::sync::Arc;

use anyhow::Context;

use super::screen::TerminalSurface;
use crate::clients::{CatalogSource, TvMazeClient};
use crate::config::Config;
use crate::domain::events::PickTarget;
use crate::services::{Browser, ControllerOptions, Screen, StartMode};

fn build_source(config: &Config) -> anyhow::Result<Arc<dyn CatalogSource>> {
    let client = TvMazeClient::new(&config.api)?;
    Ok(Arc::new(client))
}

/// Arguments shared by the one-shot listing commands.
pub struct OneShot {
    pub search: Option<String>,
    pub pick: Option<String>,
    pub json: bool,
}

/// Loads one listing, applies search then pick, and prints the result.
async fn run_one_shot(config: &Config, start: StartMode, args: OneShot) -> anyhow::Result<()> {
    let pick = args
        .pick
        .as_deref()
        .map(str::parse::<PickTarget>)
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut options = ControllerOptions::from_display(&config.display, start);
    options.auto_select_first_show = false;

    let mut browser = Browser::new(build_source(config)?, options);
    browser.start().await;

    if let Some(search) = args.search.as_deref() {
        if let Err(rejected) = browser.controller_mut().search(search) {
            eprintln!("⚠ {rejected}");
        }
    }
    if let Some(target) = pick {
        if let Err(rejected) = browser.controller_mut().pick(target) {
            eprintln!(
                "⚠ {rejected} '{}'",
                args.pick.as_deref().unwrap_or_default()
            );
        }
    }

    let screen = browser.controller().screen();
    print_screen(config, &screen, args.json)?;

    if screen.is_error() {
        anyhow::bail!("Request to {} failed", config.api.base_url);
    }

    Ok(())
}

fn print_screen(config: &Config, screen: &Screen, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(screen).context("Failed to serialize screen")?;
        println!("{out}");
    } else {
        TerminalSurface::new(config.display.summary_width).print(screen);
    }
    Ok(())
}
