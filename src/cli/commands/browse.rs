use std::io::Write as _;
use std::sync::Arc;

use anyhow::Context;
use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::build_source;
use crate::cli::screen::{HELP, TerminalSurface};
use crate::clients::CatalogSource;
use crate::config::Config;
use crate::domain::ShowId;
use crate::domain::events::InputEvent;
use crate::services::browser::{Completion, execute};
use crate::services::{Controller, ControllerOptions, Effect, Screen, StartMode};

type Pending = FuturesUnordered<BoxFuture<'static, Completion>>;

/// Interactive session. Stdin lines and fetch completions are handled one at a
/// time on this task; several fetches may be in flight at once.
pub async fn cmd_browse(config: &Config, show: Option<ShowId>) -> anyhow::Result<()> {
    let source = build_source(config)?;
    let start = show.map_or(StartMode::Catalog, StartMode::Show);
    let mut controller = Controller::new(ControllerOptions::from_display(&config.display, start));
    let surface = TerminalSurface::new(config.display.summary_width);

    let mut pending = Pending::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let effect = controller.start();
    schedule(&mut pending, &source, effect);
    refresh(&surface, &controller.screen());
    println!("Type :help for commands.");
    prompt()?;

    loop {
        tokio::select! {
            Some(completion) = pending.next(), if !pending.is_empty() => {
                let effect = controller.complete(completion);
                schedule(&mut pending, &source, effect);
                refresh(&surface, &controller.screen());
                prompt()?;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };

                match InputEvent::parse(&line) {
                    Ok(InputEvent::Quit) => break,
                    Ok(InputEvent::Help) => print!("{HELP}"),
                    Ok(InputEvent::Options) => match controller.screen() {
                        Screen::Listing { options, .. } => {
                            print!("{}", surface.format_options(&options));
                        }
                        Screen::Message { .. } => println!("Nothing to pick from yet."),
                    },
                    Ok(event) => match controller.handle(&event) {
                        Ok(effect) => {
                            schedule(&mut pending, &source, effect);
                            refresh(&surface, &controller.screen());
                        }
                        Err(rejected) => println!("⚠ {rejected}"),
                    },
                    Err(message) => println!("⚠ {message}"),
                }
                prompt()?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    if !pending.is_empty() {
        debug!(count = pending.len(), "Leaving with fetches still in flight");
    }

    Ok(())
}

fn schedule(pending: &mut Pending, source: &Arc<dyn CatalogSource>, effect: Effect) {
    if let Effect::Fetch(request) = effect {
        pending.push(Box::pin(execute(Arc::clone(source), request)));
    }
}

fn refresh(surface: &TerminalSurface, screen: &Screen) {
    println!();
    surface.print(screen);
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    std::io::stdout().flush().context("Failed to flush stdout")
}
