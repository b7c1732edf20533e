pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod domain;
pub mod models;
pub mod services;
pub mod state;

use cli::{Cli, Commands, OneShot};
pub use config::Config;
use config::GeneralConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;
    init_tracing(&config.general);

    match config.source.as_deref() {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    debug!(base_url = %config.api.base_url, "Starting");

    match cli.command.unwrap_or(Commands::Browse { show: None }) {
        Commands::Browse { show } => cli::cmd_browse(&config, show).await,

        Commands::Shows { search, pick, json } => {
            cli::cmd_shows(&config, OneShot { search, pick, json }).await
        }

        Commands::Episodes {
            show,
            search,
            pick,
            json,
        } => cli::cmd_episodes(&config, show, OneShot { search, pick, json }).await,

        Commands::Init => cli::cmd_init(),
    }
}

/// Logs go to stderr; stdout belongs to the rendered screen.
fn init_tracing(general: &GeneralConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if general.log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
