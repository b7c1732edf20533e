use super::{OneShot, run_one_shot};
use crate::config::Config;
use crate::services::StartMode;

pub async fn cmd_shows(config: &Config, args: OneShot) -> anyhow::Result<()> {
    run_one_shot(config, StartMode::Catalog, args).await
}
