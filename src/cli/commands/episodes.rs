use super::{OneShot, run_one_shot};
use crate::config::Config;
use crate::domain::ShowId;
use crate::services::StartMode;

pub async fn cmd_episodes(config: &Config, show: ShowId, args: OneShot) -> anyhow::Result<()> {
    run_one_shot(config, StartMode::Show(show), args).await
}
