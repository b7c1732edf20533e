use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{PLACEHOLDER_IMAGE, TVMAZE_API, limits};
use crate::services::render::StatusStyle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub api: ApiConfig,

    pub display: DisplayConfig,

    /// File the config was read from, `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_level: String,

    /// "pretty" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,

    /// Request timeout in seconds (default: 30). 0 disables the timeout.
    pub request_timeout_seconds: u64,

    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: TVMAZE_API.to_string(),
            request_timeout_seconds: 30,
            user_agent: format!("tvbrowse/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub status_style: StatusStyle,

    /// Shown in place of a card image when the API supplies none.
    pub placeholder_image: String,

    /// Sort the show catalog by name, ignoring case.
    pub sort_shows: bool,

    /// Open the first show of the catalog as soon as it has loaded.
    pub auto_select_first_show: bool,

    /// Column width used when rendering summaries in the terminal.
    pub summary_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            status_style: StatusStyle::default(),
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            sort_shows: true,
            auto_select_first_show: false,
            summary_width: limits::DEFAULT_SUMMARY_WIDTH,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tvbrowse").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".tvbrowse").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.api.base_url))?;

        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("API base URL must use http or https, got '{}'", base.scheme());
        }

        if self.display.summary_width < limits::MIN_SUMMARY_WIDTH {
            anyhow::bail!(
                "display.summary_width must be at least {}",
                limits::MIN_SUMMARY_WIDTH
            );
        }

        if !matches!(self.general.log_format.as_str(), "pretty" | "json") {
            anyhow::bail!(
                "general.log_format must be \"pretty\" or \"json\", got '{}'",
                self.general.log_format
            );
        }

        Ok(())
    }
}
