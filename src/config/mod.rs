use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use tracing::debug;

pub mod env;
pub mod validation;

use env::{EnvParser, EnvVars};
use validation::ConfigValidator;

/// Public hosted lyrics service
pub const HOSTED_API_URL: &str = "https://lyricsfinder-api-uper.onrender.com";

/// Lyrics service started locally for development
pub const LOCAL_API_URL: &str = "http://127.0.0.1:10000";

fn default_user_agent() -> String {
    format!("lyricsfinder/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base address of the lyrics service
    pub api_base_url: String,

    /// User-Agent header sent with every lookup
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: HOSTED_API_URL.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Pick up a .env file during development
        dotenvy::dotenv().ok();

        let config_file = if let Some(path) = config_path {
            PathBuf::from(path)
        } else {
            Self::default_config_path()?
        };

        let mut config = Self::load_from_path(&config_file)?;

        // Environment variables take priority over the file, but are never persisted
        config.load_from_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Defaults overlaid with the config file. Writes the file on first run.
    fn load_from_path(config_file: &Path) -> Result<Self> {
        if config_file.exists() {
            debug!("Loading configuration from {}", config_file.display());
            let content = fs::read_to_string(config_file)?;
            return Ok(toml::from_str(&content)?);
        }

        let config = Self::default();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        config.save(config_file)?;

        Ok(config)
    }

    fn load_from_env(&mut self) -> crate::error::Result<()> {
        if let Some(url) = EnvParser::parse_string(EnvVars::API_BASE_URL, Some(|url| {
            ConfigValidator::validate_http_url(url, "API base")
        }))? {
            self.api_base_url = url;
        }

        if let Some(agent) = EnvParser::parse_string(EnvVars::USER_AGENT, None)? {
            self.user_agent = agent;
        }

        Ok(())
    }

    /// Apply command-line overrides, which win over file and environment
    pub fn with_overrides(mut self, base_url: Option<&str>, local: bool) -> crate::error::Result<Self> {
        if local {
            self.api_base_url = LOCAL_API_URL.to_string();
        }

        if let Some(url) = base_url {
            self.api_base_url = url.trim().to_string();
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        ConfigValidator::validate_http_url(&self.api_base_url, "API base")?;
        ConfigValidator::validate_header_value(&self.user_agent, "user agent")?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "lyricsfinder", "lyricsfinder")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }

    pub fn create_lyrics_api(&self) -> crate::error::Result<crate::core::api::HttpLyricsApi> {
        crate::core::api::HttpLyricsApi::new(&self.api_base_url, &self.user_agent)
    }
}
