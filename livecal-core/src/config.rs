//! livecal configuration.
//!
//! Read from `~/.config/livecal/config.toml`, then overridden by `LIVECAL_*`
//! environment variables. CLI flags override both.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DURATION_MINUTES, DEFAULT_MAX_EVENTS, DEFAULT_POLL_INTERVAL_SECS, EXTEND_MINUTES,
};
use crate::end_time::EndTimePolicy;
use crate::error::{LiveCalError, LiveCalResult};
use crate::remote::provider::Provider;
use crate::remote::{Remote, RemoteConfig};

fn default_duration_minutes() -> i64 {
    DEFAULT_DURATION_MINUTES
}

fn default_extend_minutes() -> i64 {
    EXTEND_MINUTES
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_max_events() -> usize {
    DEFAULT_MAX_EVENTS
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LivecalConfig {
    /// Calendar provider, resolved to `livecal-provider-<name>` on PATH.
    pub provider: Option<String>,

    /// Forwarded verbatim to the provider with every request.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Score snapshot written by the scraper.
    pub feed: Option<PathBuf>,

    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: i64,

    #[serde(default = "default_extend_minutes")]
    pub extend_minutes: i64,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Only the first N tournaments are processed each cycle when set.
    pub tournament_limit: Option<usize>,

    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

impl LivecalConfig {
    pub fn config_path() -> LiveCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| LiveCalError::Config("Could not determine config directory".into()))?
            .join("livecal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, writing a commented default first if missing.
    pub fn load() -> LiveCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::build(
            Config::builder()
                .add_source(File::from(config_path).required(false))
                .add_source(Environment::with_prefix("LIVECAL")),
        )
    }

    #[cfg(test)]
    fn from_toml(contents: &str) -> LiveCalResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(contents, ::config::FileFormat::Toml)))
    }

    fn build(
        builder: ConfigBuilder<DefaultState>,
    ) -> LiveCalResult<Self> {
        builder
            .build()
            .map_err(|e| LiveCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| LiveCalError::Config(e.to_string()))
    }

    pub fn remote(&self) -> LiveCalResult<Remote> {
        let provider = self.provider.as_deref().ok_or_else(|| {
            LiveCalError::Config("No provider configured. Set `provider` in config.toml".into())
        })?;
        Ok(Remote::new(Provider::from_name(provider), self.remote.clone()))
    }

    pub fn policy(&self) -> LiveCalResult<EndTimePolicy> {
        EndTimePolicy::new(self.default_duration_minutes, self.extend_minutes)
    }

    /// The feed path with `~` expanded.
    pub fn feed_path(&self) -> Option<PathBuf> {
        self.feed
            .as_ref()
            .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> LiveCalResult<()> {
        let contents = format!(
            "\
# livecal configuration

# Calendar provider binary (livecal-provider-<name>):
# provider = \"google\"

# Score snapshot produced by the scraper:
# feed = \"~/livecal/scores.json\"

# default_duration_minutes = {DEFAULT_DURATION_MINUTES}
# extend_minutes = {EXTEND_MINUTES}
# poll_interval_secs = {DEFAULT_POLL_INTERVAL_SECS}
# max_events = {DEFAULT_MAX_EVENTS}
# tournament_limit = 10

# Provider-specific settings:
# [remote]
# google_account = \"you@example.com\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LiveCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| LiveCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn defaults_apply_to_empty_file() {
        let config = LivecalConfig::from_toml("").unwrap();
        assert_eq!(config.default_duration_minutes, 90);
        assert_eq!(config.extend_minutes, 20);
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.max_events, 100);
        assert!(config.tournament_limit.is_none());
        assert!(config.provider.is_none());
    }

    #[test]
    fn commented_default_file_parses() {
        let dir = std::env::temp_dir().join(format!("livecal-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        LivecalConfig::create_default_config(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        let config = LivecalConfig::from_toml(&contents).unwrap();
        assert_eq!(config.default_duration_minutes, 90);
    }

    #[test]
    fn overrides_and_remote_table() {
        let config = LivecalConfig::from_toml(
            r#"
provider = "google"
extend_minutes = 15
tournament_limit = 3

[remote]
google_account = "me@example.com"
"#,
        )
        .unwrap();

        assert_eq!(config.policy().unwrap().extend_by, TimeDelta::minutes(15));
        assert_eq!(config.tournament_limit, Some(3));
        let remote = config.remote().unwrap();
        assert_eq!(remote.provider.name(), "google");
        assert_eq!(
            remote.config.0.get("google_account").and_then(|v| v.as_str()),
            Some("me@example.com")
        );
    }

    #[test]
    fn missing_provider_is_config_error() {
        let config = LivecalConfig::from_toml("").unwrap();
        assert!(matches!(config.remote(), Err(LiveCalError::Config(_))));
    }

    #[test]
    fn negative_duration_is_config_error() {
        let config = LivecalConfig::from_toml("default_duration_minutes = -30").unwrap();
        assert!(matches!(config.policy(), Err(LiveCalError::Config(_))));
    }

    #[test]
    fn overflowing_extension_is_config_error() {
        let config = LivecalConfig::from_toml("extend_minutes = 9223372036854775807").unwrap();
        assert!(matches!(config.policy(), Err(LiveCalError::Config(_))));
    }
}
