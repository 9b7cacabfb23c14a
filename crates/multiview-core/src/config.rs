use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where and how often the channel list is polled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the channel-list service; `/channels` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Fixed poll cadence.  Failed polls are retried on the next tick only.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Polling can be switched off entirely for an offline session.
    #[serde(default = "default_feed_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Maximum simultaneous stream panes.
    #[serde(default = "default_max_streams")]
    pub max_streams: usize,
    #[serde(default = "default_show_key_bar")]
    pub show_key_bar: bool,
}

impl FeedConfig {
    /// The full channel-list endpoint URL.
    pub fn channels_url(&self) -> String {
        format!("{}/channels", self.base_url.trim_end_matches('/'))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_secs: default_poll_interval_secs(),
            enabled: default_feed_enabled(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_streams: default_max_streams(),
            show_key_bar: default_show_key_bar(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8790".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_feed_enabled() -> bool {
    true
}

fn default_max_streams() -> usize {
    4
}

fn default_show_key_bar() -> bool {
    true
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.feed.enabled);
        assert_eq!(config.feed.poll_interval_secs, 30);
        assert_eq!(config.ui.max_streams, 4);
        assert_eq!(
            config.feed.channels_url(),
            "http://127.0.0.1:8790/channels"
        );
    }

    #[test]
    fn channels_url_tolerates_trailing_slash() {
        let feed = FeedConfig {
            base_url: "https://fv.example/api/".to_string(),
            ..FeedConfig::default()
        };
        assert_eq!(feed.channels_url(), "https://fv.example/api/channels");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[feed]\npoll_interval_secs = 5\n").unwrap();
        assert_eq!(config.feed.poll_interval_secs, 5);
        assert!(config.feed.enabled);
        assert_eq!(config.ui.max_streams, 4);
    }
}
