// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sorteiaki_core::{
    resolve_config_path, ConfigPathScope, ENV_SORTEIAKI_ACCESS_TOKEN, ENV_SORTEIAKI_CONFIG,
    ENV_SORTEIAKI_GRAPH_BASE_URL,
};
use sorteiaki_engine::DEFAULT_COUNTDOWN_TICKS;
use sorteiaki_model::{EngagementType, RaffleSettings};
use sorteiaki_provider::{AccessToken, GraphConfig, RetryPolicy};

#[derive(Debug)]
pub struct ConfigError {
    pub path: Option<PathBuf>,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "config {}: {}", path.display(), self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Defaults for draws; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RaffleSection {
    pub winners_count: Option<u32>,
    pub engagement_type: Option<EngagementType>,
    pub min_mentions: Option<u32>,
    pub required_keyword: Option<String>,
    pub allow_duplicates: Option<bool>,
    pub countdown_ticks: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    pub graph_base_url: Option<String>,
    pub access_token: Option<String>,
    pub timeout_ms: Option<u64>,
    pub max_attempts: Option<usize>,
    pub base_backoff_ms: Option<u64>,
    pub comment_page_limit: Option<u32>,
    pub media_page_limit: Option<u32>,
    pub max_pages: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub raffle: RaffleSection,
    #[serde(default)]
    pub provider: ProviderSection,
}

impl FileConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError {
            path: None,
            message: e.to_string(),
        })
    }

    /// Settings from the `[raffle]` section layered over the defaults.
    #[must_use]
    pub fn raffle_settings(&self) -> RaffleSettings {
        let defaults = RaffleSettings::default();
        let section = &self.raffle;
        RaffleSettings {
            winners_count: section.winners_count.unwrap_or(defaults.winners_count),
            engagement_type: section.engagement_type.unwrap_or(defaults.engagement_type),
            min_mentions: section.min_mentions.unwrap_or(defaults.min_mentions),
            required_keyword: section
                .required_keyword
                .clone()
                .unwrap_or(defaults.required_keyword),
            allow_duplicates: section.allow_duplicates.unwrap_or(defaults.allow_duplicates),
        }
    }

    #[must_use]
    pub fn countdown_ticks(&self) -> u8 {
        self.raffle.countdown_ticks.unwrap_or(DEFAULT_COUNTDOWN_TICKS)
    }

    #[must_use]
    pub fn graph_config(&self) -> GraphConfig {
        let defaults = GraphConfig::default();
        let section = &self.provider;
        GraphConfig {
            base_url: section
                .graph_base_url
                .clone()
                .unwrap_or(defaults.base_url),
            timeout: section
                .timeout_ms
                .map_or(defaults.timeout, Duration::from_millis),
            retry: RetryPolicy {
                max_attempts: section
                    .max_attempts
                    .unwrap_or(defaults.retry.max_attempts)
                    .max(1),
                base_backoff_ms: section
                    .base_backoff_ms
                    .unwrap_or(defaults.retry.base_backoff_ms),
            },
            media_page_limit: section
                .media_page_limit
                .unwrap_or(defaults.media_page_limit),
            comment_page_limit: section
                .comment_page_limit
                .unwrap_or(defaults.comment_page_limit),
            max_pages: section.max_pages.unwrap_or(defaults.max_pages).max(1),
        }
    }

    #[must_use]
    pub fn access_token(&self) -> Option<AccessToken> {
        self.provider.access_token.as_deref().and_then(AccessToken::new)
    }

    fn apply_env(&mut self) {
        if let Some(token) = non_empty_env(ENV_SORTEIAKI_ACCESS_TOKEN) {
            self.provider.access_token = Some(token);
        }
        if let Some(base_url) = non_empty_env(ENV_SORTEIAKI_GRAPH_BASE_URL) {
            self.provider.graph_base_url = Some(base_url);
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    FileConfig::from_toml_str(&text).map_err(|e| ConfigError {
        path: Some(path.to_path_buf()),
        message: e.message,
    })
}

/// Loads the first config file found, then applies environment overrides.
///
/// An explicit `SORTEIAKI_CONFIG` must exist; the workspace and user files
/// are optional.
pub fn load_config() -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
    let explicit = non_empty_env(ENV_SORTEIAKI_CONFIG).is_some();
    let candidates = [
        resolve_config_path(ConfigPathScope::Workspace),
        resolve_config_path(ConfigPathScope::User),
    ];
    let found = candidates.into_iter().find(|p| p.is_file());
    let mut config = match &found {
        Some(path) => read_file(path)?,
        None if explicit => {
            return Err(ConfigError {
                path: Some(resolve_config_path(ConfigPathScope::Workspace)),
                message: "file does not exist".to_string(),
            })
        }
        None => FileConfig::default(),
    };
    config.apply_env();
    Ok((config, found))
}

#[cfg(test)]
mod tests {
    use super::FileConfig;
    use sorteiaki_model::EngagementType;
    use std::time::Duration;

    #[test]
    fn sections_layer_over_defaults() {
        let config = FileConfig::from_toml_str(
            r#"
            [raffle]
            winners_count = 3
            engagement_type = "LIKES"
            countdown_ticks = 0

            [provider]
            timeout_ms = 2500
            max_attempts = 0
            max_pages = 50
            "#,
        )
        .expect("parse");
        let settings = config.raffle_settings();
        assert_eq!(settings.winners_count, 3);
        assert_eq!(settings.engagement_type, EngagementType::Likes);
        assert_eq!(settings.min_mentions, 0);
        assert_eq!(config.countdown_ticks(), 0);
        let graph = config.graph_config();
        assert_eq!(graph.timeout, Duration::from_millis(2500));
        assert_eq!(graph.retry.max_attempts, 1);
        assert_eq!(graph.media_page_limit, 30);
        assert_eq!(graph.max_pages, 50);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = FileConfig::from_toml_str("[raffle]\nwinner = 2\n").expect_err("unknown");
        assert!(err.message.contains("winner"));
        assert!(FileConfig::from_toml_str("[storage]\n").is_err());
    }

    #[test]
    fn empty_file_is_default() {
        let config = FileConfig::from_toml_str("").expect("parse");
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.countdown_ticks(), 3);
        assert!(config.access_token().is_none());
    }
}
