use serde::Deserialize;
use std::fs;
use tracing::debug;

use luma_core::common::error::{Result, ScraperError};

use crate::common::constants::DEFAULT_USER_AGENT;

/// Tunables loaded from `config.toml`, with defaults suited to polite
/// scraping of a public site.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Delay between consecutive event-page fetches from one listing.
    pub request_delay_ms: u64,
    pub fetch_timeout_secs: u64,
    /// Hard cap on "load more" triggers per listing page.
    pub scroll_max_attempts: u32,
    pub scroll_attempt_timeout_secs: u64,
    /// Worker pool size for profile-page contact enrichment.
    pub enrich_concurrency: usize,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
            fetch_timeout_secs: 30,
            scroll_max_attempts: 10,
            scroll_attempt_timeout_secs: 10,
            enrich_concurrency: 4,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn load(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!("failed to read config file '{path}': {e}"))
        })?;
        toml::from_str(&raw).map_err(|e| {
            ScraperError::Config(format!("failed to parse config file '{path}': {e}"))
        })
    }

    /// Falls back to defaults when no `config.toml` is present.
    pub fn load_or_default() -> Self {
        match Self::load("config.toml") {
            Ok(config) => config,
            Err(err) => {
                debug!(%err, "using default configuration");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ScraperConfig::default();
        assert_eq!(config.request_delay_ms, 1000);
        assert_eq!(config.scroll_max_attempts, 10);
        assert!(config.enrich_concurrency > 0);
    }

    #[test]
    fn partial_config_files_keep_defaults_for_the_rest() {
        let config: ScraperConfig = toml::from_str("request_delay_ms = 250").unwrap();
        assert_eq!(config.request_delay_ms, 250);
        assert_eq!(config.fetch_timeout_secs, 30);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
