// =============================================================================
// Runtime Configuration — service settings loaded at startup
// =============================================================================
//
// Loaded from `vantage_config.json` when present. Every field carries a serde
// default so a partial (or empty) file is always valid. A handful of settings
// can be overridden from the environment; the API token is environment-only
// and never lives in this struct.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::CHART_WINDOW;
use crate::batch::DEFAULT_BATCH_CONCURRENCY;
use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};
use crate::market_data::yahoo::DEFAULT_BASE_URL;
use crate::types::Interval;

pub const CONFIG_FILE: &str = "vantage_config.json";

pub const ENV_BIND_ADDR: &str = "VANTAGE_BIND_ADDR";
pub const ENV_PROVIDER_URL: &str = "VANTAGE_PROVIDER_URL";
pub const ENV_BATCH_CONCURRENCY: &str = "VANTAGE_BATCH_CONCURRENCY";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_provider_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_batch_concurrency() -> usize {
    DEFAULT_BATCH_CONCURRENCY
}

fn default_chart_window() -> usize {
    CHART_WINDOW
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

fn default_cache_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

// =============================================================================
// RuntimeConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Socket address the HTTP API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Interval used when a request does not name one.
    #[serde(default)]
    pub default_interval: Interval,

    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: String,

    /// Per-request timeout against the market-data provider.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum analyses in flight during a batch.
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,

    /// Trailing bars exposed in each indicator chart.
    #[serde(default = "default_chart_window")]
    pub chart_window: usize,

    /// Idle lifetime of a cached batch session.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            default_interval: Interval::default(),
            provider_base_url: default_provider_base_url(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            batch_concurrency: default_batch_concurrency(),
            chart_window: default_chart_window(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            default_interval = %config.default_interval,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Apply `VANTAGE_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup(ENV_BIND_ADDR).filter(|v| !v.trim().is_empty()) {
            self.bind_addr = addr.trim().to_string();
        }
        if let Some(url) = lookup(ENV_PROVIDER_URL).filter(|v| !v.trim().is_empty()) {
            self.provider_base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_BATCH_CONCURRENCY) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.batch_concurrency = n,
                _ => warn!(key = ENV_BATCH_CONCURRENCY, value = %raw, "ignoring invalid batch concurrency override"),
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:3001");
        assert_eq!(cfg.default_interval, Interval::Day);
        assert_eq!(cfg.provider_base_url, "https://query1.finance.yahoo.com");
        assert_eq!(cfg.fetch_timeout_secs, 10);
        assert_eq!(cfg.batch_concurrency, 10);
        assert_eq!(cfg.chart_window, 100);
        assert_eq!(cfg.cache_ttl_secs, 3600);
        assert_eq!(cfg.cache_max_entries, 512);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.default_interval, Interval::Day);
        assert_eq!(cfg.batch_concurrency, 10);
        assert_eq!(cfg.cache_max_entries, 512);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "default_interval": "1wk", "chart_window": 60 }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.default_interval, Interval::Week);
        assert_eq!(cfg.chart_window, 60);
        assert_eq!(cfg.fetch_timeout_secs, 10);
    }

    #[test]
    fn unknown_interval_is_rejected() {
        assert!(serde_json::from_str::<RuntimeConfig>(r#"{ "default_interval": "5m" }"#).is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = RuntimeConfig::default();
        cfg.apply_overrides(|key| match key {
            ENV_BIND_ADDR => Some("127.0.0.1:9000".into()),
            ENV_PROVIDER_URL => Some(" http://localhost:8080 ".into()),
            ENV_BATCH_CONCURRENCY => Some("4".into()),
            _ => None,
        });
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.provider_base_url, "http://localhost:8080");
        assert_eq!(cfg.batch_concurrency, 4);
    }

    #[test]
    fn invalid_concurrency_override_is_ignored() {
        let mut cfg = RuntimeConfig::default();
        cfg.apply_overrides(|key| (key == ENV_BATCH_CONCURRENCY).then(|| "zero".to_string()));
        assert_eq!(cfg.batch_concurrency, 10);
        cfg.apply_overrides(|key| (key == ENV_BATCH_CONCURRENCY).then(|| "0".to_string()));
        assert_eq!(cfg.batch_concurrency, 10);
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(RuntimeConfig::load("/nonexistent/vantage_config.json").is_err());
    }
}
