//! Environment-driven planner configuration.
//!
//! # Responsibility
//! - Resolve catalog source, tip credential and tip model settings.
//! - Keep lookups injectable so tests never touch the process environment.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - A missing tip credential is a valid configuration, not an error.

use crate::catalog::CatalogSource;
use std::time::Duration;

pub const ENV_CATALOG: &str = "SMARTTRIP_CATALOG";
pub const ENV_CATALOG_TIMEOUT_SECS: &str = "SMARTTRIP_CATALOG_TIMEOUT_SECS";
pub const ENV_API_KEY: &str = "SMARTTRIP_API_KEY";
/// Generic credential name honoured when the prefixed one is unset.
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
pub const ENV_TIP_MODEL: &str = "SMARTTRIP_TIP_MODEL";
pub const ENV_TIP_ENDPOINT: &str = "SMARTTRIP_TIP_ENDPOINT";
pub const ENV_TIP_TIMEOUT_SECS: &str = "SMARTTRIP_TIP_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "SMARTTRIP_LOG_LEVEL";

pub const DEFAULT_CATALOG: &str = "./data.json";
pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_TIP_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TIP_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIP_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_TIP_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIP_MAX_OUTPUT_TOKENS: u32 = 200;

/// Settings for the generative tip provider.
#[derive(Debug, Clone, PartialEq)]
pub struct TipConfig {
    /// `None` disables tip generation entirely.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_TIP_MODEL.to_string(),
            endpoint: DEFAULT_TIP_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIP_TIMEOUT_SECS),
            temperature: DEFAULT_TIP_TEMPERATURE,
            max_output_tokens: DEFAULT_TIP_MAX_OUTPUT_TOKENS,
        }
    }
}

impl TipConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Top-level planner configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub catalog_source: CatalogSource,
    /// HTTP timeout for URL catalog sources.
    pub catalog_timeout: Duration,
    pub tip: TipConfig,
    /// Explicit log level override; `None` means build-mode default.
    pub log_level: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            catalog_source: CatalogSource::parse(DEFAULT_CATALOG),
            catalog_timeout: Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS),
            tip: TipConfig::default(),
            log_level: None,
        }
    }
}

impl PlannerConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, one key at a time.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| non_blank(lookup(key));
        let defaults = TipConfig::default();

        let catalog_source = value(ENV_CATALOG)
            .map(|raw| CatalogSource::parse(raw.as_str()))
            .unwrap_or_else(|| CatalogSource::parse(DEFAULT_CATALOG));
        let seconds = |key: &str| {
            value(key)
                .and_then(|raw| raw.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
        };
        let catalog_timeout = seconds(ENV_CATALOG_TIMEOUT_SECS)
            .unwrap_or(Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS));
        let timeout = seconds(ENV_TIP_TIMEOUT_SECS).unwrap_or(defaults.timeout);

        Self {
            catalog_source,
            catalog_timeout,
            tip: TipConfig {
                api_key: value(ENV_API_KEY).or_else(|| value(ENV_API_KEY_FALLBACK)),
                model: value(ENV_TIP_MODEL).unwrap_or(defaults.model),
                endpoint: value(ENV_TIP_ENDPOINT)
                    .map(|raw| raw.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.endpoint),
                timeout,
                ..defaults
            },
            log_level: value(ENV_LOG_LEVEL),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
