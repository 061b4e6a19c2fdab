//! AI travel tips per attraction.
//!
//! # Responsibility
//! - Build the tip prompt from attraction metadata.
//! - Define the provider seam and the placeholder policy around it.
//!
//! # Invariants
//! - Tip failures never propagate to the caller; placeholders are returned.
//! - Without a configured credential, no provider call is attempted.
//!
//! # See also
//! - `service::planner_service` for stale-result discarding.

mod gemini;

pub use gemini::GeminiTipProvider;

use crate::config::TipConfig;
use crate::model::attraction::Attraction;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

/// Shown when no tip credential is configured.
pub const TIP_NOT_CONFIGURED: &str = "AI 助手尚未配置。";
/// Shown when the provider call fails.
pub const TIP_UNAVAILABLE: &str = "目前無法聯繫 AI 助手...";
/// Shown when the provider answers with no text.
pub const TIP_EMPTY: &str = "無法生成建議。";

/// Result type for tip provider calls.
pub type TipResult<T> = Result<T, TipError>;

/// Tip provider failures.
#[derive(Debug)]
pub enum TipError {
    /// No credential is available for the provider.
    NotConfigured,
    Http(reqwest::Error),
    HttpStatus { status: u16, body: String },
    InvalidResponse(String),
}

impl Display for TipError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "tip provider credential is not configured"),
            Self::Http(err) => write!(f, "tip request failed: {err}"),
            Self::HttpStatus { status, body } => {
                write!(f, "tip service returned HTTP {status}: {body}")
            }
            Self::InvalidResponse(message) => write!(f, "invalid tip response: {message}"),
        }
    }
}

impl Error for TipError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::NotConfigured | Self::HttpStatus { .. } | Self::InvalidResponse(_) => None,
        }
    }
}

impl From<reqwest::Error> for TipError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Text-generation backend used for tips.
pub trait TipProvider: Send + Sync {
    /// Stable provider id used in logs.
    fn provider_id(&self) -> &str;

    /// Generates free text for `prompt`.
    fn generate(&self, prompt: &str) -> TipResult<String>;
}

/// Builds the tip prompt for one attraction.
pub fn build_prompt(attraction: &Attraction) -> String {
    format!(
        "你是專業的旅遊規劃師。請根據以下景點資訊，提供一條 50 字以內的簡短、幽默且實用的旅遊建議。景點名稱：{}，類別：{}，介紹：{}。",
        attraction.name,
        attraction.category.label(),
        attraction.description
    )
}

/// Tip lookup with placeholder fallbacks.
#[derive(Clone, Default)]
pub struct TipService {
    provider: Option<Arc<dyn TipProvider>>,
}

impl TipService {
    /// Builds the Gemini-backed service, or an unconfigured one when the
    /// credential is missing or the HTTP client cannot be built.
    pub fn from_config(config: &TipConfig) -> Self {
        if !config.is_configured() {
            info!("event=tip_service_init module=tip status=ok configured=false");
            return Self::unconfigured();
        }
        match GeminiTipProvider::new(config) {
            Ok(provider) => {
                info!(
                    "event=tip_service_init module=tip status=ok configured=true model={}",
                    config.model
                );
                Self::with_provider(Arc::new(provider))
            }
            Err(err) => {
                warn!(
                    "event=tip_service_init module=tip status=error configured=false error={}",
                    err
                );
                Self::unconfigured()
            }
        }
    }

    pub fn with_provider(provider: Arc<dyn TipProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Returns a tip for `attraction`, or a placeholder.
    ///
    /// # Side effects
    /// - Performs one provider call when configured.
    /// - Emits `tip_fetch` logging events; prompt text is never logged.
    pub fn tip_for(&self, attraction: &Attraction) -> String {
        let Some(provider) = self.provider.as_ref() else {
            return TIP_NOT_CONFIGURED.to_string();
        };

        let started_at = Instant::now();
        match provider.generate(build_prompt(attraction).as_str()) {
            Ok(text) => {
                let text = text.trim();
                info!(
                    "event=tip_fetch module=tip status=ok provider={} attraction_id={} duration_ms={} chars={}",
                    provider.provider_id(),
                    attraction.id,
                    started_at.elapsed().as_millis(),
                    text.chars().count()
                );
                if text.is_empty() {
                    TIP_EMPTY.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(err) => {
                warn!(
                    "event=tip_fetch module=tip status=error provider={} attraction_id={} duration_ms={} error={}",
                    provider.provider_id(),
                    attraction.id,
                    started_at.elapsed().as_millis(),
                    err
                );
                TIP_UNAVAILABLE.to_string()
            }
        }
    }
}
