//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Default backend endpoint (the coach service's local dev address).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// Base URL of the coach backend.
    pub base_url: String,
    /// Total per-request timeout. `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
    /// Attempts per `ask` call; 1 means a single attempt, no retry.
    pub ask_attempts: u32,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            ask_attempts: 1,
        }
    }
}

impl CoachConfig {
    /// Build configuration from environment variables.
    ///
    /// - `COACH_API_URL` — backend base URL
    /// - `COACH_REQUEST_TIMEOUT_SECS` — total per-request timeout in seconds
    /// - `COACH_ASK_ATTEMPTS` — attempts per chat call (clamped to ≥ 1)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("COACH_API_URL") {
            config.base_url =
                normalize_base_url(&url).ok_or_else(|| ConfigError::InvalidValue {
                    key: "COACH_API_URL".to_string(),
                    message: "must not be empty".to_string(),
                })?;
        }

        if let Ok(raw) = std::env::var("COACH_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "COACH_REQUEST_TIMEOUT_SECS".to_string(),
                message: format!("expected whole seconds, got {raw:?}"),
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Ok(raw) = std::env::var("COACH_ASK_ATTEMPTS") {
            let attempts: u32 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "COACH_ASK_ATTEMPTS".to_string(),
                message: format!("expected a positive integer, got {raw:?}"),
            })?;
            config.ask_attempts = attempts.max(1);
        }

        Ok(config)
    }
}

/// Trim whitespace and any trailing slash; `None` if nothing is left.
fn normalize_base_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
