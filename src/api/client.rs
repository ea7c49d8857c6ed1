//! HTTP client for the coach backend.
//!
//! One request per domain call, a single attempt unless configured otherwise,
//! and a normalized outcome on every path: transport faults and unexpected
//! body shapes collapse into `ApiError` at this boundary and never propagate
//! rawer than that.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::CoachConfig;
use crate::error::{ApiError, ConfigError};
use crate::profile::UserProfile;

use super::backend::CoachBackend;
use super::observer::{RequestObserver, RequestOutcome, TracingObserver};
use super::types::{
    self, AckResponse, AskRequest, GoalRequest, LogWorkoutResponse, MealPlanRequest,
    MealPlanResponse, ProgressEntry, WorkoutLog, WorkoutRequest, WorkoutResponse,
};

/// Base delay between ask retries; a random jitter is added on top.
const RETRY_BASE_DELAY_MS: u64 = 200;
const RETRY_JITTER_MS: u64 = 250;

/// Stateless transport wrapper around the coach backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    ask_attempts: u32,
    observer: Arc<dyn RequestObserver>,
}

impl ApiClient {
    /// Build a client from configuration, with the default tracing observer.
    pub fn new(config: &CoachConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ask_attempts: config.ask_attempts.max(1),
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the default observer.
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    // ── Core operations ─────────────────────────────────────────────

    /// One chat turn against POST /ask.
    ///
    /// The profile snapshot rides along unless it is still empty. Transport
    /// failures are retried up to the configured attempt count (default one
    /// attempt, i.e. no retry) with a short jittered delay between tries;
    /// malformed responses are never retried.
    pub async fn ask(&self, prompt: &str, profile: &UserProfile) -> Result<String, ApiError> {
        let request = AskRequest {
            prompt,
            user_info: (!profile.is_empty()).then_some(profile),
        };

        let mut attempt = 1u32;
        loop {
            match self.post_json("/ask", &request).await {
                Ok(body) => return types::ask_reply_text(body),
                Err(e @ ApiError::MalformedResponse { .. }) => return Err(e),
                Err(e) => {
                    if attempt >= self.ask_attempts {
                        return Err(e);
                    }
                    let delay = RETRY_BASE_DELAY_MS * u64::from(attempt)
                        + rand::thread_rng().gen_range(0..RETRY_JITTER_MS);
                    tracing::debug!(
                        attempt,
                        delay_ms = delay,
                        "Retrying /ask after transport failure"
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Best-effort profile save against POST /profile.
    ///
    /// `true` on any 2xx — the response body is ignored beyond status.
    /// Failure is a `false`, never an error.
    pub async fn save_profile(&self, profile: &UserProfile) -> bool {
        match self.post("/profile", profile).await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(status = response.status().as_u16(), "Profile save rejected");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Profile save failed");
                false
            }
        }
    }

    /// Fetch the stored profile from GET /profile.
    ///
    /// Any failure collapses to the empty profile; this operation has no
    /// error channel visible to the caller.
    pub async fn fetch_profile(&self) -> UserProfile {
        match self.try_fetch_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "Profile fetch failed; using empty profile");
                UserProfile::default()
            }
        }
    }

    async fn try_fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let response = self.get("/profile").await?;
        let body = self.json_body("/profile", response).await?;
        decode("/profile", body)
    }

    // ── Extension endpoints ─────────────────────────────────────────
    // Backend routes with no session transition. Same normalization contract
    // as the core operations.

    /// POST /meal-plan.
    pub async fn meal_plan(
        &self,
        dietary_restrictions: &[String],
    ) -> Result<Option<String>, ApiError> {
        let request = MealPlanRequest {
            dietary_restrictions: (!dietary_restrictions.is_empty())
                .then_some(dietary_restrictions),
        };
        let body = self.post_json("/meal-plan", &request).await?;
        let response: MealPlanResponse = decode("/meal-plan", body)?;
        Ok(response.meal_plan)
    }

    /// POST /workout.
    pub async fn workout(&self, profile: &UserProfile) -> Result<Option<String>, ApiError> {
        let request = WorkoutRequest { user_info: profile };
        let body = self.post_json("/workout", &request).await?;
        let response: WorkoutResponse = decode("/workout", body)?;
        Ok(response.workout)
    }

    /// POST /progress.
    pub async fn track_progress(&self, entry: &ProgressEntry) -> Result<Option<String>, ApiError> {
        let body = self.post_json("/progress", entry).await?;
        let response: AckResponse = decode("/progress", body)?;
        Ok(response.message)
    }

    /// POST /goal.
    pub async fn set_goal(&self, goal: &GoalRequest) -> Result<Option<String>, ApiError> {
        let body = self.post_json("/goal", goal).await?;
        let response: AckResponse = decode("/goal", body)?;
        Ok(response.message)
    }

    /// POST /log-workout.
    pub async fn log_workout(&self, entry: &WorkoutLog) -> Result<String, ApiError> {
        let body = self.post_json("/log-workout", entry).await?;
        let response: LogWorkoutResponse = decode("/log-workout", body)?;
        Ok(response.message)
    }

    // ── Transport plumbing ──────────────────────────────────────────

    async fn post(
        &self,
        endpoint: &'static str,
        body: &(impl Serialize + Sync),
    ) -> Result<reqwest::Response, ApiError> {
        let body_value = serde_json::to_value(body).ok();
        self.observer.on_request(endpoint, body_value.as_ref());
        let result = self.http.post(self.url(endpoint)).json(body).send().await;
        self.inspect(endpoint, result)
    }

    async fn get(&self, endpoint: &'static str) -> Result<reqwest::Response, ApiError> {
        self.observer.on_request(endpoint, None);
        let result = self.http.get(self.url(endpoint)).send().await;
        self.inspect(endpoint, result)
    }

    /// Report the settled transport result to the observer; normalize
    /// send-level failures.
    fn inspect(
        &self,
        endpoint: &'static str,
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<reqwest::Response, ApiError> {
        match result {
            Ok(response) => {
                self.observer.on_response(
                    endpoint,
                    &RequestOutcome::Status(response.status().as_u16()),
                );
                Ok(response)
            }
            Err(e) => {
                let reason = e.to_string();
                self.observer
                    .on_response(endpoint, &RequestOutcome::Failed(reason.clone()));
                Err(ApiError::Transport { endpoint, reason })
            }
        }
    }

    /// Enforce a 2xx status and parse the body as JSON.
    async fn json_body(
        &self,
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, ApiError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ApiError::Transport {
                endpoint,
                reason: failure_reason(status, &body),
            });
        }
        serde_json::from_str(&body).map_err(|e| ApiError::MalformedResponse {
            endpoint,
            detail: e.to_string(),
        })
    }

    async fn post_json(
        &self,
        endpoint: &'static str,
        body: &(impl Serialize + Sync),
    ) -> Result<serde_json::Value, ApiError> {
        let response = self.post(endpoint, body).await?;
        self.json_body(endpoint, response).await
    }
}

#[async_trait]
impl CoachBackend for ApiClient {
    async fn ask(&self, prompt: &str, profile: &UserProfile) -> Result<String, ApiError> {
        ApiClient::ask(self, prompt, profile).await
    }

    async fn save_profile(&self, profile: &UserProfile) -> bool {
        ApiClient::save_profile(self, profile).await
    }

    async fn fetch_profile(&self) -> UserProfile {
        ApiClient::fetch_profile(self).await
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Derive a human-readable failure reason from a non-2xx response: the JSON
/// body's `error` field when present, else the status line.
fn failure_reason(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .map(String::from)
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    body: serde_json::Value,
) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::MalformedResponse {
        endpoint,
        detail: e.to_string(),
    })
}

// ── Tests ───────────────────────────────────────────────────────────
