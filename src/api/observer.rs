//! Request/response observation hooks.
//!
//! The observer is injected per `ApiClient` instance, so tests can capture
//! traffic without process-wide patching. Observation is a side effect only
//! and never affects a call's returned result.

/// Outcome reported to an observer after a call settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The transport produced a response with this status (2xx or not).
    Status(u16),
    /// The call never produced a response.
    Failed(String),
}

/// Observer of request/response metadata.
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, endpoint: &str, body: Option<&serde_json::Value>);
    fn on_response(&self, endpoint: &str, outcome: &RequestOutcome);
}

/// Default observer: logs request/response metadata via `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, endpoint: &str, body: Option<&serde_json::Value>) {
        match body {
            Some(body) => tracing::debug!(endpoint, %body, "Request"),
            None => tracing::debug!(endpoint, "Request"),
        }
    }

    fn on_response(&self, endpoint: &str, outcome: &RequestOutcome) {
        match outcome {
            RequestOutcome::Status(status) => {
                tracing::debug!(endpoint, status = *status, "Response");
            }
            RequestOutcome::Failed(reason) => {
                tracing::warn!(endpoint, reason = %reason, "Request failed");
            }
        }
    }
}
