//! Error types for the wellness-coach client.

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Normalized transport-boundary errors.
///
/// Every fault the backend can produce collapses into one of these two shapes
/// at the `ApiClient` boundary. Nothing rawer crosses into the session layer:
/// the controller only ever branches on these.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Network unreachable, timeout, or non-2xx status.
    #[error("Request to {endpoint} failed: {reason}")]
    Transport {
        endpoint: &'static str,
        reason: String,
    },

    /// Success status but a body shape the contract does not allow.
    #[error("Unexpected response shape from {endpoint}: {detail}")]
    MalformedResponse {
        endpoint: &'static str,
        detail: String,
    },
}

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, Error>;
