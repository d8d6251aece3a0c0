//! Error types for the Pingera SDK

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Kinds
// ============================================================================

/// Broad classification of a failure, carried as data in error envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthError,
    ApiError,
    ConnectionError,
    TimeoutError,
    InvalidResponse,
    InvalidParams,
    PermissionDenied,
    ConfigurationError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AuthError => "auth_error",
            ErrorKind::ApiError => "api_error",
            ErrorKind::ConnectionError => "connection_error",
            ErrorKind::TimeoutError => "timeout_error",
            ErrorKind::InvalidResponse => "invalid_response",
            ErrorKind::InvalidParams => "invalid_params",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::ConfigurationError => "configuration_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SDK Error Types
// ============================================================================

/// Errors that can occur when using the Pingera API
#[derive(Debug, Error)]
pub enum PingeraError {
    /// Authentication failed (401/403)
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        cause: Option<String>,
    },

    /// The requested entity does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// The configured deadline elapsed
    #[error("Request timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    /// Rejected before sending (bad identifier, page number, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Response body could not be decoded or failed validation
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error (missing API key, bad base URL, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for SDK operations.
pub type PingeraResult<T> = Result<T, PingeraError>;

impl PingeraError {
    /// The error kind reported to callers
    pub fn kind(&self) -> ErrorKind {
        match self {
            PingeraError::Authentication { .. } => ErrorKind::AuthError,
            PingeraError::NotFound(_) | PingeraError::Api { .. } => ErrorKind::ApiError,
            PingeraError::Connection(_) => ErrorKind::ConnectionError,
            PingeraError::Timeout(_) => ErrorKind::TimeoutError,
            PingeraError::InvalidRequest(_) => ErrorKind::InvalidParams,
            PingeraError::InvalidResponse(_) => ErrorKind::InvalidResponse,
            PingeraError::Configuration(_) => ErrorKind::ConfigurationError,
        }
    }

    /// HTTP status associated with this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PingeraError::NotFound(_) => Some(404),
            PingeraError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Underlying cause reported by the remote service, if any
    pub fn cause(&self) -> Option<&str> {
        match self {
            PingeraError::Authentication { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PingeraError::NotFound(_))
    }

    /// Returns true if this error is retryable
    ///
    /// Connection failures, per-attempt timeouts, 429 and 5xx responses.
    pub fn is_retryable(&self) -> bool {
        match self {
            PingeraError::Connection(_) | PingeraError::Timeout(_) => true,
            PingeraError::Api { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Returns true if a response with this status should be retried
    pub fn is_retryable_status(status_code: u16) -> bool {
        matches!(status_code, 429 | 500..=599)
    }

    /// Classify an error status and body into an error variant
    pub fn from_status(status_code: u16, body: &str) -> Self {
        let remote = extract_message(body);

        match status_code {
            401 | 403 => PingeraError::Authentication {
                message: "Authentication failed. Check your API key.".to_string(),
                cause: remote,
            },
            404 => PingeraError::NotFound(
                remote.unwrap_or_else(|| "The requested resource does not exist".to_string()),
            ),
            _ => PingeraError::Api {
                status: status_code,
                message: remote.unwrap_or_else(|| format!("API error: {}", status_code)),
            },
        }
    }

    /// Classify a transport error into an error variant
    pub fn from_reqwest_error(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            PingeraError::Timeout(timeout)
        } else if err.is_decode() {
            PingeraError::InvalidResponse(format!("Failed to read response body: {}", err))
        } else if err.is_builder() {
            PingeraError::InvalidRequest(err.to_string())
        } else {
            PingeraError::Connection(err.to_string())
        }
    }
}

/// Pull a human-readable message out of an error body
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| match v {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Object(obj) => obj
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        })
}

// ============================================================================
// Retry Configuration
// ============================================================================

/// Configuration for automatic retry behavior
///
/// Exponential backoff: base_delay × 2^attempt with jitter, capped at
/// `max_delay`. A `Retry-After` header (seconds) overrides the computed delay,
/// still capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (default: 3)
    pub max_retries: u32,

    /// Base delay for exponential backoff (default: 1s)
    pub base_delay: Duration,

    /// Maximum delay between retries (default: 8s)
    pub max_delay: Duration,

    /// Jitter factor (0.0-1.0) to add randomness to delays (default: 0.25)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(8),
            jitter: 0.25,
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with the specified max retries
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Disable retries
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Calculate the delay for a given retry attempt (0-indexed)
    pub(crate) fn delay_for_attempt(&self, attempt: u32) -> Duration {
        use rand::Rng;

        // 2^30 already exceeds any sane max_delay
        let base = self.base_delay.as_secs_f64() * 2_f64.powi(attempt.min(30) as i32);

        let jitter_range = base * self.jitter;
        let jitter = if jitter_range > 0.0 {
            rand::thread_rng().gen_range(-jitter_range..=jitter_range)
        } else {
            0.0
        };
        let delay_secs = (base + jitter).max(0.0);

        Duration::try_from_secs_f64(delay_secs)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Delay before retrying: the server's `Retry-After` when present,
    /// backoff otherwise. Never longer than `max_delay`.
    pub(crate) fn retry_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        retry_after
            .map(|delay| delay.min(self.max_delay))
            .unwrap_or_else(|| self.delay_for_attempt(attempt))
    }

    /// Parse a `Retry-After` header given in seconds
    pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
        headers
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}
