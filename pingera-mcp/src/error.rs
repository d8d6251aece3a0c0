//! Error types for the Pingera MCP server.

/// Errors resolving settings at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `PINGERA_API_KEY` is unset or empty.
    #[error("PINGERA_API_KEY environment variable is required")]
    MissingApiKey,

    /// A variable is set but cannot be interpreted.
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors that stop the server from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The API client could not be constructed.
    #[error("Client error: {0}")]
    Client(#[from] pingera_sdk::PingeraError),

    /// The MCP transport failed.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
