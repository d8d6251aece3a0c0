//! Tests for startup error types.

use crate::error::*;

#[test]
fn test_missing_api_key_message() {
    let error = ConfigError::MissingApiKey;
    assert_eq!(
        error.to_string(),
        "PINGERA_API_KEY environment variable is required"
    );
}

#[test]
fn test_invalid_value_message() {
    let error = ConfigError::InvalidValue {
        var: "PINGERA_MODE",
        value: "admin".to_string(),
        reason: "expected read_only or read_write".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid value for PINGERA_MODE: 'admin' (expected read_only or read_write)"
    );
}

#[test]
fn test_server_error_from_config() {
    let error: ServerError = ConfigError::MissingApiKey.into();
    assert!(matches!(error, ServerError::Config(_)));
    assert!(error.to_string().starts_with("Configuration error:"));
}

#[test]
fn test_server_error_from_client() {
    let error: ServerError =
        pingera_sdk::PingeraError::Configuration("API key is required".to_string()).into();
    assert!(matches!(error, ServerError::Client(_)));
}

#[test]
fn test_transport_error_display() {
    let error = ServerError::Transport("stdin closed".to_string());
    assert_eq!(error.to_string(), "Transport error: stdin closed");
}
