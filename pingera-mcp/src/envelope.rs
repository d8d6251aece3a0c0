//! The success/failure wrapper returned by every tool and resource.

use pingera_sdk::{ErrorKind, PingeraError};
use rmcp::model::{CallToolResult, ResourceContents};
use serde::Serialize;
use serde_json::Value;

/// Structured failure detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    pub error_kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ErrorRecord {
    pub fn new(error_kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error_kind,
            message: message.into(),
            status_code: None,
            cause: None,
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParams, message)
    }

    /// A mutating operation attempted in read-only mode
    pub fn permission_denied(operation: &str) -> Self {
        Self::new(
            ErrorKind::PermissionDenied,
            format!(
                "Operation '{}' is not allowed in read_only mode. Set PINGERA_MODE=read_write to enable it.",
                operation
            ),
        )
    }
}

impl From<PingeraError> for ErrorRecord {
    fn from(err: PingeraError) -> Self {
        Self::from(&err)
    }
}

impl From<&PingeraError> for ErrorRecord {
    fn from(err: &PingeraError) -> Self {
        Self {
            error_kind: err.kind(),
            message: err.to_string(),
            status_code: err.status_code(),
            cause: err.cause().map(str::to_string),
        }
    }
}

/// `{"ok": true, "data": ..}` or `{"ok": false, "error_kind": .., "message": ..}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub error: Option<ErrorRecord>,
}

impl Envelope {
    pub fn success(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(e) => Self::failure(ErrorRecord::new(
                ErrorKind::InvalidResponse,
                format!("Failed to serialize result: {}", e),
            )),
        }
    }

    pub fn failure(error: ErrorRecord) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.error_kind)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({
                "ok": false,
                "error_kind": ErrorKind::InvalidResponse,
                "message": format!("Failed to serialize envelope: {}", e),
            })
        })
    }

    /// Tool result with the envelope as structured content
    pub fn into_call_tool_result(self) -> CallToolResult {
        let value = self.to_value();
        if self.ok {
            CallToolResult::structured(value)
        } else {
            CallToolResult::structured_error(value)
        }
    }

    /// Resource contents holding the envelope as JSON text
    pub fn into_resource_contents(self, uri: &str) -> ResourceContents {
        let text = serde_json::to_string_pretty(&self.to_value()).unwrap_or_default();
        ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some("application/json".to_string()),
            text,
            meta: None,
        }
    }
}

impl From<PingeraError> for Envelope {
    fn from(err: PingeraError) -> Self {
        Self::failure(ErrorRecord::from(&err))
    }
}

impl From<ErrorRecord> for Envelope {
    fn from(error: ErrorRecord) -> Self {
        Self::failure(error)
    }
}

impl<T: Serialize> From<Result<T, ErrorRecord>> for Envelope {
    fn from(result: Result<T, ErrorRecord>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_success_shape() {
        let envelope = Envelope::success(json!({"pages": []}));
        assert_eq!(envelope.to_value(), json!({"ok": true, "data": {"pages": []}}));
    }

    #[test]
    fn test_failure_shape_flattens_record() {
        let envelope = Envelope::from(PingeraError::NotFound("Page not found".into()));
        assert_eq!(
            envelope.to_value(),
            json!({
                "ok": false,
                "error_kind": "api_error",
                "message": "Not found: Page not found",
                "status_code": 404
            })
        );
    }

    #[test]
    fn test_auth_failure_carries_cause() {
        let err = PingeraError::from_status(401, r#"{"message": "token expired"}"#);
        let value = Envelope::from(err).to_value();
        assert_eq!(value["error_kind"], "auth_error");
        assert_eq!(value["cause"], "token expired");
        assert!(value.get("status_code").is_none());
    }

    #[test]
    fn test_from_result() {
        let ok: Result<u32, ErrorRecord> = Ok(5);
        assert_eq!(Envelope::from(ok).data, Some(json!(5)));

        let err: Result<u32, ErrorRecord> = Err(ErrorRecord::invalid_params("bad"));
        assert_eq!(Envelope::from(err).error_kind(), Some(ErrorKind::InvalidParams));
    }

    #[test]
    fn test_timeout_kind() {
        let envelope = Envelope::from(PingeraError::Timeout(Duration::from_secs(1)));
        assert_eq!(envelope.error_kind(), Some(ErrorKind::TimeoutError));
    }

    #[test]
    fn test_permission_denied_message() {
        let envelope = Envelope::from(ErrorRecord::permission_denied("delete_page"));
        assert_eq!(envelope.error_kind(), Some(ErrorKind::PermissionDenied));
        assert!(envelope.to_value()["message"]
            .as_str()
            .unwrap()
            .contains("delete_page"));
    }

    #[test]
    fn test_call_tool_result_flags_errors() {
        let ok = Envelope::success(1).into_call_tool_result();
        assert_eq!(ok.is_error, Some(false));
        assert_eq!(ok.structured_content, Some(json!({"ok": true, "data": 1})));

        let failed = Envelope::from(ErrorRecord::invalid_params("page must be positive"))
            .into_call_tool_result();
        assert_eq!(failed.is_error, Some(true));
        assert_eq!(
            failed.structured_content.unwrap()["error_kind"],
            "invalid_params"
        );
    }

    #[test]
    fn test_resource_contents_are_json() {
        let contents = Envelope::success(json!({"mode": "read_only"}))
            .into_resource_contents("pingera://status");
        match contents {
            ResourceContents::TextResourceContents {
                uri,
                mime_type,
                text,
                ..
            } => {
                assert_eq!(uri, "pingera://status");
                assert_eq!(mime_type.as_deref(), Some("application/json"));
                let parsed: Value = serde_json::from_str(&text).unwrap();
                assert_eq!(parsed["data"]["mode"], "read_only");
            }
            other => panic!("unexpected contents: {other:?}"),
        }
    }
}
