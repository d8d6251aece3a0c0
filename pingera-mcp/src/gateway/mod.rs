//! Adapter between MCP requests and the Pingera client.
//!
//! Every operation enforces the operation mode for mutating calls, then
//! validates its arguments, and returns `Result<T, ErrorRecord>`; nothing here
//! panics or propagates a raw client error. Failed validation and permission
//! checks never reach the network.

mod checks;
mod components;
mod heartbeats;
mod pages;

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use pingera_sdk::{
    validate_identifier, PageRequest, PingeraClient, PingeraError, ResultWindow, MAX_PAGE_SIZE,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{OperationMode, Settings};
use crate::envelope::ErrorRecord;
use crate::params::Arg;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Outcome of a gateway operation
pub type GatewayResult<T> = Result<T, ErrorRecord>;

/// Capabilities advertised by the status resource
#[derive(Debug, Clone, Serialize)]
pub struct Features {
    pub read_operations: bool,
    pub write_operations: bool,
}

/// Shared state behind every resource and tool
#[derive(Debug, Clone)]
pub struct Gateway {
    settings: Arc<Settings>,
    client: PingeraClient,
}

impl Gateway {
    /// Build the gateway and its API client from settings
    pub fn new(settings: Arc<Settings>) -> Result<Self, PingeraError> {
        let client = settings.client()?;
        Ok(Self { settings, client })
    }

    /// Use a preconfigured client, e.g. one with custom retry timing
    pub fn with_client(settings: Arc<Settings>, client: PingeraClient) -> Self {
        Self { settings, client }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> OperationMode {
        self.settings.mode
    }

    pub fn client(&self) -> &PingeraClient {
        &self.client
    }

    pub fn features(&self) -> Features {
        Features {
            read_operations: true,
            write_operations: self.mode().allows_writes(),
        }
    }

    /// Mode gate for mutating operations
    fn ensure_writable(&self, operation: &str) -> GatewayResult<()> {
        if self.mode().allows_writes() {
            Ok(())
        } else {
            tracing::info!(operation, "rejected write in read_only mode");
            Err(ErrorRecord::permission_denied(operation))
        }
    }
}

// ============================================================================
// Argument checks
//
// Tool arguments arrive as raw JSON (see `crate::params`). Each helper turns
// one argument into its typed value or an `invalid_params` record.
// ============================================================================

fn invalid_type(field: &str, expected: &str, value: &Value) -> ErrorRecord {
    ErrorRecord::invalid_params(format!("{} must be {}, got {}", field, expected, value))
}

/// A string argument; blank strings count as absent
fn text(field: &str, value: Arg) -> GatewayResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string()).filter(|s| !s.is_empty())),
        Some(other) => Err(invalid_type(field, "a string", &other)),
    }
}

fn required_text(field: &str, value: Arg) -> GatewayResult<String> {
    text(field, value)?.ok_or_else(|| ErrorRecord::invalid_params(format!("{} is required", field)))
}

/// A required identifier that is safe to embed in a URL path
fn identifier(field: &str, value: Arg) -> GatewayResult<String> {
    let value = required_text(field, value)?;
    validate_identifier(field, &value).map_err(ErrorRecord::from)?;
    Ok(value)
}

/// A strictly positive integer, given as a number or a numeric string
fn positive(field: &str, value: Arg) -> GatewayResult<Option<u64>> {
    let parsed = match &value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(n) if n > 0 => Ok(Some(n)),
        _ => Err(ErrorRecord::invalid_params(format!(
            "{} must be a positive integer",
            field
        ))),
    }
}

fn integer(field: &str, value: Arg) -> GatewayResult<Option<i64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) if n.is_i64() => Ok(n.as_i64()),
        Some(Value::String(s)) if s.trim().parse::<i64>().is_ok() => Ok(s.trim().parse().ok()),
        Some(other) => Err(invalid_type(field, "an integer", &other)),
    }
}

fn flag(field: &str, value: Arg) -> GatewayResult<Option<bool>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(other) => Err(invalid_type(field, "a boolean", &other)),
    }
}

fn object(field: &str, value: Arg) -> GatewayResult<Option<Map<String, Value>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(invalid_type(field, "an object", &other)),
    }
}

/// Attributes for an update; an empty or missing object is rejected
fn update_fields(value: Arg) -> GatewayResult<Map<String, Value>> {
    object("fields", value)?
        .filter(|fields| !fields.is_empty())
        .ok_or_else(|| ErrorRecord::invalid_params("No fields provided for update"))
}

/// A list of identifiers, as an array or a comma-separated string
fn identifier_list(field: &str, value: Arg) -> GatewayResult<Vec<String>> {
    let raw: Vec<Value> = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(Value::String(s)) => s
            .split(',')
            .map(|id| Value::String(id.to_string()))
            .collect(),
        Some(other) => return Err(invalid_type(field, "a list of IDs", &other)),
    };
    let ids = raw
        .into_iter()
        .map(|item| identifier(field, Some(item)))
        .collect::<GatewayResult<Vec<String>>>()?;
    if ids.is_empty() {
        return Err(ErrorRecord::invalid_params(format!(
            "{} must name at least one check",
            field
        )));
    }
    Ok(ids)
}

/// Resolve optional page/size arguments; zero is rejected, oversize is capped.
fn page_request(page: Arg, size: Arg, size_field: &str) -> GatewayResult<PageRequest> {
    paging(page, size, size_field, DEFAULT_PAGE_SIZE)
}

fn paging(page: Arg, size: Arg, size_field: &str, default_size: u32) -> GatewayResult<PageRequest> {
    let page = positive("page", page)?.unwrap_or(1);
    let page = u32::try_from(page)
        .map_err(|_| ErrorRecord::invalid_params(format!("page {} is out of range", page)))?;
    let size = positive(size_field, size)?
        .unwrap_or(u64::from(default_size))
        .min(u64::from(MAX_PAGE_SIZE)) as u32;
    PageRequest::new(page, size).map_err(ErrorRecord::from)
}

fn timestamp(field: &str, value: Arg) -> GatewayResult<Option<DateTime<FixedOffset>>> {
    match text(field, value)? {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(&raw).map(Some).map_err(|e| {
            ErrorRecord::invalid_params(format!(
                "{} must be an RFC 3339 timestamp, got '{}': {}",
                field, raw, e
            ))
        }),
    }
}

/// A validated `from_date`/`to_date` pair
fn window(from_date: Arg, to_date: Arg) -> GatewayResult<ResultWindow> {
    let from = timestamp("from_date", from_date)?;
    let to = timestamp("to_date", to_date)?;
    if let (Some(from), Some(to)) = (&from, &to) {
        if from > to {
            return Err(ErrorRecord::invalid_params(
                "from_date must not be later than to_date",
            ));
        }
    }
    Ok(ResultWindow {
        from_date: from.map(|t| t.to_rfc3339()),
        to_date: to.map(|t| t.to_rfc3339()),
    })
}

#[cfg(test)]
mod tests;
