//! Monitoring check types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pagination::{require_non_empty, ExtraFields, Validate};

/// A synthetic monitoring check (HTTP, TCP, ping, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub id: String,
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub check_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Seconds between runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,

    /// Per-run timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for Check {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("id", &self.id)?;
        require_non_empty("name", &self.name)
    }
}

impl ExtraFields for Check {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

/// Outcome of a single check run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_id: Option<String>,

    pub status: String,

    /// Milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for CheckResult {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("status", &self.status)?;
        match self.response_time {
            Some(t) if t < 0.0 => Err(format!("response_time must not be negative, got {}", t)),
            _ => Ok(()),
        }
    }
}

impl ExtraFields for CheckResult {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

/// A queued or finished check execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckJob {
    #[serde(alias = "job_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for CheckJob {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("id", &self.id)
    }
}

impl ExtraFields for CheckJob {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

/// Filters for listing checks
#[derive(Debug, Clone, Default)]
pub struct CheckFilter {
    pub check_type: Option<String>,
    pub status: Option<String>,
}

/// Time window for check results (RFC 3339 timestamps)
#[derive(Debug, Clone, Default)]
pub struct ResultWindow {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl ResultWindow {
    pub(crate) fn push_query(&self, query: &mut Vec<(&'static str, String)>) {
        if let Some(from) = &self.from_date {
            query.push(("from_date", from.clone()));
        }
        if let Some(to) = &self.to_date {
            query.push(("to_date", to.clone()));
        }
    }
}

/// Body for creating a check
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckCreateParams {
    pub name: String,
    #[serde(rename = "type")]
    pub check_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// Body for running an ad-hoc check that is not stored
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OnDemandCheckParams {
    pub url: String,
    #[serde(rename = "type")]
    pub check_type: String,
    pub timeout: u64,
    pub name: String,
    pub parameters: Map<String, Value>,
}
