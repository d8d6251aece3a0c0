//! Heartbeat (cron job monitoring) types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pagination::{require_non_empty, ExtraFields, Validate};

/// A heartbeat expects periodic pings from a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heartbeat {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Expected seconds between pings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u64>,

    /// Extra seconds allowed before the heartbeat is considered down
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_ping_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for Heartbeat {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("id", &self.id)?;
        require_non_empty("name", &self.name)?;
        if self.period == Some(0) {
            return Err("period must be positive".to_string());
        }
        Ok(())
    }
}

impl ExtraFields for Heartbeat {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

/// One received ping (or missed window) of a heartbeat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for HeartbeatLog {
    fn validate(&self) -> Result<(), String> {
        if let Some(id) = &self.id {
            require_non_empty("id", id)?;
        }
        Ok(())
    }
}

impl ExtraFields for HeartbeatLog {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

/// Body for creating a heartbeat
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeartbeatCreateParams {
    pub name: String,
    /// Expected seconds between pings
    pub period: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
