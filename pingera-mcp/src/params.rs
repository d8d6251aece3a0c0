//! Tool parameter types.
//!
//! Arguments are held as raw JSON and checked by the gateway, not by
//! deserialization: a mistyped or missing argument must come back as an
//! `invalid_params` envelope, and a write in read-only mode as
//! `permission_denied`, whatever the arguments look like. The `schemars`
//! attributes publish the intended types to clients.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw tool argument
pub type Arg = Option<Value>;

// ============================================================================
// Pages
// ============================================================================

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListPagesParams {
    #[schemars(with = "Option<u32>", description = "Page number, starting at 1 (default: 1)")]
    pub page: Arg,

    #[schemars(
        with = "Option<u32>",
        description = "Pages per result page, 1-100 (default: 20; larger values are capped)"
    )]
    pub per_page: Arg,

    #[schemars(with = "Option<String>", description = "Only return pages with this status")]
    pub status: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PageIdParams {
    #[schemars(with = "String", description = "Status page ID")]
    pub page_id: Arg,
}

impl PageIdParams {
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: Some(Value::String(page_id.into())),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreatePageParams {
    #[schemars(with = "String", description = "Display name of the status page")]
    pub name: Arg,

    #[schemars(with = "Option<String>", description = "Subdomain on the Pingera status host")]
    pub subdomain: Arg,

    #[schemars(with = "Option<String>", description = "Custom domain")]
    pub domain: Arg,

    #[schemars(with = "Option<String>", description = "Company website URL")]
    pub url: Arg,

    #[schemars(with = "Option<String>", description = "Interface language: 'ru' or 'en'")]
    pub language: Arg,

    #[schemars(
        with = "Option<Map<String, Value>>",
        description = "Any further page attributes, e.g. headline or css_* colors"
    )]
    pub extra: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdatePageParams {
    #[schemars(with = "String", description = "Status page ID")]
    pub page_id: Arg,

    #[schemars(with = "Map<String, Value>", description = "Page attributes to set")]
    pub fields: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListIncidentsParams {
    #[schemars(with = "String", description = "Status page ID")]
    pub page_id: Arg,

    #[schemars(with = "Option<u32>", description = "Page number, starting at 1 (default: 1)")]
    pub page: Arg,

    #[schemars(with = "Option<u32>", description = "Incidents per result page, 1-100 (default: 20)")]
    pub per_page: Arg,
}

// ============================================================================
// Components
// ============================================================================

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListComponentsParams {
    #[schemars(with = "String", description = "Status page ID")]
    pub page_id: Arg,

    #[schemars(with = "Option<bool>", description = "Include deleted components (default: false)")]
    pub show_deleted: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComponentIdParams {
    #[schemars(with = "String", description = "Status page ID")]
    pub page_id: Arg,

    #[schemars(with = "String", description = "Component ID")]
    pub component_id: Arg,
}

/// Component attributes shared by create and update
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComponentFields {
    #[schemars(with = "Option<String>", description = "Component name")]
    pub name: Arg,

    #[schemars(with = "Option<String>", description = "Component description")]
    pub description: Arg,

    #[schemars(
        with = "Option<String>",
        description = "One of: operational, under_maintenance, degraded_performance, partial_outage, major_outage"
    )]
    pub status: Arg,

    #[schemars(with = "Option<String>", description = "ID of the component group this belongs to")]
    pub group_id: Arg,

    #[schemars(with = "Option<bool>", description = "Hide the component while it is operational")]
    pub only_show_if_degraded: Arg,

    #[schemars(with = "Option<i64>", description = "Sort position on the page")]
    pub position: Arg,

    #[schemars(with = "Option<bool>", description = "Show uptime history for the component")]
    pub showcase: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateComponentParams {
    #[schemars(with = "String", description = "Status page ID")]
    pub page_id: Arg,

    #[serde(flatten)]
    pub fields: ComponentFields,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateComponentParams {
    #[schemars(with = "String", description = "Status page ID")]
    pub page_id: Arg,

    #[schemars(with = "String", description = "Component ID")]
    pub component_id: Arg,

    #[serde(flatten)]
    pub fields: ComponentFields,
}

// ============================================================================
// Checks
// ============================================================================

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListChecksParams {
    #[schemars(with = "Option<u32>", description = "Page number, starting at 1 (default: 1)")]
    pub page: Arg,

    #[schemars(with = "Option<u32>", description = "Checks per result page, 1-100 (default: 20)")]
    pub page_size: Arg,

    #[serde(rename = "type")]
    #[schemars(with = "Option<String>", description = "Filter by check type, e.g. web, api, tcp, ssl")]
    pub check_type: Arg,

    #[schemars(with = "Option<String>", description = "Filter by check status")]
    pub status: Arg,
}

/// Plain page/page_size paging
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PagingParams {
    #[schemars(with = "Option<u32>", description = "Page number, starting at 1 (default: 1)")]
    pub page: Arg,

    #[schemars(with = "Option<u32>", description = "Items per result page, 1-100 (default: 20)")]
    pub page_size: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckIdParams {
    #[schemars(with = "String", description = "Check ID")]
    pub check_id: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckResultsParams {
    #[schemars(with = "String", description = "Check ID")]
    pub check_id: Arg,

    #[schemars(
        with = "Option<String>",
        description = "Start of the window, RFC 3339 (e.g. 2024-01-01T00:00:00Z)"
    )]
    pub from_date: Arg,

    #[schemars(with = "Option<String>", description = "End of the window, RFC 3339")]
    pub to_date: Arg,

    #[schemars(with = "Option<u32>", description = "Page number, starting at 1 (default: 1)")]
    pub page: Arg,

    #[schemars(with = "Option<u32>", description = "Results per result page, 1-100 (default: 20)")]
    pub page_size: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateCheckParams {
    #[schemars(with = "String", description = "Check name")]
    pub name: Arg,

    #[serde(rename = "type")]
    #[schemars(with = "String", description = "Check type, e.g. web, api, tcp, ssl")]
    pub check_type: Arg,

    #[schemars(with = "Option<String>", description = "Target URL for web/api/ssl checks")]
    pub url: Arg,

    #[schemars(with = "Option<String>", description = "Target host for tcp checks")]
    pub host: Arg,

    #[schemars(with = "Option<u16>", description = "Target port for tcp checks")]
    pub port: Arg,

    #[schemars(with = "Option<u64>", description = "Seconds between runs")]
    pub interval: Arg,

    #[schemars(with = "Option<u64>", description = "Per-run timeout in seconds")]
    pub timeout: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCheckParams {
    #[schemars(with = "String", description = "Check ID")]
    pub check_id: Arg,

    #[schemars(
        with = "Map<String, Value>",
        description = "Check configuration to set, e.g. name, url, interval, timeout, active"
    )]
    pub fields: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JobIdParams {
    #[schemars(with = "String", description = "Check job ID")]
    pub job_id: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UnifiedResultsParams {
    #[schemars(with = "Vec<String>", description = "IDs of the checks to combine")]
    pub check_ids: Arg,

    #[schemars(with = "Option<String>", description = "Start of the window, RFC 3339")]
    pub from_date: Arg,

    #[schemars(with = "Option<String>", description = "End of the window, RFC 3339")]
    pub to_date: Arg,

    #[schemars(with = "Option<String>", description = "Only results with this status")]
    pub status: Arg,

    #[schemars(with = "Option<u32>", description = "Page number, starting at 1 (default: 1)")]
    pub page: Arg,

    #[schemars(with = "Option<u32>", description = "Results per result page, 1-100 (default: 100)")]
    pub page_size: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UnifiedStatsParams {
    #[schemars(with = "Vec<String>", description = "IDs of the checks to combine")]
    pub check_ids: Arg,

    #[schemars(with = "Option<String>", description = "Start of the window, RFC 3339")]
    pub from_date: Arg,

    #[schemars(with = "Option<String>", description = "End of the window, RFC 3339")]
    pub to_date: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExecuteCustomCheckParams {
    #[schemars(with = "String", description = "URL to check")]
    pub url: Arg,

    #[serde(rename = "type")]
    #[schemars(
        with = "Option<String>",
        description = "Check type: web, api or synthetic (default: web)"
    )]
    pub check_type: Arg,

    #[schemars(with = "Option<u64>", description = "Timeout in seconds (default: 30)")]
    pub timeout: Arg,

    #[schemars(with = "Option<String>", description = "Name for the run")]
    pub name: Arg,

    #[schemars(
        with = "Option<Map<String, Value>>",
        description = "Type-specific parameters, e.g. pw_script for synthetic checks"
    )]
    pub parameters: Arg,
}

// ============================================================================
// Heartbeats
// ============================================================================

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListHeartbeatsParams {
    #[schemars(with = "Option<u32>", description = "Page number, starting at 1 (default: 1)")]
    pub page: Arg,

    #[schemars(with = "Option<u32>", description = "Heartbeats per result page, 1-100 (default: 20)")]
    pub page_size: Arg,

    #[schemars(
        with = "Option<String>",
        description = "Only heartbeats with this status, e.g. up or down (applied to the fetched page)"
    )]
    pub status: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HeartbeatIdParams {
    #[schemars(with = "String", description = "Heartbeat ID")]
    pub heartbeat_id: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateHeartbeatParams {
    #[schemars(with = "String", description = "Heartbeat name")]
    pub name: Arg,

    #[schemars(with = "u64", description = "Expected seconds between pings")]
    pub period: Arg,

    #[schemars(with = "Option<u64>", description = "Extra seconds allowed before alerting")]
    pub grace: Arg,

    #[schemars(
        with = "Option<Map<String, Value>>",
        description = "Any further heartbeat attributes"
    )]
    pub extra: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateHeartbeatParams {
    #[schemars(with = "String", description = "Heartbeat ID")]
    pub heartbeat_id: Arg,

    #[schemars(with = "Map<String, Value>", description = "Heartbeat attributes to set")]
    pub fields: Arg,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HeartbeatLogsParams {
    #[schemars(with = "String", description = "Heartbeat ID")]
    pub heartbeat_id: Arg,

    #[schemars(with = "Option<String>", description = "Start of the window, RFC 3339")]
    pub from_date: Arg,

    #[schemars(with = "Option<String>", description = "End of the window, RFC 3339")]
    pub to_date: Arg,

    #[schemars(with = "Option<u32>", description = "Page number, starting at 1 (default: 1)")]
    pub page: Arg,

    #[schemars(with = "Option<u32>", description = "Log entries per result page, 1-100 (default: 20)")]
    pub page_size: Arg,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mistyped_arguments_still_deserialize() {
        let params: ListPagesParams =
            serde_json::from_value(json!({"page": -1, "per_page": "ten"})).unwrap();
        assert_eq!(params.page, Some(json!(-1)));
        assert_eq!(params.per_page, Some(json!("ten")));

        let params: CreatePageParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.name.is_none());
    }

    #[test]
    fn test_component_fields_flatten() {
        let params: UpdateComponentParams = serde_json::from_value(json!({
            "page_id": "p1",
            "component_id": "c1",
            "status": "major_outage"
        }))
        .unwrap();
        assert_eq!(params.fields.status, Some(json!("major_outage")));
    }

    #[test]
    fn test_schema_keeps_intended_types() {
        let schema = serde_json::to_value(schemars::schema_for!(PageIdParams)).unwrap();
        assert_eq!(schema["properties"]["page_id"]["type"], "string");
        assert_eq!(schema["required"], json!(["page_id"]));
    }
}
