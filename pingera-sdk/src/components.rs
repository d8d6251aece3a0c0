//! Status page component types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pagination::{require_non_empty, ExtraFields, Validate};

/// Operational status of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Operational,
    UnderMaintenance,
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
}

impl ComponentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentStatus::Operational => "operational",
            ComponentStatus::UnderMaintenance => "under_maintenance",
            ComponentStatus::DegradedPerformance => "degraded_performance",
            ComponentStatus::PartialOutage => "partial_outage",
            ComponentStatus::MajorOutage => "major_outage",
        }
    }
}

impl std::str::FromStr for ComponentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operational" => Ok(ComponentStatus::Operational),
            "under_maintenance" => Ok(ComponentStatus::UnderMaintenance),
            "degraded_performance" => Ok(ComponentStatus::DegradedPerformance),
            "partial_outage" => Ok(ComponentStatus::PartialOutage),
            "major_outage" => Ok(ComponentStatus::MajorOutage),
            other => Err(format!(
                "Invalid component status '{}'. Expected one of: operational, \
                 under_maintenance, degraded_performance, partial_outage, major_outage",
                other
            )),
        }
    }
}

/// A component (service) shown on a status page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ComponentStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,

    /// Whether this component is a group of other components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_show_if_degraded: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showcase: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for Component {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("name", &self.name)?;
        if let Some(id) = &self.id {
            require_non_empty("id", id)?;
        }
        Ok(())
    }
}

impl ExtraFields for Component {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

impl Component {
    pub fn is_group(&self) -> bool {
        self.group == Some(true)
    }
}

/// Body for creating or updating a component
///
/// Every field is optional so the same type serves partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComponentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_show_if_degraded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showcase: Option<bool>,
}

impl ComponentParams {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
