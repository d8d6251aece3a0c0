//! Status page types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pagination::{require_non_empty, ExtraFields, Paginated, Validate};

/// A paginated list of status pages
pub type PageList = Paginated<Page>;

/// A public status page
///
/// The API returns a flat object; related settings are grouped here into
/// flattened sub-structures. Fields the model does not know about are kept
/// in `extra` so nothing is lost when the page is serialized again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_score: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub subscriptions: SubscriptionSettings,

    #[serde(flatten)]
    pub styling: PageStyling,

    #[serde(flatten)]
    pub branding: PageBranding,

    #[serde(flatten)]
    pub localization: Localization,

    #[serde(flatten)]
    pub access: AccessSettings,

    #[serde(flatten)]
    pub notifications: NotificationSettings,

    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for Page {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("id", &self.id)?;
        require_non_empty("name", &self.name)?;
        if let Some(score) = self.activity_score {
            if score < 0 {
                return Err(format!("activity_score must not be negative, got {}", score));
            }
        }
        Ok(())
    }
}

impl ExtraFields for Page {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

/// Which kinds of subscribers a page accepts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_email_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_sms_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_webhook_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_rss_atom_feeds: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_page_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_incident_subscribers: Option<bool>,
}

/// CSS colors used to render the page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageStyling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_body_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_light_font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_link_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_button_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_button_hover_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_button_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_button_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_greens: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_reds: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_yellows: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_blues: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_oranges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_graph_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_spinner_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_no_data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageBranding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Localization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_from_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewers_must_be_team_members: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_restrictions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_from_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_email_footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactional_logo: Option<String>,
}

// ============================================================================
// Incidents
// ============================================================================

/// An incident reported on a status page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for Incident {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("id", &self.id)?;
        require_non_empty("name", &self.name)
    }
}

impl ExtraFields for Incident {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Interface language of a status page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLanguage {
    Ru,
    En,
}

impl std::str::FromStr for PageLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ru" => Ok(PageLanguage::Ru),
            "en" => Ok(PageLanguage::En),
            _ => Err(format!("Invalid language '{}'. Use 'ru' or 'en'", s)),
        }
    }
}

/// Body for creating a page
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageCreateParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<PageLanguage>,
    /// Any further page attributes, sent as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::decode_entity;
    use serde_json::json;

    fn page_fixture() -> Value {
        json!({
            "id": "123",
            "name": "Test Page",
            "url": "https://example.com",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "organization_id": "org123",
            "subdomain": "test",
            "language": "en",
            "time_zone": "Europe/Moscow",
            "allow_email_subscribers": true,
            "css_greens": "#2fcc66",
            "headline": "All systems go",
            "hidden_from_search": false,
            "notifications_from_email": "noreply@example.com",
            "activity_score": 7,
            "custom_flag": {"nested": [1, 2, 3]}
        })
    }

    #[test]
    fn test_page_groups_flat_fields() {
        let page: Page = serde_json::from_value(page_fixture()).unwrap();

        assert_eq!(page.id, "123");
        assert_eq!(page.localization.language.as_deref(), Some("en"));
        assert_eq!(page.subscriptions.allow_email_subscribers, Some(true));
        assert_eq!(page.styling.css_greens.as_deref(), Some("#2fcc66"));
        assert_eq!(page.branding.headline.as_deref(), Some("All systems go"));
        assert_eq!(page.access.hidden_from_search, Some(false));
        assert!(page.extra.contains_key("custom_flag"));
        assert!(!page.extra.contains_key("language"));
    }

    #[test]
    fn test_page_round_trip_keeps_every_field() {
        let fixture = page_fixture();
        let page: Page = serde_json::from_value(fixture.clone()).unwrap();
        assert_eq!(serde_json::to_value(&page).unwrap(), fixture);
    }

    #[test]
    fn test_page_round_trip_keeps_explicit_nulls() {
        let fixture = json!({
            "id": "1",
            "name": "x",
            "css_greens": null,
            "domain": null,
            "language": null,
            "template": null,
            "legacy_theme": null
        });
        let page: Page = decode_entity(&serde_json::to_vec(&fixture).unwrap()).unwrap();
        assert_eq!(page.domain, None);
        assert_eq!(page.styling.css_greens, None);
        assert_eq!(serde_json::to_value(&page).unwrap(), fixture);
    }

    #[test]
    fn test_page_requires_id_and_name() {
        let err = decode_entity::<Page>(br#"{"name": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid response"));

        let err = decode_entity::<Page>(br#"{"id": "", "name": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("`id`"));
    }

    #[test]
    fn test_page_rejects_negative_activity_score() {
        let body = br#"{"id": "1", "name": "x", "activity_score": -3}"#;
        assert!(decode_entity::<Page>(body).is_err());
    }

    #[test]
    fn test_incident_decodes() {
        let incident: Incident = serde_json::from_value(json!({
            "id": "inc1",
            "name": "Database degraded",
            "status": "investigating",
            "impact": "major"
        }))
        .unwrap();
        assert_eq!(incident.status.as_deref(), Some("investigating"));
        assert!(incident.validate().is_ok());
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("EN".parse::<PageLanguage>(), Ok(PageLanguage::En));
        assert!("de".parse::<PageLanguage>().is_err());
    }

    #[test]
    fn test_create_params_flatten_extra() {
        let mut extra = Map::new();
        extra.insert("headline".into(), json!("Hi"));
        let params = PageCreateParams {
            name: "Status".into(),
            language: Some(PageLanguage::Ru),
            extra,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"name": "Status", "language": "ru", "headline": "Hi"})
        );
    }
}
