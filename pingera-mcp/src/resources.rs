//! Read-only MCP resources.
//!
//! - `pingera://pages` - first page of status pages
//! - `pingera://pages/{page_id}` - one status page
//! - `pingera://status` - server mode, API reachability and features

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceTemplate};

use crate::envelope::Envelope;
use crate::gateway::Gateway;
use crate::params::{ListPagesParams, PageIdParams};

pub const PAGES_URI: &str = "pingera://pages";
pub const PAGE_URI_TEMPLATE: &str = "pingera://pages/{page_id}";
pub const STATUS_URI: &str = "pingera://status";

const PAGE_URI_PREFIX: &str = "pingera://pages/";
const JSON_MIME: &str = "application/json";

/// A resource URI resolved to what it addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRequest {
    Pages,
    Page(String),
    Status,
}

impl ResourceRequest {
    /// `None` for URIs outside the `pingera://` namespace this server knows.
    /// Page ids are not validated here; reading an invalid one yields an
    /// `invalid_params` envelope.
    pub fn parse(uri: &str) -> Option<Self> {
        match uri {
            PAGES_URI => Some(Self::Pages),
            STATUS_URI => Some(Self::Status),
            _ => uri
                .strip_prefix(PAGE_URI_PREFIX)
                .map(|id| Self::Page(id.to_string())),
        }
    }
}

fn resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut raw = RawResource::new(uri, name);
    raw.description = Some(description.to_string());
    raw.mime_type = Some(JSON_MIME.to_string());
    raw.no_annotation()
}

/// Static resources
pub fn list() -> Vec<Resource> {
    vec![
        resource(
            PAGES_URI,
            "Status pages",
            "Status pages of the Pingera account (first 20)",
        ),
        resource(
            STATUS_URI,
            "Server status",
            "Operation mode, API connectivity and enabled features",
        ),
    ]
}

/// Parameterized resources
pub fn templates() -> Vec<ResourceTemplate> {
    vec![RawResourceTemplate {
        uri_template: PAGE_URI_TEMPLATE.to_string(),
        name: "Status page".to_string(),
        title: None,
        description: Some("A single status page with all of its settings".to_string()),
        mime_type: Some(JSON_MIME.to_string()),
    }
    .no_annotation()]
}

pub async fn read(gateway: &Gateway, request: ResourceRequest) -> Envelope {
    match request {
        ResourceRequest::Pages => gateway.list_pages(ListPagesParams::default()).await.into(),
        ResourceRequest::Page(page_id) => gateway
            .get_page_details(PageIdParams::new(page_id))
            .await
            .into(),
        ResourceRequest::Status => gateway.status().await.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_uris() {
        assert_eq!(ResourceRequest::parse("pingera://pages"), Some(ResourceRequest::Pages));
        assert_eq!(ResourceRequest::parse("pingera://status"), Some(ResourceRequest::Status));
        assert_eq!(
            ResourceRequest::parse("pingera://pages/abc-1"),
            Some(ResourceRequest::Page("abc-1".to_string()))
        );
    }

    #[test]
    fn test_parse_keeps_bad_page_ids_for_validation() {
        assert_eq!(
            ResourceRequest::parse("pingera://pages/"),
            Some(ResourceRequest::Page(String::new()))
        );
        assert_eq!(
            ResourceRequest::parse("pingera://pages/a/b"),
            Some(ResourceRequest::Page("a/b".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_uris() {
        assert_eq!(ResourceRequest::parse("pingera://checks"), None);
        assert_eq!(ResourceRequest::parse("file:///etc/passwd"), None);
        assert_eq!(ResourceRequest::parse(""), None);
    }

    #[test]
    fn test_listing_is_json() {
        let resources = list();
        assert_eq!(resources.len(), 2);
        assert!(resources
            .iter()
            .all(|r| r.raw.mime_type.as_deref() == Some(JSON_MIME)));

        let templates = templates();
        assert_eq!(templates[0].raw.uri_template, PAGE_URI_TEMPLATE);
    }

    #[test]
    fn test_read_invalid_page_id_is_invalid_params() {
        let settings = std::sync::Arc::new(crate::config::Settings::new("test-key"));
        let gateway = Gateway::new(settings).unwrap();

        let envelope = tokio_test::block_on(read(
            &gateway,
            ResourceRequest::Page("a/b".to_string()),
        ));
        assert!(!envelope.ok);
        assert_eq!(
            envelope.error_kind(),
            Some(pingera_sdk::ErrorKind::InvalidParams)
        );
    }
}
