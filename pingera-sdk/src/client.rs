//! Pingera API client

use crate::checks::{
    Check, CheckCreateParams, CheckFilter, CheckJob, CheckResult, OnDemandCheckParams,
    ResultWindow,
};
use crate::components::{Component, ComponentParams};
use crate::error::{PingeraError, PingeraResult, RetryConfig};
use crate::heartbeats::{Heartbeat, HeartbeatCreateParams, HeartbeatLog};
use crate::pages::{Incident, Page, PageCreateParams, PageList};
use crate::pagination::{
    decode_all, decode_entity, decode_list, ExtraFields, PageRequest, Paginated, Validate,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://api.pingera.ru/v1";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_VERSION: &str = "v1";

const DEFAULT_API_MESSAGE: &str = "Pingera.ru API";

type Query = Vec<(&'static str, String)>;

type Fields = serde_json::Map<String, serde_json::Value>;

/// Check that an identifier is safe to embed as a URL path segment
pub fn validate_identifier(field: &str, value: &str) -> PingeraResult<()> {
    if value.is_empty() {
        return Err(PingeraError::InvalidRequest(format!(
            "{} must not be empty",
            field
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(PingeraError::InvalidRequest(format!(
            "Invalid {}: {}",
            field, value
        )));
    }
    Ok(())
}

// ============================================================================
// API Info
// ============================================================================

/// Reachability and metadata reported by the API root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub connected: bool,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub api_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Shape of the API root document
#[derive(Debug, Default, Deserialize)]
struct RootDocument {
    message: Option<String>,
    authentication: Option<String>,
    documentation: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Pingera API client
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone)]
pub struct PingeraClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl std::fmt::Debug for PingeraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingeraClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("retry_config", &self.retry_config)
            .finish()
    }
}

impl PingeraClient {
    /// Create a new client with an explicit API key
    pub fn new(api_key: impl Into<String>) -> PingeraResult<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a builder for more advanced configuration
    pub fn builder() -> PingeraClientBuilder {
        PingeraClientBuilder::new()
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get a handle to the status pages API
    pub fn pages(&self) -> Pages<'_> {
        Pages { client: self }
    }

    /// Get a handle to the components API
    pub fn components(&self) -> Components<'_> {
        Components { client: self }
    }

    /// Get a handle to the checks API
    pub fn checks(&self) -> Checks<'_> {
        Checks { client: self }
    }

    /// Get a handle to the heartbeats API
    pub fn heartbeats(&self) -> Heartbeats<'_> {
        Heartbeats { client: self }
    }

    /// List status pages. Shortcut for `pages().list(..)`.
    pub async fn get_pages(
        &self,
        request: PageRequest,
        status: Option<&str>,
    ) -> PingeraResult<PageList> {
        self.pages().list(request, status).await
    }

    /// Fetch one status page. Shortcut for `pages().get(..)`.
    pub async fn get_page(&self, page_id: &str) -> PingeraResult<Page> {
        self.pages().get(page_id).await
    }

    /// Report whether the API root answers successfully
    pub async fn test_connection(&self) -> bool {
        self.api_info().await.connected
    }

    /// Query the API root. Failures are reported in the result, never raised.
    pub async fn api_info(&self) -> ApiInfo {
        let result = self
            .request(Method::GET, &[""], Vec::new(), None::<&()>)
            .await;

        match result {
            Ok(body) => {
                let root: RootDocument = serde_json::from_slice(&body).unwrap_or_default();
                ApiInfo {
                    connected: true,
                    base_url: self.base_url().to_string(),
                    message: Some(root.message.unwrap_or_else(|| DEFAULT_API_MESSAGE.to_string())),
                    authentication: root.authentication,
                    documentation: root.documentation,
                    api_version: API_VERSION.to_string(),
                    error: None,
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "connection test failed");
                ApiInfo {
                    connected: false,
                    base_url: self.base_url().to_string(),
                    message: None,
                    authentication: None,
                    documentation: None,
                    api_version: API_VERSION.to_string(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn endpoint(&self, segments: &[&str]) -> PingeraResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                PingeraError::Configuration(format!("Base URL cannot hold a path: {}", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn get_entity<T>(&self, segments: &[&str]) -> PingeraResult<T>
    where
        T: DeserializeOwned + Validate + ExtraFields,
    {
        let body = self
            .request(Method::GET, segments, Vec::new(), None::<&()>)
            .await?;
        decode_entity(&body)
    }

    async fn get_list<T>(
        &self,
        segments: &[&str],
        query: Query,
        request: PageRequest,
    ) -> PingeraResult<Paginated<T>>
    where
        T: DeserializeOwned + Validate + ExtraFields,
    {
        let body = self.request(Method::GET, segments, query, None::<&()>).await?;
        decode_list(&body, request)
    }

    /// GET a free-form document such as statistics
    async fn get_json(&self, segments: &[&str], query: Query) -> PingeraResult<serde_json::Value> {
        let body = self.request(Method::GET, segments, query, None::<&()>).await?;
        serde_json::from_slice(&body)
            .map_err(|e| PingeraError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    async fn send_entity<T, B>(&self, method: Method, segments: &[&str], body: &B) -> PingeraResult<T>
    where
        T: DeserializeOwned + Validate + ExtraFields,
        B: Serialize + ?Sized,
    {
        let body = self.request(method, segments, Vec::new(), Some(body)).await?;
        decode_entity(&body)
    }

    /// Fire an action endpoint; an empty body decodes to `Null`
    async fn send_action(&self, method: Method, segments: &[&str]) -> PingeraResult<serde_json::Value> {
        let body = self
            .request(method, segments, Vec::new(), None::<&()>)
            .await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&body)
            .map_err(|e| PingeraError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    /// Issue a request under the overall deadline
    async fn request<B>(
        &self,
        method: Method,
        segments: &[&str],
        query: Query,
        body: Option<&B>,
    ) -> PingeraResult<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        match tokio::time::timeout(self.timeout, self.execute_with_retry(method, url, &query, body))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(PingeraError::Timeout(self.timeout)),
        }
    }

    /// Execute a request with automatic retry
    ///
    /// Only safe methods are retried, on connection errors, timeouts,
    /// 429 and 5xx. A `Retry-After` header overrides the backoff delay.
    async fn execute_with_retry<B>(
        &self,
        method: Method,
        url: Url,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> PingeraResult<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let max_retries = if method.is_safe() {
            self.retry_config.max_retries
        } else {
            0
        };
        let mut last_error: Option<PingeraError> = None;

        for attempt in 0..=max_retries {
            tracing::debug!(method = %method, url = %url, attempt, "sending request");

            let mut request = self.client.request(method.clone(), url.clone()).query(query);
            if let Some(b) = body {
                request = request.json(b);
            }

            let error = match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let bytes = response
                            .bytes()
                            .await
                            .map_err(|e| PingeraError::from_reqwest_error(e, self.timeout))?;
                        return Ok(bytes.to_vec());
                    }

                    let retry_after = RetryConfig::parse_retry_after(response.headers());
                    let error_body = response.text().await.unwrap_or_default();
                    let error = PingeraError::from_status(status.as_u16(), &error_body);

                    if attempt < max_retries && error.is_retryable() {
                        let delay = self.retry_config.retry_delay(attempt, retry_after);
                        tracing::warn!(status = status.as_u16(), attempt, ?delay, "retrying request");
                        tokio::time::sleep(delay).await;
                        last_error = Some(error);
                        continue;
                    }
                    error
                }
                Err(e) => {
                    let error = PingeraError::from_reqwest_error(e, self.timeout);

                    if attempt < max_retries && error.is_retryable() {
                        let delay = self.retry_config.delay_for_attempt(attempt);
                        tracing::warn!(error = %error, attempt, ?delay, "retrying request");
                        tokio::time::sleep(delay).await;
                        last_error = Some(error);
                        continue;
                    }
                    error
                }
            };

            tracing::debug!(method = %method, url = %url, error = %error, "request failed");
            return Err(error);
        }

        Err(last_error
            .unwrap_or_else(|| PingeraError::Connection("Max retries exceeded".to_string())))
    }
}

/// Builder for Pingera client configuration
///
/// The `api_key` is required - call [`Self::build()`] to create the client.
pub struct PingeraClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    retry_config: Option<RetryConfig>,
}

impl PingeraClientBuilder {
    fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: None,
            retry_config: None,
        }
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a custom base URL (default: `https://api.pingera.ru/v1`)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the deadline for a whole call, retries included
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries (default: 3)
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        let mut config = self.retry_config.take().unwrap_or_default();
        config.max_retries = max_retries;
        self.retry_config = Some(config);
        self
    }

    /// Set custom retry configuration
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = Some(config);
        self
    }

    /// Build the client
    pub fn build(self) -> PingeraResult<PingeraClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PingeraError::Configuration("API key is required".to_string()))?;

        let raw_base = self.base_url.as_deref().unwrap_or(DEFAULT_API_BASE);
        let base_url = Url::parse(raw_base.trim_end_matches('/')).map_err(|e| {
            PingeraError::Configuration(format!("Invalid base URL {}: {}", raw_base, e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(PingeraError::Configuration(format!(
                "Base URL must use http or https: {}",
                raw_base
            )));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(build_headers(&api_key)?)
            .build()
            .map_err(|e| {
                PingeraError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(PingeraClient {
            client,
            base_url,
            timeout,
            retry_config: self.retry_config.unwrap_or_default(),
        })
    }
}

fn build_headers(api_key: &str) -> PingeraResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(api_key)
        .map_err(|_| PingeraError::Configuration("Invalid API key format".to_string()))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("pingera-mcp/", env!("CARGO_PKG_VERSION"))),
    );

    Ok(headers)
}

// ============================================================================
// Pages API
// ============================================================================

/// Status pages API handle
pub struct Pages<'a> {
    client: &'a PingeraClient,
}

impl<'a> Pages<'a> {
    /// List pages, optionally filtered by status
    pub async fn list(&self, request: PageRequest, status: Option<&str>) -> PingeraResult<PageList> {
        let mut query = vec![
            ("page", request.page.to_string()),
            ("per_page", request.per_page.to_string()),
        ];
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        self.client.get_list(&["pages"], query, request).await
    }

    pub async fn get(&self, page_id: &str) -> PingeraResult<Page> {
        validate_identifier("page ID", page_id)?;
        self.client.get_entity(&["pages", page_id]).await
    }

    pub async fn create(&self, params: &PageCreateParams) -> PingeraResult<Page> {
        if params.name.trim().is_empty() {
            return Err(PingeraError::InvalidRequest("name must not be empty".to_string()));
        }
        self.client
            .send_entity(Method::POST, &["pages"], params)
            .await
    }

    /// Replace a page's attributes (PUT)
    pub async fn update(
        &self,
        page_id: &str,
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> PingeraResult<Page> {
        validate_identifier("page ID", page_id)?;
        self.client
            .send_entity(Method::PUT, &["pages", page_id], fields)
            .await
    }

    /// Change selected attributes of a page (PATCH)
    pub async fn patch(
        &self,
        page_id: &str,
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> PingeraResult<Page> {
        validate_identifier("page ID", page_id)?;
        if fields.is_empty() {
            return Err(PingeraError::InvalidRequest(
                "No fields provided for update".to_string(),
            ));
        }
        self.client
            .send_entity(Method::PATCH, &["pages", page_id], fields)
            .await
    }

    pub async fn delete(&self, page_id: &str) -> PingeraResult<()> {
        validate_identifier("page ID", page_id)?;
        self.client
            .send_action(Method::DELETE, &["pages", page_id])
            .await
            .map(|_| ())
    }

    /// List incidents reported on a page
    pub async fn incidents(
        &self,
        page_id: &str,
        request: PageRequest,
    ) -> PingeraResult<Paginated<Incident>> {
        validate_identifier("page ID", page_id)?;
        let query = vec![
            ("page", request.page.to_string()),
            ("per_page", request.per_page.to_string()),
        ];
        self.client
            .get_list(&["pages", page_id, "incidents"], query, request)
            .await
    }
}

// ============================================================================
// Components API
// ============================================================================

/// Components API handle
pub struct Components<'a> {
    client: &'a PingeraClient,
}

impl<'a> Components<'a> {
    pub async fn list(&self, page_id: &str, show_deleted: bool) -> PingeraResult<Vec<Component>> {
        validate_identifier("page ID", page_id)?;
        let mut query = Vec::new();
        if show_deleted {
            query.push(("show_deleted", "true".to_string()));
        }
        let body = self
            .client
            .request(Method::GET, &["pages", page_id, "components"], query, None::<&()>)
            .await?;
        decode_all(&body)
    }

    pub async fn get(&self, page_id: &str, component_id: &str) -> PingeraResult<Component> {
        validate_identifier("page ID", page_id)?;
        validate_identifier("component ID", component_id)?;
        self.client
            .get_entity(&["pages", page_id, "components", component_id])
            .await
    }

    pub async fn create(&self, page_id: &str, params: &ComponentParams) -> PingeraResult<Component> {
        validate_identifier("page ID", page_id)?;
        if params.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            return Err(PingeraError::InvalidRequest("name must not be empty".to_string()));
        }
        self.client
            .send_entity(Method::POST, &["pages", page_id, "components"], params)
            .await
    }

    pub async fn update(
        &self,
        page_id: &str,
        component_id: &str,
        params: &ComponentParams,
    ) -> PingeraResult<Component> {
        validate_identifier("page ID", page_id)?;
        validate_identifier("component ID", component_id)?;
        if params.is_empty() {
            return Err(PingeraError::InvalidRequest(
                "No fields provided for update".to_string(),
            ));
        }
        self.client
            .send_entity(
                Method::PATCH,
                &["pages", page_id, "components", component_id],
                params,
            )
            .await
    }

    pub async fn delete(&self, page_id: &str, component_id: &str) -> PingeraResult<()> {
        validate_identifier("page ID", page_id)?;
        validate_identifier("component ID", component_id)?;
        self.client
            .send_action(Method::DELETE, &["pages", page_id, "components", component_id])
            .await
            .map(|_| ())
    }
}

// ============================================================================
// Checks API
// ============================================================================

/// Checks API handle
pub struct Checks<'a> {
    client: &'a PingeraClient,
}

impl<'a> Checks<'a> {
    pub async fn list(
        &self,
        request: PageRequest,
        filter: &CheckFilter,
    ) -> PingeraResult<Paginated<Check>> {
        let mut query = vec![
            ("page", request.page.to_string()),
            ("page_size", request.per_page.to_string()),
        ];
        if let Some(check_type) = &filter.check_type {
            query.push(("type", check_type.clone()));
        }
        if let Some(status) = &filter.status {
            query.push(("status", status.clone()));
        }
        self.client.get_list(&["checks"], query, request).await
    }

    pub async fn get(&self, check_id: &str) -> PingeraResult<Check> {
        validate_identifier("check ID", check_id)?;
        self.client.get_entity(&["checks", check_id]).await
    }

    /// Historical results of a check within an optional time window
    pub async fn results(
        &self,
        check_id: &str,
        window: &ResultWindow,
        request: PageRequest,
    ) -> PingeraResult<Paginated<CheckResult>> {
        validate_identifier("check ID", check_id)?;
        let mut query = vec![
            ("page", request.page.to_string()),
            ("page_size", request.per_page.to_string()),
        ];
        window.push_query(&mut query);
        self.client
            .get_list(&["checks", check_id, "results"], query, request)
            .await
    }

    pub async fn create(&self, params: &CheckCreateParams) -> PingeraResult<Check> {
        if params.name.trim().is_empty() || params.check_type.trim().is_empty() {
            return Err(PingeraError::InvalidRequest(
                "name and type are required".to_string(),
            ));
        }
        self.client
            .send_entity(Method::POST, &["checks"], params)
            .await
    }

    /// Replace a check's configuration (PUT)
    pub async fn update(&self, check_id: &str, fields: &Fields) -> PingeraResult<Check> {
        validate_identifier("check ID", check_id)?;
        if fields.is_empty() {
            return Err(PingeraError::InvalidRequest(
                "No fields provided for update".to_string(),
            ));
        }
        self.client
            .send_entity(Method::PUT, &["checks", check_id], fields)
            .await
    }

    /// Aggregated statistics of one check
    pub async fn stats(&self, check_id: &str) -> PingeraResult<serde_json::Value> {
        validate_identifier("check ID", check_id)?;
        self.client
            .get_json(&["checks", check_id, "stats"], Vec::new())
            .await
    }

    pub async fn jobs(&self, request: PageRequest) -> PingeraResult<Paginated<CheckJob>> {
        let query = vec![
            ("page", request.page.to_string()),
            ("page_size", request.per_page.to_string()),
        ];
        self.client
            .get_list(&["checks", "jobs"], query, request)
            .await
    }

    pub async fn job(&self, job_id: &str) -> PingeraResult<CheckJob> {
        validate_identifier("job ID", job_id)?;
        self.client.get_entity(&["checks", "jobs", job_id]).await
    }

    /// Results of several checks merged into one timeline
    pub async fn unified_results(
        &self,
        check_ids: &[String],
        window: &ResultWindow,
        status: Option<&str>,
        request: PageRequest,
    ) -> PingeraResult<Paginated<CheckResult>> {
        let mut query = unified_query(check_ids)?;
        window.push_query(&mut query);
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        query.push(("page", request.page.to_string()));
        query.push(("page_size", request.per_page.to_string()));
        self.client
            .get_list(&["checks", "unified", "results"], query, request)
            .await
    }

    pub async fn unified_stats(
        &self,
        check_ids: &[String],
        window: &ResultWindow,
    ) -> PingeraResult<serde_json::Value> {
        let mut query = unified_query(check_ids)?;
        window.push_query(&mut query);
        self.client
            .get_json(&["checks", "unified", "results", "stats"], query)
            .await
    }

    /// Run an ad-hoc check; the API answers with the queued job
    pub async fn execute(&self, params: &OnDemandCheckParams) -> PingeraResult<CheckJob> {
        if params.url.trim().is_empty() {
            return Err(PingeraError::InvalidRequest("url must not be empty".to_string()));
        }
        self.client
            .send_entity(Method::POST, &["checks", "execute"], params)
            .await
    }

    /// Run a stored check now, outside its schedule
    pub async fn execute_existing(&self, check_id: &str) -> PingeraResult<CheckJob> {
        validate_identifier("check ID", check_id)?;
        self.client
            .send_entity(Method::POST, &["checks", check_id, "execute"], &serde_json::json!({}))
            .await
    }

    /// Ad-hoc checks executed so far
    pub async fn on_demand(&self, request: PageRequest) -> PingeraResult<Paginated<CheckJob>> {
        let query = vec![
            ("page", request.page.to_string()),
            ("page_size", request.per_page.to_string()),
        ];
        self.client
            .get_list(&["on-demand", "checks"], query, request)
            .await
    }

    pub async fn delete(&self, check_id: &str) -> PingeraResult<()> {
        validate_identifier("check ID", check_id)?;
        self.client
            .send_action(Method::DELETE, &["checks", check_id])
            .await
            .map(|_| ())
    }

    /// Stop scheduling a check; returns whatever the API echoes back
    pub async fn pause(&self, check_id: &str) -> PingeraResult<serde_json::Value> {
        validate_identifier("check ID", check_id)?;
        self.client
            .send_action(Method::POST, &["checks", check_id, "pause"])
            .await
    }

    pub async fn resume(&self, check_id: &str) -> PingeraResult<serde_json::Value> {
        validate_identifier("check ID", check_id)?;
        self.client
            .send_action(Method::POST, &["checks", check_id, "resume"])
            .await
    }
}

// ============================================================================
// Heartbeats API
// ============================================================================

/// Heartbeats API handle
pub struct Heartbeats<'a> {
    client: &'a PingeraClient,
}

impl<'a> Heartbeats<'a> {
    pub async fn list(&self, request: PageRequest) -> PingeraResult<Paginated<Heartbeat>> {
        let query = vec![
            ("page", request.page.to_string()),
            ("page_size", request.per_page.to_string()),
        ];
        self.client.get_list(&["heartbeats"], query, request).await
    }

    pub async fn get(&self, heartbeat_id: &str) -> PingeraResult<Heartbeat> {
        validate_identifier("heartbeat ID", heartbeat_id)?;
        self.client.get_entity(&["heartbeats", heartbeat_id]).await
    }

    pub async fn create(&self, params: &HeartbeatCreateParams) -> PingeraResult<Heartbeat> {
        if params.name.trim().is_empty() {
            return Err(PingeraError::InvalidRequest("name must not be empty".to_string()));
        }
        if params.period == 0 {
            return Err(PingeraError::InvalidRequest(
                "period must be a positive integer".to_string(),
            ));
        }
        self.client
            .send_entity(Method::POST, &["heartbeats"], params)
            .await
    }

    /// Replace a heartbeat's configuration (PUT)
    pub async fn update(&self, heartbeat_id: &str, fields: &Fields) -> PingeraResult<Heartbeat> {
        validate_identifier("heartbeat ID", heartbeat_id)?;
        if fields.is_empty() {
            return Err(PingeraError::InvalidRequest(
                "No fields provided for update".to_string(),
            ));
        }
        self.client
            .send_entity(Method::PUT, &["heartbeats", heartbeat_id], fields)
            .await
    }

    pub async fn delete(&self, heartbeat_id: &str) -> PingeraResult<()> {
        validate_identifier("heartbeat ID", heartbeat_id)?;
        self.client
            .send_action(Method::DELETE, &["heartbeats", heartbeat_id])
            .await
            .map(|_| ())
    }

    /// Record a ping as if the monitored job had reported in
    pub async fn ping(&self, heartbeat_id: &str) -> PingeraResult<serde_json::Value> {
        validate_identifier("heartbeat ID", heartbeat_id)?;
        self.client
            .send_action(Method::POST, &["heartbeats", heartbeat_id, "ping"])
            .await
    }

    pub async fn logs(
        &self,
        heartbeat_id: &str,
        window: &ResultWindow,
        request: PageRequest,
    ) -> PingeraResult<Paginated<HeartbeatLog>> {
        validate_identifier("heartbeat ID", heartbeat_id)?;
        let mut query = vec![
            ("page", request.page.to_string()),
            ("page_size", request.per_page.to_string()),
        ];
        window.push_query(&mut query);
        self.client
            .get_list(&["heartbeats", heartbeat_id, "logs"], query, request)
            .await
    }
}

/// `check_ids` repeated once per id
fn unified_query(check_ids: &[String]) -> PingeraResult<Query> {
    if check_ids.is_empty() {
        return Err(PingeraError::InvalidRequest(
            "check_ids must not be empty".to_string(),
        ));
    }
    check_ids
        .iter()
        .map(|id| -> PingeraResult<(&'static str, String)> {
            validate_identifier("check ID", id)?;
            Ok(("check_ids", id.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("page ID", "abc-123_X").is_ok());
        assert!(validate_identifier("page ID", "").is_err());
        assert!(validate_identifier("page ID", "../etc").is_err());
        assert!(validate_identifier("page ID", "a b").is_err());
    }

    #[test]
    fn test_builder_requires_api_key() {
        let err = PingeraClient::builder().build().unwrap_err();
        assert!(matches!(err, PingeraError::Configuration(_)));

        let err = PingeraClient::new("   ").unwrap_err();
        assert!(matches!(err, PingeraError::Configuration(_)));
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        let err = PingeraClient::builder()
            .api_key("k")
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, PingeraError::Configuration(_)));

        let err = PingeraClient::builder()
            .api_key("k")
            .base_url("ftp://api.pingera.ru/v1")
            .build()
            .unwrap_err();
        assert!(matches!(err, PingeraError::Configuration(_)));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let client = PingeraClient::builder()
            .api_key("k")
            .base_url("https://api.example.com/v1/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = PingeraClient::new("k").unwrap();
        let url = client.endpoint(&["pages", "abc", "components"]).unwrap();
        assert_eq!(url.as_str(), "https://api.pingera.ru/v1/pages/abc/components");

        let root = client.endpoint(&[""]).unwrap();
        assert_eq!(root.as_str(), "https://api.pingera.ru/v1/");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = PingeraClient::new("super-secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod wiremock_tests;
