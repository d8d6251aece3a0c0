//! MCP server exposing the Pingera gateway.
//!
//! Every tool answers with an [`Envelope`] as structured content. API and
//! validation failures are reported inside the envelope (`is_error: true`),
//! never as protocol errors.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Implementation, ListResourceTemplatesResult, ListResourcesResult,
    PaginatedRequestParam, ReadResourceRequestParam, ReadResourceResult, ServerCapabilities,
    ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServiceExt};

use crate::envelope::Envelope;
use crate::error::{ServerError, ServerResult};
use crate::gateway::Gateway;
use crate::params::*;
use crate::resources::{self, ResourceRequest};

const INSTRUCTIONS: &str = "Pingera monitoring: status pages, components, incidents, \
     synthetic checks and heartbeats.\n\n\
     Every tool returns {\"ok\": true, \"data\": ...} or \
     {\"ok\": false, \"error_kind\": ..., \"message\": ...}.\n\
     Start with test_pingera_connection, then list_pages. \
     Mutating tools only work when the server runs in read_write mode; \
     see pingera://status for the current mode.";

#[derive(Clone)]
pub struct PingeraServer {
    gateway: Arc<Gateway>,
    tool_router: ToolRouter<Self>,
}

fn respond<T: serde::Serialize>(result: crate::gateway::GatewayResult<T>) -> Result<CallToolResult, McpError> {
    Ok(Envelope::from(result).into_call_tool_result())
}

#[tool_router]
impl PingeraServer {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            tool_router: Self::tool_router(),
        }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    // =========================================================================
    // Connectivity
    // =========================================================================

    #[tool(
        description = "Check that the Pingera API is reachable with the configured key. Also reports the server mode.",
        annotations(read_only_hint = true)
    )]
    async fn test_pingera_connection(&self) -> Result<CallToolResult, McpError> {
        respond(self.gateway.test_connection().await)
    }

    // =========================================================================
    // Status pages
    // =========================================================================

    #[tool(
        description = "List status pages. Supports page/per_page pagination (per_page max 100) and a status filter.",
        annotations(read_only_hint = true)
    )]
    async fn list_pages(
        &self,
        Parameters(params): Parameters<ListPagesParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.list_pages(params).await)
    }

    #[tool(
        description = "Get a status page with all settings: styling, branding, localization, access and notifications.",
        annotations(read_only_hint = true)
    )]
    async fn get_page_details(
        &self,
        Parameters(params): Parameters<PageIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_page_details(params).await)
    }

    #[tool(
        description = "List incidents of a status page.",
        annotations(read_only_hint = true)
    )]
    async fn list_incidents(
        &self,
        Parameters(params): Parameters<ListIncidentsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.list_incidents(params).await)
    }

    #[tool(
        description = "Create a status page. Requires read_write mode.",
        annotations(read_only_hint = false)
    )]
    async fn create_page(
        &self,
        Parameters(params): Parameters<CreatePageParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.create_page(params).await)
    }

    #[tool(
        description = "Replace status page attributes (PUT). Requires read_write mode.",
        annotations(read_only_hint = false, idempotent_hint = true)
    )]
    async fn update_page(
        &self,
        Parameters(params): Parameters<UpdatePageParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.update_page(params).await)
    }

    #[tool(
        description = "Change selected status page attributes (PATCH). Requires read_write mode.",
        annotations(read_only_hint = false)
    )]
    async fn patch_page(
        &self,
        Parameters(params): Parameters<UpdatePageParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.patch_page(params).await)
    }

    #[tool(
        description = "Delete a status page. Requires read_write mode.",
        annotations(read_only_hint = false, destructive_hint = true)
    )]
    async fn delete_page(
        &self,
        Parameters(params): Parameters<PageIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.delete_page(params).await)
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[tool(
        description = "List the components of a status page.",
        annotations(read_only_hint = true)
    )]
    async fn list_components(
        &self,
        Parameters(params): Parameters<ListComponentsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.list_components(params).await)
    }

    #[tool(
        description = "List the component groups of a status page, each with its member components.",
        annotations(read_only_hint = true)
    )]
    async fn list_component_groups(
        &self,
        Parameters(params): Parameters<ListComponentsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.list_component_groups(params).await)
    }

    #[tool(
        description = "Get a single component of a status page.",
        annotations(read_only_hint = true)
    )]
    async fn get_component_details(
        &self,
        Parameters(params): Parameters<ComponentIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_component_details(params).await)
    }

    #[tool(
        description = "Add a component to a status page. Requires read_write mode.",
        annotations(read_only_hint = false)
    )]
    async fn create_component(
        &self,
        Parameters(params): Parameters<CreateComponentParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.create_component(params).await)
    }

    #[tool(
        description = "Update a component, e.g. its status. Requires read_write mode.",
        annotations(read_only_hint = false)
    )]
    async fn update_component(
        &self,
        Parameters(params): Parameters<UpdateComponentParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.update_component(params).await)
    }

    #[tool(
        description = "Remove a component from a status page. Requires read_write mode.",
        annotations(read_only_hint = false, destructive_hint = true)
    )]
    async fn delete_component(
        &self,
        Parameters(params): Parameters<ComponentIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.delete_component(params).await)
    }

    // =========================================================================
    // Checks
    // =========================================================================

    #[tool(
        description = "List monitoring checks, optionally filtered by type and status.",
        annotations(read_only_hint = true)
    )]
    async fn list_checks(
        &self,
        Parameters(params): Parameters<ListChecksParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.list_checks(params).await)
    }

    #[tool(
        description = "Get a single monitoring check.",
        annotations(read_only_hint = true)
    )]
    async fn get_check_details(
        &self,
        Parameters(params): Parameters<CheckIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_check_details(params).await)
    }

    #[tool(
        description = "Get historical results of a check, optionally within an RFC 3339 from_date/to_date window.",
        annotations(read_only_hint = true)
    )]
    async fn get_check_results(
        &self,
        Parameters(params): Parameters<CheckResultsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_check_results(params).await)
    }

    #[tool(
        description = "Create a monitoring check. Requires read_write mode.",
        annotations(read_only_hint = false)
    )]
    async fn create_check(
        &self,
        Parameters(params): Parameters<CreateCheckParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.create_check(params).await)
    }

    #[tool(
        description = "Delete a monitoring check. Requires read_write mode.",
        annotations(read_only_hint = false, destructive_hint = true)
    )]
    async fn delete_check(
        &self,
        Parameters(params): Parameters<CheckIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.delete_check(params).await)
    }

    #[tool(
        description = "Pause a monitoring check. Requires read_write mode.",
        annotations(read_only_hint = false, idempotent_hint = true)
    )]
    async fn pause_check(
        &self,
        Parameters(params): Parameters<CheckIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.pause_check(params).await)
    }

    #[tool(
        description = "Resume a paused monitoring check. Requires read_write mode.",
        annotations(read_only_hint = false, idempotent_hint = true)
    )]
    async fn resume_check(
        &self,
        Parameters(params): Parameters<CheckIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.resume_check(params).await)
    }

    #[tool(
        description = "Get aggregated statistics (uptime, response times) of a check.",
        annotations(read_only_hint = true)
    )]
    async fn get_check_statistics(
        &self,
        Parameters(params): Parameters<CheckIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_check_statistics(params).await)
    }

    #[tool(
        description = "List check execution jobs.",
        annotations(read_only_hint = true)
    )]
    async fn list_check_jobs(
        &self,
        Parameters(params): Parameters<PagingParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.list_check_jobs(params).await)
    }

    #[tool(
        description = "Get a check execution job, including its result once finished.",
        annotations(read_only_hint = true)
    )]
    async fn get_check_job_details(
        &self,
        Parameters(params): Parameters<JobIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_check_job_details(params).await)
    }

    #[tool(
        description = "Get results of several checks merged into one timeline. check_ids is a list (or comma-separated string); page_size defaults to 100.",
        annotations(read_only_hint = true)
    )]
    async fn get_unified_results(
        &self,
        Parameters(params): Parameters<UnifiedResultsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_unified_results(params).await)
    }

    #[tool(
        description = "Get statistics combined across several checks.",
        annotations(read_only_hint = true)
    )]
    async fn get_unified_statistics(
        &self,
        Parameters(params): Parameters<UnifiedStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_unified_statistics(params).await)
    }

    #[tool(
        description = "Replace a monitoring check's configuration (PUT). Requires read_write mode.",
        annotations(read_only_hint = false, idempotent_hint = true)
    )]
    async fn update_check(
        &self,
        Parameters(params): Parameters<UpdateCheckParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.update_check(params).await)
    }

    // =========================================================================
    // On-demand checks
    // =========================================================================

    #[tool(
        description = "Run a one-off check against a URL without saving it. Returns the queued job; poll get_on_demand_job_status for the result. Requires read_write mode.",
        annotations(read_only_hint = false)
    )]
    async fn execute_custom_check(
        &self,
        Parameters(params): Parameters<ExecuteCustomCheckParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.execute_custom_check(params).await)
    }

    #[tool(
        description = "Run a saved check now, outside its schedule. Returns the queued job. Requires read_write mode.",
        annotations(read_only_hint = false)
    )]
    async fn execute_existing_check(
        &self,
        Parameters(params): Parameters<CheckIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.execute_existing_check(params).await)
    }

    #[tool(
        description = "Get the status and result of an on-demand check job.",
        annotations(read_only_hint = true)
    )]
    async fn get_on_demand_job_status(
        &self,
        Parameters(params): Parameters<JobIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_on_demand_job_status(params).await)
    }

    #[tool(
        description = "List on-demand check runs.",
        annotations(read_only_hint = true)
    )]
    async fn list_on_demand_checks(
        &self,
        Parameters(params): Parameters<PagingParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.list_on_demand_checks(params).await)
    }

    // =========================================================================
    // Heartbeats
    // =========================================================================

    #[tool(
        description = "List heartbeat monitors (cron job and background task check-ins). The optional status filter applies to the fetched page.",
        annotations(read_only_hint = true)
    )]
    async fn list_heartbeats(
        &self,
        Parameters(params): Parameters<ListHeartbeatsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.list_heartbeats(params).await)
    }

    #[tool(
        description = "Get a single heartbeat monitor.",
        annotations(read_only_hint = true)
    )]
    async fn get_heartbeat_details(
        &self,
        Parameters(params): Parameters<HeartbeatIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_heartbeat_details(params).await)
    }

    #[tool(
        description = "Get the ping log of a heartbeat, optionally within an RFC 3339 from_date/to_date window.",
        annotations(read_only_hint = true)
    )]
    async fn get_heartbeat_logs(
        &self,
        Parameters(params): Parameters<HeartbeatLogsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.get_heartbeat_logs(params).await)
    }

    #[tool(
        description = "Create a heartbeat monitor. Requires read_write mode.",
        annotations(read_only_hint = false)
    )]
    async fn create_heartbeat(
        &self,
        Parameters(params): Parameters<CreateHeartbeatParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.create_heartbeat(params).await)
    }

    #[tool(
        description = "Replace a heartbeat monitor's configuration (PUT). Requires read_write mode.",
        annotations(read_only_hint = false, idempotent_hint = true)
    )]
    async fn update_heartbeat(
        &self,
        Parameters(params): Parameters<UpdateHeartbeatParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.update_heartbeat(params).await)
    }

    #[tool(
        description = "Delete a heartbeat monitor. Requires read_write mode.",
        annotations(read_only_hint = false, destructive_hint = true)
    )]
    async fn delete_heartbeat(
        &self,
        Parameters(params): Parameters<HeartbeatIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.delete_heartbeat(params).await)
    }

    #[tool(
        description = "Record a ping for a heartbeat as if its job had checked in. Requires read_write mode.",
        annotations(read_only_hint = false)
    )]
    async fn send_heartbeat_ping(
        &self,
        Parameters(params): Parameters<HeartbeatIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.gateway.send_heartbeat_ping(params).await)
    }
}

#[tool_handler(router = self.tool_router)]
impl rmcp::ServerHandler for PingeraServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = self.gateway.settings().server_name.clone();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info,
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(resources::list()))
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult::with_all_items(
            resources::templates(),
        ))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let Some(resource) = ResourceRequest::parse(&request.uri) else {
            return Err(McpError::resource_not_found(
                format!("Unknown resource: {}", request.uri),
                None,
            ));
        };
        tracing::debug!(uri = %request.uri, "reading resource");

        let envelope = resources::read(&self.gateway, resource).await;
        Ok(ReadResourceResult {
            contents: vec![envelope.into_resource_contents(&request.uri)],
        })
    }
}

/// Serve MCP over stdin/stdout until the client disconnects
pub async fn serve_stdio(gateway: Gateway) -> ServerResult<()> {
    let service = PingeraServer::new(gateway)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;

    let reason = service
        .waiting()
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;
    tracing::info!(?reason, "MCP session ended");
    Ok(())
}
