use pingera_sdk::{ApiInfo, Page, PageCreateParams, PageLanguage};
use serde::Serialize;
use serde_json::{json, Value};

use super::{
    identifier, object, page_request, required_text, text, update_fields, Gateway, GatewayResult,
};
use crate::config::OperationMode;
use crate::envelope::ErrorRecord;
use crate::params::{
    CreatePageParams, ListIncidentsParams, ListPagesParams, PageIdParams, UpdatePageParams,
};

/// Result of `test_pingera_connection`
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    pub connected: bool,
    pub api_info: ApiInfo,
    pub server_mode: OperationMode,
}

impl Gateway {
    /// Contents of the `pingera://status` resource
    pub async fn status(&self) -> GatewayResult<Value> {
        let api_info = self.client.api_info().await;
        Ok(json!({
            "mode": self.mode(),
            "server_name": self.settings.server_name,
            "api_info": api_info,
            "features": self.features(),
        }))
    }

    pub async fn test_connection(&self) -> GatewayResult<ConnectionReport> {
        let api_info = self.client.api_info().await;
        Ok(ConnectionReport {
            connected: api_info.connected,
            api_info,
            server_mode: self.mode(),
        })
    }

    pub async fn list_pages(&self, params: ListPagesParams) -> GatewayResult<Value> {
        let request = page_request(params.page, params.per_page, "per_page")?;
        let status = text("status", params.status)?;
        tracing::debug!(page = request.page, per_page = request.per_page, ?status, "listing pages");

        let list = self.client.get_pages(request, status.as_deref()).await?;
        Ok(list.to_json("pages"))
    }

    pub async fn get_page_details(&self, params: PageIdParams) -> GatewayResult<Page> {
        let page_id = identifier("page_id", params.page_id)?;
        Ok(self.client.get_page(&page_id).await?)
    }

    pub async fn list_incidents(&self, params: ListIncidentsParams) -> GatewayResult<Value> {
        let page_id = identifier("page_id", params.page_id)?;
        let request = page_request(params.page, params.per_page, "per_page")?;
        let list = self.client.pages().incidents(&page_id, request).await?;
        Ok(list.to_json("incidents"))
    }

    pub async fn create_page(&self, params: CreatePageParams) -> GatewayResult<Page> {
        self.ensure_writable("create_page")?;

        let name = required_text("name", params.name)?;
        let language = text("language", params.language)?
            .map(|l| l.parse::<PageLanguage>())
            .transpose()
            .map_err(ErrorRecord::invalid_params)?;

        let request = PageCreateParams {
            name,
            subdomain: text("subdomain", params.subdomain)?,
            domain: text("domain", params.domain)?,
            url: text("url", params.url)?,
            language,
            extra: object("extra", params.extra)?.unwrap_or_default(),
        };
        let page = self.client.pages().create(&request).await?;
        tracing::info!(page_id = %page.id, "created page");
        Ok(page)
    }

    /// Replace page attributes (PUT)
    pub async fn update_page(&self, params: UpdatePageParams) -> GatewayResult<Page> {
        self.ensure_writable("update_page")?;
        let page_id = identifier("page_id", params.page_id)?;
        let fields = update_fields(params.fields)?;
        Ok(self.client.pages().update(&page_id, &fields).await?)
    }

    /// Change selected page attributes (PATCH)
    pub async fn patch_page(&self, params: UpdatePageParams) -> GatewayResult<Page> {
        self.ensure_writable("patch_page")?;
        let page_id = identifier("page_id", params.page_id)?;
        let fields = update_fields(params.fields)?;
        Ok(self.client.pages().patch(&page_id, &fields).await?)
    }

    pub async fn delete_page(&self, params: PageIdParams) -> GatewayResult<Value> {
        self.ensure_writable("delete_page")?;
        let page_id = identifier("page_id", params.page_id)?;
        self.client.pages().delete(&page_id).await?;
        tracing::info!(page_id = %page_id, "deleted page");
        Ok(json!({
            "page_id": page_id,
            "message": format!("Page {} deleted successfully", page_id),
        }))
    }
}
