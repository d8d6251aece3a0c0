use pingera_sdk::{Check, CheckCreateParams, CheckFilter, CheckJob, OnDemandCheckParams};
use serde_json::{json, Value};

use super::{
    identifier, identifier_list, object, page_request, paging, positive, required_text, text,
    update_fields, window, Gateway, GatewayResult,
};
use crate::envelope::ErrorRecord;
use crate::params::{
    CheckIdParams, CheckResultsParams, CreateCheckParams, ExecuteCustomCheckParams, JobIdParams,
    ListChecksParams, PagingParams, UnifiedResultsParams, UnifiedStatsParams, UpdateCheckParams,
};

const UNIFIED_PAGE_SIZE: u32 = 100;
const DEFAULT_CHECK_TYPE: &str = "web";
const DEFAULT_ON_DEMAND_TIMEOUT: u64 = 30;

impl Gateway {
    pub async fn list_checks(&self, params: ListChecksParams) -> GatewayResult<Value> {
        let request = page_request(params.page, params.page_size, "page_size")?;
        let filter = CheckFilter {
            check_type: text("type", params.check_type)?,
            status: text("status", params.status)?,
        };
        let list = self.client.checks().list(request, &filter).await?;
        Ok(list.to_json("checks"))
    }

    pub async fn get_check_details(&self, params: CheckIdParams) -> GatewayResult<Check> {
        let check_id = identifier("check_id", params.check_id)?;
        Ok(self.client.checks().get(&check_id).await?)
    }

    pub async fn get_check_results(&self, params: CheckResultsParams) -> GatewayResult<Value> {
        let check_id = identifier("check_id", params.check_id)?;
        let request = page_request(params.page, params.page_size, "page_size")?;
        let window = window(params.from_date, params.to_date)?;
        let list = self
            .client
            .checks()
            .results(&check_id, &window, request)
            .await?;

        let mut value = list.to_json("results");
        value["check_id"] = json!(check_id);
        Ok(value)
    }

    pub async fn get_check_statistics(&self, params: CheckIdParams) -> GatewayResult<Value> {
        let check_id = identifier("check_id", params.check_id)?;
        let statistics = self.client.checks().stats(&check_id).await?;
        Ok(json!({
            "check_id": check_id,
            "statistics": statistics,
        }))
    }

    pub async fn list_check_jobs(&self, params: PagingParams) -> GatewayResult<Value> {
        let request = page_request(params.page, params.page_size, "page_size")?;
        let list = self.client.checks().jobs(request).await?;
        Ok(list.to_json("jobs"))
    }

    pub async fn get_check_job_details(&self, params: JobIdParams) -> GatewayResult<CheckJob> {
        let job_id = identifier("job_id", params.job_id)?;
        Ok(self.client.checks().job(&job_id).await?)
    }

    pub async fn get_unified_results(&self, params: UnifiedResultsParams) -> GatewayResult<Value> {
        let check_ids = identifier_list("check_ids", params.check_ids)?;
        let window = window(params.from_date, params.to_date)?;
        let status = text("status", params.status)?;
        let request = paging(params.page, params.page_size, "page_size", UNIFIED_PAGE_SIZE)?;
        let list = self
            .client
            .checks()
            .unified_results(&check_ids, &window, status.as_deref(), request)
            .await?;

        let mut value = list.to_json("results");
        value["check_ids"] = json!(check_ids);
        Ok(value)
    }

    pub async fn get_unified_statistics(&self, params: UnifiedStatsParams) -> GatewayResult<Value> {
        let check_ids = identifier_list("check_ids", params.check_ids)?;
        let window = window(params.from_date, params.to_date)?;
        let statistics = self
            .client
            .checks()
            .unified_stats(&check_ids, &window)
            .await?;
        Ok(json!({
            "check_ids": check_ids,
            "statistics": statistics,
        }))
    }

    pub async fn create_check(&self, params: CreateCheckParams) -> GatewayResult<Check> {
        self.ensure_writable("create_check")?;

        let name = text("name", params.name)?;
        let check_type = text("type", params.check_type)?.map(|t| t.to_ascii_lowercase());
        let (Some(name), Some(check_type)) = (name, check_type) else {
            return Err(ErrorRecord::invalid_params("name and type are required"));
        };
        let url = text("url", params.url)?;
        let host = text("host", params.host)?;
        if url.is_none() && host.is_none() {
            return Err(ErrorRecord::invalid_params(
                "either url or host must be provided",
            ));
        }
        let port = positive("port", params.port)?
            .map(u16::try_from)
            .transpose()
            .map_err(|_| ErrorRecord::invalid_params("port must be between 1 and 65535"))?;

        let request = CheckCreateParams {
            name,
            check_type,
            url,
            host,
            port,
            interval: positive("interval", params.interval)?,
            timeout: positive("timeout", params.timeout)?,
        };
        let check = self.client.checks().create(&request).await?;
        tracing::info!(check_id = %check.id, "created check");
        Ok(check)
    }

    /// Replace a check's configuration (PUT)
    pub async fn update_check(&self, params: UpdateCheckParams) -> GatewayResult<Check> {
        self.ensure_writable("update_check")?;
        let check_id = identifier("check_id", params.check_id)?;
        let fields = update_fields(params.fields)?;
        let check = self.client.checks().update(&check_id, &fields).await?;
        tracing::info!(check_id = %check_id, "updated check");
        Ok(check)
    }

    pub async fn delete_check(&self, params: CheckIdParams) -> GatewayResult<Value> {
        self.ensure_writable("delete_check")?;
        let check_id = identifier("check_id", params.check_id)?;
        self.client.checks().delete(&check_id).await?;
        Ok(json!({
            "check_id": check_id,
            "message": format!("Check {} deleted successfully", check_id),
        }))
    }

    pub async fn pause_check(&self, params: CheckIdParams) -> GatewayResult<Value> {
        self.ensure_writable("pause_check")?;
        let check_id = identifier("check_id", params.check_id)?;
        let response = self.client.checks().pause(&check_id).await?;
        Ok(json!({
            "check_id": check_id,
            "message": format!("Check {} paused", check_id),
            "response": response,
        }))
    }

    pub async fn resume_check(&self, params: CheckIdParams) -> GatewayResult<Value> {
        self.ensure_writable("resume_check")?;
        let check_id = identifier("check_id", params.check_id)?;
        let response = self.client.checks().resume(&check_id).await?;
        Ok(json!({
            "check_id": check_id,
            "message": format!("Check {} resumed", check_id),
            "response": response,
        }))
    }

    // ========================================================================
    // On-demand runs
    // ========================================================================

    /// Run an ad-hoc check against a URL; answers with the queued job
    pub async fn execute_custom_check(
        &self,
        params: ExecuteCustomCheckParams,
    ) -> GatewayResult<CheckJob> {
        self.ensure_writable("execute_custom_check")?;

        let url = required_text("url", params.url)?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ErrorRecord::invalid_params(format!(
                "url must start with http:// or https://, got '{}'",
                url
            )));
        }
        let check_type = text("type", params.check_type)?
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_CHECK_TYPE.to_string());
        let name = text("name", params.name)?
            .unwrap_or_else(|| format!("On-demand check for {}", url));

        let request = OnDemandCheckParams {
            timeout: positive("timeout", params.timeout)?.unwrap_or(DEFAULT_ON_DEMAND_TIMEOUT),
            parameters: object("parameters", params.parameters)?.unwrap_or_default(),
            url,
            check_type,
            name,
        };
        let job = self.client.checks().execute(&request).await?;
        tracing::info!(job_id = %job.id, url = %request.url, "queued on-demand check");
        Ok(job)
    }

    pub async fn execute_existing_check(&self, params: CheckIdParams) -> GatewayResult<CheckJob> {
        self.ensure_writable("execute_existing_check")?;
        let check_id = identifier("check_id", params.check_id)?;
        let job = self.client.checks().execute_existing(&check_id).await?;
        tracing::info!(job_id = %job.id, check_id = %check_id, "queued check run");
        Ok(job)
    }

    pub async fn get_on_demand_job_status(&self, params: JobIdParams) -> GatewayResult<CheckJob> {
        self.get_check_job_details(params).await
    }

    pub async fn list_on_demand_checks(&self, params: PagingParams) -> GatewayResult<Value> {
        let request = page_request(params.page, params.page_size, "page_size")?;
        let list = self.client.checks().on_demand(request).await?;
        Ok(list.to_json("checks"))
    }
}
