use pingera_sdk::{Heartbeat, HeartbeatCreateParams};
use serde_json::{json, Value};

use super::{
    identifier, object, page_request, positive, required_text, text, update_fields, window,
    Gateway, GatewayResult,
};
use crate::envelope::ErrorRecord;
use crate::params::{
    CreateHeartbeatParams, HeartbeatIdParams, HeartbeatLogsParams, ListHeartbeatsParams,
    UpdateHeartbeatParams,
};

impl Gateway {
    /// List heartbeats. The API has no status filter, so `status` narrows the
    /// fetched page and `total` then counts the matches on that page.
    pub async fn list_heartbeats(&self, params: ListHeartbeatsParams) -> GatewayResult<Value> {
        let request = page_request(params.page, params.page_size, "page_size")?;
        let status = text("status", params.status)?;
        let mut list = self.client.heartbeats().list(request).await?;

        if let Some(status) = &status {
            list.items.retain(|hb| {
                hb.status
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(status))
            });
            list.total = list.items.len() as u64;
        }

        let mut value = list.to_json("heartbeats");
        if let Some(status) = status {
            value["status"] = json!(status);
        }
        Ok(value)
    }

    pub async fn get_heartbeat_details(&self, params: HeartbeatIdParams) -> GatewayResult<Heartbeat> {
        let heartbeat_id = identifier("heartbeat_id", params.heartbeat_id)?;
        Ok(self.client.heartbeats().get(&heartbeat_id).await?)
    }

    pub async fn get_heartbeat_logs(&self, params: HeartbeatLogsParams) -> GatewayResult<Value> {
        let heartbeat_id = identifier("heartbeat_id", params.heartbeat_id)?;
        let window = window(params.from_date, params.to_date)?;
        let request = page_request(params.page, params.page_size, "page_size")?;
        let list = self
            .client
            .heartbeats()
            .logs(&heartbeat_id, &window, request)
            .await?;

        let mut value = list.to_json("logs");
        value["heartbeat_id"] = json!(heartbeat_id);
        Ok(value)
    }

    pub async fn create_heartbeat(&self, params: CreateHeartbeatParams) -> GatewayResult<Heartbeat> {
        self.ensure_writable("create_heartbeat")?;
        let name = required_text("name", params.name)?;
        let period = positive("period", params.period)?
            .ok_or_else(|| ErrorRecord::invalid_params("period is required"))?;

        let request = HeartbeatCreateParams {
            name,
            period,
            grace: positive("grace", params.grace)?,
            extra: object("extra", params.extra)?.unwrap_or_default(),
        };
        let heartbeat = self.client.heartbeats().create(&request).await?;
        tracing::info!(heartbeat_id = %heartbeat.id, "created heartbeat");
        Ok(heartbeat)
    }

    /// Replace a heartbeat's configuration (PUT)
    pub async fn update_heartbeat(&self, params: UpdateHeartbeatParams) -> GatewayResult<Heartbeat> {
        self.ensure_writable("update_heartbeat")?;
        let heartbeat_id = identifier("heartbeat_id", params.heartbeat_id)?;
        let fields = update_fields(params.fields)?;
        Ok(self
            .client
            .heartbeats()
            .update(&heartbeat_id, &fields)
            .await?)
    }

    pub async fn delete_heartbeat(&self, params: HeartbeatIdParams) -> GatewayResult<Value> {
        self.ensure_writable("delete_heartbeat")?;
        let heartbeat_id = identifier("heartbeat_id", params.heartbeat_id)?;
        self.client.heartbeats().delete(&heartbeat_id).await?;
        tracing::info!(heartbeat_id = %heartbeat_id, "deleted heartbeat");
        Ok(json!({
            "heartbeat_id": heartbeat_id,
            "message": format!("Heartbeat {} deleted successfully", heartbeat_id),
        }))
    }

    pub async fn send_heartbeat_ping(&self, params: HeartbeatIdParams) -> GatewayResult<Value> {
        self.ensure_writable("send_heartbeat_ping")?;
        let heartbeat_id = identifier("heartbeat_id", params.heartbeat_id)?;
        let response = self.client.heartbeats().ping(&heartbeat_id).await?;
        Ok(json!({
            "heartbeat_id": heartbeat_id,
            "message": format!("Ping sent to heartbeat {}", heartbeat_id),
            "response": response,
        }))
    }
}
