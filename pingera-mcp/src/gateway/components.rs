use pingera_sdk::{Component, ComponentParams, ComponentStatus};
use serde_json::{json, Value};

use super::{flag, identifier, integer, text, Gateway, GatewayResult};
use crate::envelope::ErrorRecord;
use crate::params::{
    ComponentFields, ComponentIdParams, CreateComponentParams, ListComponentsParams,
    UpdateComponentParams,
};

impl ComponentFields {
    fn into_request(self) -> GatewayResult<ComponentParams> {
        let status = text("status", self.status)?
            .map(|s| s.parse::<ComponentStatus>())
            .transpose()
            .map_err(ErrorRecord::invalid_params)?;
        let group_id = match text("group_id", self.group_id)? {
            Some(id) => Some(identifier("group_id", Some(Value::String(id)))?),
            None => None,
        };
        Ok(ComponentParams {
            name: text("name", self.name)?,
            description: text("description", self.description)?,
            status,
            group_id,
            only_show_if_degraded: flag("only_show_if_degraded", self.only_show_if_degraded)?,
            position: integer("position", self.position)?,
            showcase: flag("showcase", self.showcase)?,
        })
    }
}

/// A group component with the components assigned to it
fn group_entry(group: &Component, components: &[Component]) -> Value {
    let members: Vec<&Component> = components
        .iter()
        .filter(|c| c.group_id.is_some() && c.group_id == group.id)
        .collect();
    let mut entry = serde_json::to_value(group).unwrap_or_else(|_| json!({}));
    entry["components"] = json!(members);
    entry
}

impl Gateway {
    async fn fetch_components(
        &self,
        params: ListComponentsParams,
    ) -> GatewayResult<(String, Vec<Component>)> {
        let page_id = identifier("page_id", params.page_id)?;
        let show_deleted = flag("show_deleted", params.show_deleted)?.unwrap_or(false);
        let components = self
            .client
            .components()
            .list(&page_id, show_deleted)
            .await?;
        Ok((page_id, components))
    }

    pub async fn list_components(&self, params: ListComponentsParams) -> GatewayResult<Value> {
        let (page_id, components) = self.fetch_components(params).await?;
        Ok(json!({
            "page_id": page_id,
            "total": components.len(),
            "components": components,
        }))
    }

    /// Group components of a page, each with its members
    pub async fn list_component_groups(&self, params: ListComponentsParams) -> GatewayResult<Value> {
        let (page_id, components) = self.fetch_components(params).await?;
        let groups: Vec<Value> = components
            .iter()
            .filter(|c| c.is_group())
            .map(|group| group_entry(group, &components))
            .collect();
        Ok(json!({
            "page_id": page_id,
            "total": groups.len(),
            "groups": groups,
        }))
    }

    pub async fn get_component_details(&self, params: ComponentIdParams) -> GatewayResult<Component> {
        let page_id = identifier("page_id", params.page_id)?;
        let component_id = identifier("component_id", params.component_id)?;
        Ok(self.client.components().get(&page_id, &component_id).await?)
    }

    pub async fn create_component(&self, params: CreateComponentParams) -> GatewayResult<Component> {
        self.ensure_writable("create_component")?;
        let page_id = identifier("page_id", params.page_id)?;
        let request = params.fields.into_request()?;
        if request.name.is_none() {
            return Err(ErrorRecord::invalid_params("name is required"));
        }
        Ok(self.client.components().create(&page_id, &request).await?)
    }

    pub async fn update_component(&self, params: UpdateComponentParams) -> GatewayResult<Component> {
        self.ensure_writable("update_component")?;
        let page_id = identifier("page_id", params.page_id)?;
        let component_id = identifier("component_id", params.component_id)?;
        let request = params.fields.into_request()?;
        if request.is_empty() {
            return Err(ErrorRecord::invalid_params("No fields provided for update"));
        }
        Ok(self
            .client
            .components()
            .update(&page_id, &component_id, &request)
            .await?)
    }

    pub async fn delete_component(&self, params: ComponentIdParams) -> GatewayResult<Value> {
        self.ensure_writable("delete_component")?;
        let page_id = identifier("page_id", params.page_id)?;
        let component_id = identifier("component_id", params.component_id)?;
        self.client.components().delete(&page_id, &component_id).await?;
        tracing::info!(page_id = %page_id, component_id = %component_id, "deleted component");
        Ok(json!({
            "page_id": page_id,
            "component_id": component_id,
            "message": format!("Component {} deleted successfully", component_id),
        }))
    }
}
