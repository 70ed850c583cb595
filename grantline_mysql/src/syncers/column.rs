use anyhow::Context;
use async_trait::async_trait;
use grantline_core::connectors::nodes::{
    Entitlement, Grant, PageToken, Resource, ResourceId, ResourceType,
};
use grantline_core::ResourceSyncer;

use super::{parent_of_kind, resource, resource_type, SyncContext};
use crate::consts::{COLUMN, TABLE};
use crate::identity::ResourceIdentity;
use crate::pagination::Window;

/// Columns of expanded tables. Registered only when some table is expanded.
pub struct ColumnSyncer<'a> {
    ctx: &'a SyncContext,
    resource_type: ResourceType,
}

impl<'a> ColumnSyncer<'a> {
    pub fn new(ctx: &'a SyncContext) -> Self {
        Self {
            ctx,
            resource_type: resource_type(COLUMN, "Column"),
        }
    }
}

#[async_trait]
impl ResourceSyncer for ColumnSyncer<'_> {
    fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    async fn list(
        &self,
        parent: Option<&ResourceId>,
        page: &PageToken,
    ) -> anyhow::Result<(Vec<Resource>, String)> {
        let Some(ResourceIdentity::Table { database, table }) = parent_of_kind(parent, TABLE)?
        else {
            return Ok((vec![], String::new()));
        };
        if !self.ctx.settings.expands(&database, &table) {
            return Ok((vec![], String::new()));
        }

        let window = Window::parse(page)?;
        let rows = self
            .ctx
            .storage
            .list_columns(&database, &table, &window)
            .await
            .with_context(|| format!("failed to get columns of {database}.{table}"))?;
        let (rows, next) = window.finish(rows);

        let parent_id = ResourceIdentity::table(&database, &table).to_resource_id();
        let resources = rows
            .into_iter()
            .map(|row| {
                resource(
                    &ResourceIdentity::column(&row.database, &row.table, &row.name),
                    row.name,
                    Some(parent_id.clone()),
                    &[],
                )
            })
            .collect();
        Ok((resources, next))
    }

    async fn entitlements(&self, resource: &Resource) -> anyhow::Result<Vec<Entitlement>> {
        self.ctx.entitlements(resource)
    }

    async fn grants(&self, _resource: &Resource) -> anyhow::Result<Vec<Grant>> {
        Ok(vec![])
    }

    async fn grant(&self, principal_id: &str, entitlement_id: &str) -> anyhow::Result<()> {
        self.ctx.grant(principal_id, entitlement_id).await
    }

    async fn revoke(&self, grant_id: &str) -> anyhow::Result<()> {
        self.ctx.revoke(grant_id).await
    }
}
