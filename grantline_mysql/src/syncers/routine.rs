use anyhow::Context;
use async_trait::async_trait;
use grantline_core::connectors::nodes::{
    Entitlement, Grant, PageToken, Resource, ResourceId, ResourceType,
};
use grantline_core::ResourceSyncer;

use super::{parent_of_kind, resource, resource_type, SyncContext};
use crate::consts::{DATABASE, ROUTINE};
use crate::identity::ResourceIdentity;
use crate::pagination::Window;

pub struct RoutineSyncer<'a> {
    ctx: &'a SyncContext,
    resource_type: ResourceType,
}

impl<'a> RoutineSyncer<'a> {
    pub fn new(ctx: &'a SyncContext) -> Self {
        Self {
            ctx,
            resource_type: resource_type(ROUTINE, "Routine"),
        }
    }
}

#[async_trait]
impl ResourceSyncer for RoutineSyncer<'_> {
    fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    async fn list(
        &self,
        parent: Option<&ResourceId>,
        page: &PageToken,
    ) -> anyhow::Result<(Vec<Resource>, String)> {
        let Some(ResourceIdentity::Database { database }) = parent_of_kind(parent, DATABASE)?
        else {
            return Ok((vec![], String::new()));
        };
        if self.ctx.settings.skips(&database) {
            return Ok((vec![], String::new()));
        }

        let window = Window::parse(page)?;
        let rows = self
            .ctx
            .storage
            .list_routines(&database, &window)
            .await
            .with_context(|| format!("failed to get routines in {database}"))?;
        let (rows, next) = window.finish(rows);

        let parent_id = ResourceIdentity::database(&database).to_resource_id();
        let resources = rows
            .into_iter()
            .map(|row| {
                resource(
                    &ResourceIdentity::routine(&row.database, &row.name),
                    format!("{}.{}", row.database, row.name),
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
