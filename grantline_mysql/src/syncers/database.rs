use anyhow::Context;
use async_trait::async_trait;
use grantline_core::connectors::nodes::{
    Entitlement, Grant, PageToken, Resource, ResourceId, ResourceType,
};
use grantline_core::ResourceSyncer;

use super::{parent_of_kind, resource, resource_type, SyncContext};
use crate::consts::{DATABASE, ROUTINE, SERVER, TABLE};
use crate::identity::ResourceIdentity;
use crate::pagination::Window;

pub struct DatabaseSyncer<'a> {
    ctx: &'a SyncContext,
    resource_type: ResourceType,
}

impl<'a> DatabaseSyncer<'a> {
    pub fn new(ctx: &'a SyncContext) -> Self {
        Self {
            ctx,
            resource_type: resource_type(DATABASE, "Database"),
        }
    }
}

#[async_trait]
impl ResourceSyncer for DatabaseSyncer<'_> {
    fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    /// Databases under the server, minus the skipped ones.
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        page: &PageToken,
    ) -> anyhow::Result<(Vec<Resource>, String)> {
        let Some(server) = parent_of_kind(parent, SERVER)? else {
            return Ok((vec![], String::new()));
        };
        let window = Window::parse(page)?;
        let mut skip: Vec<&str> = self
            .ctx
            .settings
            .skip_databases
            .iter()
            .map(String::as_str)
            .collect();
        skip.sort_unstable();
        let rows = self
            .ctx
            .storage
            .list_databases(&skip, &window)
            .await
            .context("failed to get databases")?;
        let (rows, next) = window.finish(rows);

        let resources = rows
            .into_iter()
            .map(|row| {
                resource(
                    &ResourceIdentity::database(&row.name),
                    row.name,
                    Some(server.to_resource_id()),
                    &[TABLE, ROUTINE],
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
