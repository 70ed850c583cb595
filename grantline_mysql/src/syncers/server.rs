use async_trait::async_trait;
use grantline_core::connectors::nodes::{
    Entitlement, Grant, PageToken, Resource, ResourceId, ResourceType,
};
use grantline_core::ResourceSyncer;

use super::{resource, resource_type, SyncContext};
use crate::consts::{DATABASE, ROLE, SERVER, USER};

/// The single server resource at the root of the tree.
pub struct ServerSyncer<'a> {
    ctx: &'a SyncContext,
    resource_type: ResourceType,
}

impl<'a> ServerSyncer<'a> {
    pub fn new(ctx: &'a SyncContext) -> Self {
        Self {
            ctx,
            resource_type: resource_type(SERVER, "Server"),
        }
    }
}

#[async_trait]
impl ResourceSyncer for ServerSyncer<'_> {
    fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        _page: &PageToken,
    ) -> anyhow::Result<(Vec<Resource>, String)> {
        let children: &[&str] = if self.ctx.capability.modern {
            &[DATABASE, USER, ROLE]
        } else {
            &[DATABASE, USER]
        };
        let server = resource(
            &self.ctx.server_identity(),
            self.ctx.server.hostname.to_owned(),
            None,
            children,
        );
        Ok((vec![server], String::new()))
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
