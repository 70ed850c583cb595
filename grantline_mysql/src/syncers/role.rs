use async_trait::async_trait;
use grantline_core::connectors::nodes::{
    Entitlement, Grant, PageToken, Resource, ResourceId, ResourceType,
};
use grantline_core::ResourceSyncer;

use super::{resource_type, SyncContext};
use crate::client::rows::AccountKind;
use crate::consts::ROLE;

/// Roles exist on MySQL 8 and later only.
pub struct RoleSyncer<'a> {
    ctx: &'a SyncContext,
    resource_type: ResourceType,
}

impl<'a> RoleSyncer<'a> {
    pub fn new(ctx: &'a SyncContext) -> Self {
        Self {
            ctx,
            resource_type: resource_type(ROLE, "Role"),
        }
    }
}

#[async_trait]
impl ResourceSyncer for RoleSyncer<'_> {
    fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    async fn list(
        &self,
        parent: Option<&ResourceId>,
        page: &PageToken,
    ) -> anyhow::Result<(Vec<Resource>, String)> {
        self.ctx.list_accounts(AccountKind::Role, parent, page).await
    }

    async fn entitlements(&self, resource: &Resource) -> anyhow::Result<Vec<Entitlement>> {
        self.ctx.entitlements(resource)
    }

    async fn grants(&self, resource: &Resource) -> anyhow::Result<Vec<Grant>> {
        self.ctx.account_grants(resource).await
    }

    async fn grant(&self, principal_id: &str, entitlement_id: &str) -> anyhow::Result<()> {
        self.ctx.grant(principal_id, entitlement_id).await
    }

    async fn revoke(&self, grant_id: &str) -> anyhow::Result<()> {
        self.ctx.revoke(grant_id).await
    }
}
