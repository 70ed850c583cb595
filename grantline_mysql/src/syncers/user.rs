use std::collections::HashMap;

use anyhow::{bail, Context};
use async_trait::async_trait;
use grantline_core::connectors::nodes::{
    CredentialOptions, Entitlement, Grant, PageToken, PlaintextData, Resource, ResourceId,
    ResourceType,
};
use grantline_core::{AccountManager, ResourceSyncer};

use super::{account_resource, resource_type, SyncContext};
use crate::client::rows::AccountKind;
use crate::consts::USER;
use crate::credentials;
use crate::identity::{parse_kind, AccountIdentity, ResourceIdentity};

pub struct UserSyncer<'a> {
    ctx: &'a SyncContext,
    resource_type: ResourceType,
}

impl<'a> UserSyncer<'a> {
    pub fn new(ctx: &'a SyncContext) -> Self {
        Self {
            ctx,
            resource_type: resource_type(USER, "User"),
        }
    }
}

#[async_trait]
impl ResourceSyncer for UserSyncer<'_> {
    fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    async fn list(
        &self,
        parent: Option<&ResourceId>,
        page: &PageToken,
    ) -> anyhow::Result<(Vec<Resource>, String)> {
        self.ctx.list_accounts(AccountKind::User, parent, page).await
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

#[async_trait]
impl AccountManager for UserSyncer<'_> {
    /// Create `'{username}'@'{account_host}'` with a generated password.
    async fn create_account(
        &self,
        profile: &HashMap<String, String>,
        options: &CredentialOptions,
    ) -> anyhow::Result<(Resource, PlaintextData)> {
        let Some(username) = profile.get("username").map(|u| u.trim()).filter(|u| !u.is_empty())
        else {
            bail!("missing username in account profile");
        };
        let account = AccountIdentity::new(username, &self.ctx.settings.account_host);
        let password = credentials::generate(options)?;

        self.ctx
            .translator()
            .create_user(&account, &password)
            .await
            .with_context(|| format!("failed to create user {account}"))?;

        let resource = account_resource(
            &ResourceIdentity::User(account),
            &self.ctx.server_identity().to_resource_id(),
        );
        Ok((
            resource,
            PlaintextData {
                name: "password".to_owned(),
                bytes: password.into_bytes(),
            },
        ))
    }

    async fn delete_account(&self, resource_id: &str) -> anyhow::Result<()> {
        let identity = parse_kind(resource_id, USER)?;
        let Some(account) = identity.account() else {
            bail!("{resource_id} is not an account");
        };
        self.ctx
            .translator()
            .drop_user(account)
            .await
            .with_context(|| format!("failed to delete user {account}"))
    }
}
