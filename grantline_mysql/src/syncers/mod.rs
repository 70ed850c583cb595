//! One [`ResourceSyncer`](grantline_core::ResourceSyncer) per resource kind.

mod column;
mod database;
mod role;
mod routine;
mod server;
mod table;
mod user;

use std::sync::Arc;

use anyhow::Context as _;
use grantline_core::connectors::nodes::{
    Entitlement, Grant, PageToken, Resource, ResourceId, ResourceTrait, ResourceType,
    UserProfile, UserStatus,
};
use maplit::hashmap;

pub use column::ColumnSyncer;
pub use database::DatabaseSyncer;
pub use role::RoleSyncer;
pub use routine::RoutineSyncer;
pub use server::ServerSyncer;
pub use table::TableSyncer;
pub use user::UserSyncer;

use crate::catalog::Catalog;
use crate::client::rows::{AccountKind, ServerInfo};
use crate::client::{ServerCapability, Storage};
use crate::consts;
use crate::entitlements::entitlements_for;
use crate::identity::ResourceIdentity;
use crate::pagination::Window;
use crate::reconciler::GrantReconciler;
use crate::settings::MySqlSettings;
use crate::translator::MutationTranslator;

/// Everything the syncers share. Built once when the connector starts.
pub struct SyncContext {
    pub storage: Arc<dyn Storage>,
    pub catalog: Catalog,
    pub settings: MySqlSettings,
    pub capability: ServerCapability,
    pub server: ServerInfo,
}

impl SyncContext {
    pub fn server_identity(&self) -> ResourceIdentity {
        self.server.identity()
    }

    pub fn translator(&self) -> MutationTranslator<'_> {
        MutationTranslator::new(self.storage.as_ref(), &self.catalog, self.capability)
    }

    pub fn entitlements(&self, resource: &Resource) -> anyhow::Result<Vec<Entitlement>> {
        let identity: ResourceIdentity = resource.id.resource.parse()?;
        Ok(entitlements_for(
            &self.catalog,
            &identity,
            self.capability.modern,
        ))
    }

    /// Grants held by a user or role resource.
    pub async fn account_grants(&self, resource: &Resource) -> anyhow::Result<Vec<Grant>> {
        let identity: ResourceIdentity = resource.id.resource.parse()?;
        let server = self.server_identity();
        let reconciler = GrantReconciler::new(
            self.storage.as_ref(),
            &self.catalog,
            &self.settings,
            self.capability,
            &server,
        );
        reconciler
            .grants_for(&identity)
            .await
            .with_context(|| format!("failed to get grants for {identity}"))
    }

    pub async fn grant(&self, principal_id: &str, entitlement_id: &str) -> anyhow::Result<()> {
        self.translator()
            .grant(principal_id, entitlement_id)
            .await
            .with_context(|| format!("failed to grant {entitlement_id} to {principal_id}"))
    }

    pub async fn revoke(&self, grant_id: &str) -> anyhow::Result<()> {
        self.translator()
            .revoke(grant_id)
            .await
            .with_context(|| format!("failed to revoke {grant_id}"))
    }

    /// Accounts of one kind under the server.
    async fn list_accounts(
        &self,
        kind: AccountKind,
        parent: Option<&ResourceId>,
        page: &PageToken,
    ) -> anyhow::Result<(Vec<Resource>, String)> {
        let server = self.server_identity().to_resource_id();
        if parent.map_or(false, |p| *p != server) {
            return Ok((vec![], String::new()));
        }
        let window = Window::parse(page)?;
        let rows = self
            .storage
            .list_accounts(kind, self.settings.collapse_users, &window)
            .await
            .with_context(|| format!("failed to get {}s", kind.as_str()))?;
        let (rows, next) = window.finish(rows);

        let resources = rows
            .into_iter()
            .map(|row| {
                let identity = match kind {
                    AccountKind::User => ResourceIdentity::User(row.account()),
                    AccountKind::Role => ResourceIdentity::Role(row.account()),
                };
                account_resource(&identity, &server)
            })
            .collect();
        Ok((resources, next))
    }
}

pub(crate) fn resource_type(id: &str, display_name: &str) -> ResourceType {
    ResourceType {
        id: id.to_owned(),
        display_name: display_name.to_owned(),
        traits: if id == consts::USER {
            vec![ResourceTrait::User]
        } else {
            vec![]
        },
    }
}

/// The parent identity when it is of the expected kind.
fn parent_of_kind(parent: Option<&ResourceId>, kind: &str) -> anyhow::Result<Option<ResourceIdentity>> {
    match parent {
        Some(parent) if parent.resource_type == kind => Ok(Some(parent.resource.parse()?)),
        _ => Ok(None),
    }
}

fn resource(
    identity: &ResourceIdentity,
    display_name: String,
    parent: Option<ResourceId>,
    child_types: &[&str],
) -> Resource {
    Resource {
        id: identity.to_resource_id(),
        display_name,
        parent,
        child_types: child_types.iter().map(|c| (*c).to_owned()).collect(),
        user_profile: None,
    }
}

/// Users carry a profile; roles don't.
pub(crate) fn account_resource(identity: &ResourceIdentity, server: &ResourceId) -> Resource {
    let body = identity.body();
    let mut res = resource(identity, body.clone(), Some(server.clone()), &[]);
    if let ResourceIdentity::User(account) = identity {
        res.user_profile = Some(UserProfile {
            attributes: hashmap! {
                "user".to_owned() => account.name.to_owned(),
                "host".to_owned() => account.host.to_owned(),
                "user_id".to_owned() => identity.to_string(),
            },
            login: body,
            status: UserStatus::Enabled,
        });
    }
    res
}
