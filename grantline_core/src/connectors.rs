//! Connector traits
//!
//! A connector exposes one [`ResourceSyncer`] per resource kind. The sync
//! engine walks the resource tree through `list`, then asks each resource
//! for its entitlements and the grants it holds.
pub mod nodes;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{ConnectorConfig, CredentialsMap};
use nodes::{
    CredentialOptions, ConnectorMetadata, Entitlement, Grant, PageToken, PlaintextData, Resource,
    ResourceId, ResourceType,
};

/// The trait all connectors are expected to implement.
#[async_trait]
pub trait Connector {
    /// Instantiate a Connector from configuration.
    async fn new(config: &ConnectorConfig, credentials: &CredentialsMap) -> Result<Box<Self>>
    where
        Self: Sized;
    /// Check if the Connector is properly set up and return the connection
    /// status (true for connected, false for not).
    async fn check(&self) -> bool;
    /// Describe the connected system.
    async fn metadata(&self) -> Result<ConnectorMetadata>;
    /// The syncers for every resource kind this connector currently supports.
    fn resource_syncers(&self) -> Vec<Box<dyn ResourceSyncer + '_>>;
}

/// The capability set for one resource kind.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// The resource type this syncer handles.
    fn resource_type(&self) -> &ResourceType;

    /// List resources of this type under the given parent. Returns the page
    /// of resources and the token for the next page (empty when done).
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        page: &PageToken,
    ) -> Result<(Vec<Resource>, String)>;

    /// All entitlements scoped to the resource.
    async fn entitlements(&self, resource: &Resource) -> Result<Vec<Entitlement>>;

    /// Grants held by the resource. Empty for resources that can't be principals.
    async fn grants(&self, resource: &Resource) -> Result<Vec<Grant>>;

    /// Grant the entitlement to the principal.
    async fn grant(&self, principal_id: &str, entitlement_id: &str) -> Result<()>;

    /// Revoke a previously observed grant.
    async fn revoke(&self, grant_id: &str) -> Result<()>;
}

/// Account lifecycle for resource kinds that represent accounts.
#[async_trait]
pub trait AccountManager: Send + Sync {
    /// Create an account from the profile and return the new resource along
    /// with its plaintext credential.
    async fn create_account(
        &self,
        profile: &HashMap<String, String>,
        options: &CredentialOptions,
    ) -> Result<(Resource, PlaintextData)>;

    /// Delete the account identified by the resource id.
    async fn delete_account(&self, resource_id: &str) -> Result<()>;
}
