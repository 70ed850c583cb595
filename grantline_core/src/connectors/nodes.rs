//! Nodes exchanged between connectors and the sync engine
use std::collections::HashMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Identifies a resource: its type id plus the full resource id
/// (`{type}:{body}`).
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ResourceId {
    /// The resource type id, such as `table`.
    pub resource_type: String,
    /// The full resource id, such as `table:db.users`.
    pub resource: String,
}

impl ResourceId {
    /// Basic constructor
    pub fn new(resource_type: &str, resource: String) -> Self {
        Self {
            resource_type: resource_type.to_owned(),
            resource,
        }
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.resource)
    }
}

/// Traits a resource type can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceTrait {
    /// Resources of this type are human (or service) accounts.
    User,
}

/// A kind of resource a connector can sync.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    /// Stable id for the type.
    pub id: String,
    /// Human-readable name.
    pub display_name: String,
    /// Traits for this type.
    pub traits: Vec<ResourceTrait>,
}

/// Account status carried in a user profile.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    /// The account can log in.
    #[default]
    Enabled,
    /// The account exists but can't be used.
    Disabled,
}

/// Profile details attached to user resources.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Free-form profile attributes.
    pub attributes: HashMap<String, String>,
    /// The login for this user.
    pub login: String,
    /// Current status.
    pub status: UserStatus,
}

/// A synced resource.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// The resource id.
    pub id: ResourceId,
    /// Human-readable name.
    pub display_name: String,
    /// The parent resource, if any.
    pub parent: Option<ResourceId>,
    /// Resource types that may be listed underneath this resource.
    pub child_types: Vec<String>,
    /// Profile for user resources.
    pub user_profile: Option<UserProfile>,
}

/// What an entitlement represents.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntitlementPurpose {
    /// A permission on the resource.
    #[default]
    Permission,
    /// Membership in the resource (such as a role).
    Assignment,
}

/// Something a principal can be granted on a resource.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Synthetic id, `entitlement:{privilege}:{resource id}`.
    pub id: String,
    /// The resource this entitlement is scoped to.
    pub resource: ResourceId,
    /// Human-readable name.
    pub display_name: String,
    /// Longer description.
    pub description: String,
    /// Short lowercase label.
    pub slug: String,
    /// Resource types this entitlement can be granted to.
    pub grantable_to: Vec<String>,
    /// What the entitlement represents.
    pub purpose: EntitlementPurpose,
}

/// An observed fact that a principal holds an entitlement.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Grant {
    /// Synthetic id, `grant:{entitlement id}:{principal id}`.
    pub id: String,
    /// The entitlement id.
    pub entitlement_id: String,
    /// The resource the entitlement is scoped to.
    pub resource: ResourceId,
    /// Who holds the entitlement.
    pub principal: ResourceId,
}

impl Grant {
    /// Build a grant, deriving the id from the entitlement and principal.
    pub fn new(entitlement_id: String, resource: ResourceId, principal: ResourceId) -> Self {
        Self {
            id: format!("grant:{}:{}", entitlement_id, principal.resource),
            entitlement_id,
            resource,
            principal,
        }
    }
}

/// Page request handed to `list` calls.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToken {
    /// Opaque continuation token from the previous page. Empty for the first page.
    pub token: String,
    /// Requested page size. Connectors may clamp this.
    pub size: usize,
}

impl PageToken {
    /// Basic constructor
    pub fn new(token: &str, size: usize) -> Self {
        Self {
            token: token.to_owned(),
            size,
        }
    }
}

/// How credentials for a new account should be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialOptions {
    /// Generate a random password of the given length.
    RandomPassword {
        /// Requested password length.
        length: usize,
    },
    /// Create the account without any credential.
    NoPassword,
}

/// A secret handed back once to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaintextData {
    /// What the secret is (for example, `password`).
    pub name: String,
    /// The secret itself.
    pub bytes: Vec<u8>,
}

/// A field in the account creation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountField {
    /// Human-readable name.
    pub display_name: String,
    /// Help text.
    pub description: String,
    /// Whether the field must be filled in.
    pub required: bool,
    /// Example value.
    pub placeholder: String,
    /// Position in the form.
    pub order: u32,
}

/// Metadata describing a connector instance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorMetadata {
    /// Human-readable name for the connected system.
    pub display_name: String,
    /// Short description.
    pub description: String,
    /// Fields accepted when creating accounts, keyed by profile key.
    pub account_creation_fields: HashMap<String, AccountField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_id_is_derived_from_entitlement_and_principal() {
        let grant = Grant::new(
            "entitlement:select:table:db.users".to_owned(),
            ResourceId::new("table", "table:db.users".to_owned()),
            ResourceId::new("user", "user:alice@%".to_owned()),
        );
        assert_eq!(
            grant.id,
            "grant:entitlement:select:table:db.users:user:alice@%"
        );
    }
}
