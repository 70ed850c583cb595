//! Write path: turn entitlement, principal and grant ids back into
//! administrative statements and run them.
//!
//! Each call runs exactly one statement. Every identifier that ends up in a
//! statement goes through [`crate::escape`] first.

mod statements;

use grantline_core::logging::info;

pub use statements::Action;

use crate::catalog::{Catalog, CatalogEntry};
use crate::client::{ServerCapability, Storage};
use crate::consts::{
    COLUMN_GRANT_BUNDLE, GRANT_PRIV, PROXY_PRIV, ROLE_ASSIGNMENT_PRIV,
};
use crate::error::{Error, Result};
use crate::escape::{quote_account, quote_ident, quote_password};
use crate::identity::{AccountIdentity, ResourceIdentity};

const EXECUTE_PRIV: &str = "execute";
const ALTER_ROUTINE_PRIV: &str = "alter_routine";

/// An entitlement id split into its privilege and resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntitlement {
    pub privilege: String,
    pub resource: ResourceIdentity,
}

/// Decode `entitlement:{privilege}:{kind}:{body}`.
pub fn decode_entitlement_id(id: &str) -> Result<DecodedEntitlement> {
    match id.split(':').collect::<Vec<_>>().as_slice() {
        ["entitlement", privilege, kind, body] if !privilege.is_empty() => {
            Ok(DecodedEntitlement {
                privilege: (*privilege).to_owned(),
                resource: format!("{kind}:{body}").parse()?,
            })
        }
        _ => Err(Error::MalformedEntitlementId(id.to_owned())),
    }
}

/// Decode `{kind}:{name}@{host}` into a user or role.
pub fn decode_principal_id(id: &str) -> Result<ResourceIdentity> {
    let parts: Vec<_> = id.split(':').collect();
    if parts.len() != 2 {
        return Err(Error::MalformedEntitlementId(id.to_owned()));
    }
    let principal: ResourceIdentity = id.parse()?;
    match principal {
        ResourceIdentity::User(_) | ResourceIdentity::Role(_) => Ok(principal),
        other => Err(Error::UnsupportedResourceKind(other.kind().to_owned())),
    }
}

/// Decode `grant:{entitlement id}:{principal id}`.
pub fn decode_grant_id(id: &str) -> Result<(DecodedEntitlement, ResourceIdentity)> {
    match id.split(':').collect::<Vec<_>>().as_slice() {
        ["grant", "entitlement", privilege, kind, body, principal_kind, principal_body] => Ok((
            decode_entitlement_id(&format!("entitlement:{privilege}:{kind}:{body}"))?,
            decode_principal_id(&format!("{principal_kind}:{principal_body}"))?,
        )),
        _ => Err(Error::MalformedEntitlementId(id.to_owned())),
    }
}

pub struct MutationTranslator<'a> {
    storage: &'a dyn Storage,
    catalog: &'a Catalog,
    capability: ServerCapability,
}

impl<'a> MutationTranslator<'a> {
    pub fn new(storage: &'a dyn Storage, catalog: &'a Catalog, capability: ServerCapability) -> Self {
        Self {
            storage,
            catalog,
            capability,
        }
    }

    /// Grant the entitlement to the principal.
    pub async fn grant(&self, principal_id: &str, entitlement_id: &str) -> Result<()> {
        let principal = decode_principal_id(principal_id)?;
        let entitlement = decode_entitlement_id(entitlement_id)?;
        let statement = self
            .statement(Action::Grant, &principal, &entitlement)
            .await?;
        self.run(&statement).await
    }

    /// Revoke an observed grant.
    pub async fn revoke(&self, grant_id: &str) -> Result<()> {
        let (entitlement, principal) = decode_grant_id(grant_id)?;
        let statement = self
            .statement(Action::Revoke, &principal, &entitlement)
            .await?;
        self.run(&statement).await
    }

    pub async fn create_user(&self, account: &AccountIdentity, password: &str) -> Result<()> {
        let statement =
            statements::create_user(&quote_account(account)?, &quote_password(password));
        self.storage.execute(&statement).await?;
        info!(account = %account, "created user");
        Ok(())
    }

    pub async fn drop_user(&self, account: &AccountIdentity) -> Result<()> {
        self.run(&statements::drop_user(&quote_account(account)?))
            .await
    }

    /// Build the statement for the action without running it.
    pub async fn statement(
        &self,
        action: Action,
        principal: &ResourceIdentity,
        entitlement: &DecodedEntitlement,
    ) -> Result<String> {
        let resource = &entitlement.resource;
        let entry = self
            .catalog
            .lookup(resource.kind(), &entitlement.privilege, self.capability.modern)
            .ok_or_else(|| Error::UnsupportedPrivilege {
                privilege: entitlement.privilege.to_owned(),
                kind: resource.kind().to_owned(),
            })?;
        let account = quote_account(principal_account(principal, resource, entry)?)?;

        match resource {
            ResourceIdentity::Server { .. } if entry.privilege == PROXY_PRIV => Ok(
                statements::proxy(action, "''@''", &account, entry.with_grant),
            ),
            ResourceIdentity::Server { .. } => Ok(statements::object_privilege(
                action,
                &entry.keyword(),
                "*.*",
                &account,
                entry.with_grant,
            )),
            ResourceIdentity::Database { database } => Ok(statements::object_privilege(
                action,
                &entry.keyword(),
                &format!("{}.*", quote_ident(database)?),
                &account,
                entry.with_grant,
            )),
            ResourceIdentity::Table { database, table } => Ok(statements::object_privilege(
                action,
                &entry.keyword(),
                &quote_ident(&format!("{database}.{table}"))?,
                &account,
                entry.with_grant,
            )),
            ResourceIdentity::Column {
                database,
                table,
                column,
            } => {
                let keywords = if entry.privilege == GRANT_PRIV {
                    COLUMN_GRANT_BUNDLE.iter().map(|k| (*k).to_owned()).collect()
                } else {
                    vec![entry.keyword()]
                };
                Ok(statements::column_privilege(
                    action,
                    &keywords,
                    &quote_ident(column)?,
                    &quote_ident(&format!("{database}.{table}"))?,
                    &account,
                ))
            }
            ResourceIdentity::Routine { database, routine } => {
                if entry.privilege != EXECUTE_PRIV && entry.privilege != ALTER_ROUTINE_PRIV {
                    return Err(Error::UnsupportedPrivilege {
                        privilege: entry.id.to_owned(),
                        kind: resource.kind().to_owned(),
                    });
                }
                let target = quote_ident(&format!("{database}.{routine}"))?;
                let routine_type = self.routine_type(database, routine).await?;
                Ok(statements::object_privilege(
                    action,
                    &entry.keyword(),
                    &format!("{routine_type} {target}"),
                    &account,
                    false,
                ))
            }
            ResourceIdentity::User(target) | ResourceIdentity::Role(target) => {
                let target = quote_account(target)?;
                match entry.privilege {
                    ROLE_ASSIGNMENT_PRIV => Ok(statements::role_membership(
                        action,
                        &target,
                        &account,
                        entry.with_grant,
                    )),
                    PROXY_PRIV => Ok(statements::proxy(action, &target, &account, entry.with_grant)),
                    _ => Err(Error::UnsupportedPrivilege {
                        privilege: entry.id.to_owned(),
                        kind: resource.kind().to_owned(),
                    }),
                }
            }
        }
    }

    async fn routine_type(&self, database: &str, routine: &str) -> Result<String> {
        let routine_type = self
            .storage
            .routine_type(database, routine)
            .await?
            .ok_or_else(|| {
                Error::ResolutionFailure(ResourceIdentity::routine(database, routine).to_string())
            })?
            .to_uppercase();
        match routine_type.as_str() {
            "FUNCTION" | "PROCEDURE" => Ok(routine_type),
            _ => Err(Error::UnsupportedResourceKind(routine_type)),
        }
    }

    async fn run(&self, statement: &str) -> Result<()> {
        self.storage.execute(statement).await?;
        info!(statement, "applied");
        Ok(())
    }
}

/// The account to grant to. Only server and database privileges may go to
/// roles; everything else, and proxying anywhere, needs a user.
fn principal_account<'p>(
    principal: &'p ResourceIdentity,
    resource: &ResourceIdentity,
    entry: &CatalogEntry,
) -> Result<&'p AccountIdentity> {
    let roles_allowed = matches!(
        resource,
        ResourceIdentity::Server { .. } | ResourceIdentity::Database { .. }
    ) && entry.privilege != PROXY_PRIV;

    match principal {
        ResourceIdentity::User(account) => Ok(account),
        ResourceIdentity::Role(account) if roles_allowed => Ok(account),
        other => Err(Error::UnsupportedResourceKind(other.kind().to_owned())),
    }
}
