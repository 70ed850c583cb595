//! Rebuild the grants a principal holds from the server's grant tables.

use std::collections::BTreeSet;

use grantline_core::connectors::nodes::Grant;
use grantline_core::log_runtime;
use grantline_core::logging::{debug, warn};

use crate::catalog::Catalog;
use crate::client::rows::{is_yes, privilege_ids, AccountRow};
use crate::client::{ServerCapability, Storage};
use crate::consts::{
    PROXY_PRIV, PROXY_WITH_GRANT_PRIV, ROLE_ASSIGNMENT_PRIV, ROLE_ASSIGNMENT_WITH_GRANT_PRIV,
    WITH_GRANT_SUFFIX,
};
use crate::entitlements::entitlement_id;
use crate::error::{Error, Result};
use crate::identity::{AccountIdentity, ResourceIdentity};
use crate::settings::MySqlSettings;

/// `(privilege, resource)` pairs observed for one principal.
type Held = BTreeSet<(String, ResourceIdentity)>;

pub struct GrantReconciler<'a> {
    storage: &'a dyn Storage,
    catalog: &'a Catalog,
    settings: &'a MySqlSettings,
    capability: ServerCapability,
    server: &'a ResourceIdentity,
}

impl<'a> GrantReconciler<'a> {
    pub fn new(
        storage: &'a dyn Storage,
        catalog: &'a Catalog,
        settings: &'a MySqlSettings,
        capability: ServerCapability,
        server: &'a ResourceIdentity,
    ) -> Self {
        Self {
            storage,
            catalog,
            settings,
            capability,
            server,
        }
    }

    /// Every grant held by the user or role. A collapsed account is read
    /// once per host and the results merged.
    pub async fn grants_for(&self, principal: &ResourceIdentity) -> Result<Vec<Grant>> {
        let account = principal
            .account()
            .ok_or_else(|| Error::UnsupportedResourceKind(principal.kind().to_owned()))?;

        let mut held = Held::new();
        for host_account in account.expand() {
            log_runtime!(
                format!("reconciling {host_account}"),
                self.collect(&host_account, &mut held).await?
            );
        }

        let principal_id = principal.to_resource_id();
        Ok(held
            .into_iter()
            .filter(|(privilege, resource)| self.known(privilege, resource))
            .map(|(privilege, resource)| {
                Grant::new(
                    entitlement_id(&privilege, &resource),
                    resource.to_resource_id(),
                    principal_id.clone(),
                )
            })
            .collect())
    }

    async fn collect(&self, account: &AccountIdentity, held: &mut Held) -> Result<()> {
        self.global(account, held).await?;
        self.database(account, held).await?;
        self.table(account, held).await?;
        self.column(account, held).await?;
        self.proxy(account, held).await?;
        if self.capability.modern {
            self.roles(account, held).await?;
        }
        Ok(())
    }

    fn known(&self, privilege: &str, resource: &ResourceIdentity) -> bool {
        let known = self
            .catalog
            .lookup(resource.kind(), privilege, self.capability.modern)
            .is_some();
        if !known {
            debug!(privilege, resource = %resource, "skipping privilege missing from catalog");
        }
        known
    }

    /// Look up an account referenced by a grant row. Missing accounts are
    /// logged and reported as `None`.
    async fn resolve(&self, user: &str, host: &str, context: &str) -> Result<Option<AccountRow>> {
        let row = self.storage.get_account(user, host).await?;
        if row.is_none() {
            let err = Error::ResolutionFailure(format!("{user}@{host}"));
            warn!(user, host, "{context}: {err}, ignoring");
        }
        Ok(row)
    }

    async fn global(&self, account: &AccountIdentity, held: &mut Held) -> Result<()> {
        let Some(row) = self
            .resolve(&account.name, &account.host, "global grants")
            .await?
        else {
            return Ok(());
        };

        if self.capability.modern {
            for grant in self.storage.global_grants(&row.user, &row.host).await? {
                let privilege = grant.privilege.to_lowercase();
                if is_yes(&grant.with_grant_option) {
                    held.insert((
                        format!("{privilege}{WITH_GRANT_SUFFIX}"),
                        self.server.clone(),
                    ));
                }
                held.insert((privilege, self.server.clone()));
            }
        }

        for privilege in privilege_ids(&row.privs) {
            held.insert((privilege, self.server.clone()));
        }
        Ok(())
    }

    async fn database(&self, account: &AccountIdentity, held: &mut Held) -> Result<()> {
        for row in self
            .storage
            .database_grants(&account.name, &account.host)
            .await?
        {
            if self.skipped(&row.database) {
                continue;
            }
            let resource = ResourceIdentity::database(&row.database);
            for privilege in privilege_ids(&row.privs) {
                held.insert((privilege, resource.clone()));
            }
        }
        Ok(())
    }

    async fn table(&self, account: &AccountIdentity, held: &mut Held) -> Result<()> {
        for row in self
            .storage
            .table_grants(&account.name, &account.host)
            .await?
        {
            if self.skipped(&row.database) {
                continue;
            }
            let resource = ResourceIdentity::table(&row.database, &row.table);
            for privilege in privilege_ids(&row.privs) {
                held.insert((privilege, resource.clone()));
            }
        }
        Ok(())
    }

    /// Column privileges count against the table unless the table is
    /// expanded.
    async fn column(&self, account: &AccountIdentity, held: &mut Held) -> Result<()> {
        for row in self
            .storage
            .column_grants(&account.name, &account.host)
            .await?
        {
            if self.skipped(&row.database) {
                continue;
            }
            let resource = if self.settings.expands(&row.database, &row.table) {
                ResourceIdentity::column(&row.database, &row.table, &row.column)
            } else {
                ResourceIdentity::table(&row.database, &row.table)
            };
            for privilege in privilege_ids(&row.privs) {
                held.insert((privilege, resource.clone()));
            }
        }
        Ok(())
    }

    async fn proxy(&self, account: &AccountIdentity, held: &mut Held) -> Result<()> {
        for row in self
            .storage
            .proxy_grants(&account.name, &account.host)
            .await?
        {
            if row.proxied_user == row.user && row.proxied_host == row.host {
                continue;
            }
            let resource = if row.proxied_user.is_empty() && row.proxied_host.is_empty() {
                self.server.clone()
            } else {
                match self
                    .resolve(&row.proxied_user, &row.proxied_host, "proxy grants")
                    .await?
                {
                    Some(target) => target.identity(),
                    None => continue,
                }
            };
            if row.with_grant {
                held.insert((PROXY_WITH_GRANT_PRIV.to_owned(), resource.clone()));
            }
            held.insert((PROXY_PRIV.to_owned(), resource));
        }
        Ok(())
    }

    async fn roles(&self, account: &AccountIdentity, held: &mut Held) -> Result<()> {
        for edge in self
            .storage
            .role_edges(&account.name, &account.host)
            .await?
        {
            if edge.from_user == edge.to_user && edge.from_host == edge.to_host {
                continue;
            }
            let Some(role) = self
                .resolve(&edge.from_user, &edge.from_host, "role edges")
                .await?
            else {
                continue;
            };
            let resource = role.identity();
            if is_yes(&edge.with_admin_option) {
                held.insert((
                    ROLE_ASSIGNMENT_WITH_GRANT_PRIV.to_owned(),
                    resource.clone(),
                ));
            }
            held.insert((ROLE_ASSIGNMENT_PRIV.to_owned(), resource));
        }
        Ok(())
    }

    fn skipped(&self, database: &str) -> bool {
        let skipped = self.settings.skips(database);
        if skipped {
            debug!(database, "skipping grants on skipped database");
        }
        skipped
    }
}
