//! MySQL Connector
//!
//! Syncs databases, tables, columns, routines, users and roles from a MySQL
//! or MariaDB server, reports the privileges each account holds, and applies
//! grant and revoke requests as single administrative statements.
//!
//! ```no_run
//! use grantline_core::config::{ConnectorConfig, CredentialsMap};
//! use grantline_core::Connector;
//! use grantline_mysql::MySqlConnector;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ConnectorConfig::default();
//! let mut credentials = CredentialsMap::new();
//! credentials.insert(
//!     "connection_string".to_owned(),
//!     "mysql://root@localhost:3306".to_owned(),
//! );
//! let mysql = MySqlConnector::new(&config, &credentials).await?;
//! assert!(mysql.check().await);
//! # Ok(())
//! # }
//! ```

mod catalog;
mod client;
mod consts;
mod credentials;
mod entitlements;
mod error;
mod escape;
mod identity;
mod pagination;
mod reconciler;
mod settings;
mod syncers;
mod translator;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use grantline_core::config::{ConnectorConfig, CredentialsMap};
use grantline_core::connectors::nodes::{AccountField, ConnectorMetadata};
use grantline_core::logging::{info, warn};
use grantline_core::{AccountManager, Connector, ResourceSyncer};
use maplit::hashmap;

pub use catalog::{Catalog, CatalogEntry};
pub use client::rows;
pub use client::{MySqlClient, ServerCapability, Storage};
pub use credentials::{generate as generate_password, satisfies_policy};
pub use entitlements::{entitlement_id, entitlements_for};
pub use error::Error;
pub use escape::{quote_account, quote_ident};
pub use identity::{AccountIdentity, ResourceIdentity};
pub use pagination::Window;
pub use reconciler::GrantReconciler;
pub use settings::MySqlSettings;
pub use syncers::{
    ColumnSyncer, DatabaseSyncer, RoleSyncer, RoutineSyncer, ServerSyncer, SyncContext,
    TableSyncer, UserSyncer,
};
pub use translator::{
    decode_entitlement_id, decode_grant_id, decode_principal_id, Action, DecodedEntitlement,
    MutationTranslator,
};

/// The main MySQL Connector struct.
pub struct MySqlConnector {
    ctx: SyncContext,
}

impl MySqlConnector {
    /// Build a connector over an existing storage backend. Reads the server
    /// identity once up front.
    pub async fn with_storage(
        settings: MySqlSettings,
        storage: Arc<dyn Storage>,
        capability: ServerCapability,
    ) -> Result<Self> {
        let server = storage
            .server_info()
            .await
            .context("failed to read server info")?;
        info!(
            hostname = %server.hostname,
            version = %server.version,
            modern = capability.modern,
            "mysql connector ready"
        );
        Ok(Self {
            ctx: SyncContext {
                storage,
                catalog: Catalog::build(),
                settings,
                capability,
                server,
            },
        })
    }

    pub fn context(&self) -> &SyncContext {
        &self.ctx
    }

    /// Account lifecycle for users.
    pub fn account_manager(&self) -> impl AccountManager + '_ {
        UserSyncer::new(&self.ctx)
    }

    /// Grant an entitlement by id, whatever kind of resource it targets.
    pub async fn grant(&self, principal_id: &str, entitlement_id: &str) -> Result<()> {
        self.ctx.grant(principal_id, entitlement_id).await
    }

    /// Revoke a grant by id.
    pub async fn revoke(&self, grant_id: &str) -> Result<()> {
        self.ctx.revoke(grant_id).await
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    /// Validates the config and opens the connection.
    async fn new(config: &ConnectorConfig, credentials: &CredentialsMap) -> Result<Box<Self>> {
        let settings = MySqlSettings::from_config(config, credentials)
            .context("invalid mysql connector config")?;
        let client = MySqlClient::connect(&settings.connection_string)
            .await
            .context("failed to connect to mysql")?;
        let capability = client.capability();
        Ok(Box::new(
            Self::with_storage(settings, Arc::new(client), capability).await?,
        ))
    }

    async fn check(&self) -> bool {
        match self.ctx.storage.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("mysql connection check failed: {e}");
                false
            }
        }
    }

    async fn metadata(&self) -> Result<ConnectorMetadata> {
        Ok(ConnectorMetadata {
            display_name: self.ctx.server.hostname.to_owned(),
            description: format!("MySQL {}", self.ctx.server.version),
            account_creation_fields: hashmap! {
                "username".to_owned() => AccountField {
                    display_name: "Username".to_owned(),
                    description: "Name of the account to create".to_owned(),
                    required: true,
                    placeholder: "alice".to_owned(),
                    order: 1,
                },
            },
        })
    }

    /// Roles only exist on modern servers, and columns only when some table
    /// is expanded.
    fn resource_syncers(&self) -> Vec<Box<dyn ResourceSyncer + '_>> {
        let ctx = &self.ctx;
        let mut syncers: Vec<Box<dyn ResourceSyncer + '_>> = vec![
            Box::new(ServerSyncer::new(ctx)),
            Box::new(DatabaseSyncer::new(ctx)),
            Box::new(TableSyncer::new(ctx)),
            Box::new(RoutineSyncer::new(ctx)),
            Box::new(UserSyncer::new(ctx)),
        ];
        if !ctx.settings.expand_columns.is_empty() {
            syncers.push(Box::new(ColumnSyncer::new(ctx)));
        }
        if ctx.capability.modern {
            syncers.push(Box::new(RoleSyncer::new(ctx)));
        }
        syncers
    }
}
