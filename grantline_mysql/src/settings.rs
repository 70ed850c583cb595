use std::collections::HashSet;

use grantline_core::config::{ConnectorConfig, CredentialsMap};

use crate::consts::DEFAULT_ACCOUNT_HOST;
use crate::error::{Error, Result};

/// Connector settings, read from the connector config and credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MySqlSettings {
    /// `mysql://` connection URL.
    pub connection_string: String,
    /// Databases left out of every listing and grant scope.
    pub skip_databases: HashSet<String>,
    /// `db.table` pairs whose column grants are kept at column granularity.
    pub expand_columns: HashSet<String>,
    /// Merge accounts that share a username across hosts.
    pub collapse_users: bool,
    /// Host for accounts created by the connector.
    pub account_host: String,
}

impl MySqlSettings {
    pub fn from_config(config: &ConnectorConfig, credentials: &CredentialsMap) -> Result<Self> {
        let connection_string = credentials
            .get("connection_string")
            .map(|s| s.trim().to_owned())
            .unwrap_or_default();

        let collapse_users = config
            .get_flag("collapse_users")
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let account_host = config
            .config
            .get("account_host")
            .map(|h| h.trim().to_owned())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_ACCOUNT_HOST.to_owned());

        let settings = Self {
            connection_string,
            skip_databases: config.get_list("skip_databases").into_iter().collect(),
            expand_columns: config.get_list("expand_columns").into_iter().collect(),
            collapse_users,
            account_host,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Perform simple field validation to catch bad input.
    pub fn validate(&self) -> Result<()> {
        if self.connection_string.is_empty() {
            return Err(Error::InvalidConfig(
                "connection_string is missing. Please make sure your credentials file is correct"
                    .to_owned(),
            ));
        }
        for entry in &self.expand_columns {
            match entry.split_once('.') {
                Some((db, table)) if !db.is_empty() && !table.is_empty() && !table.contains('.') => {}
                _ => {
                    return Err(Error::InvalidConfig(format!(
                        "expand_columns entries must be db.table, got {entry}"
                    )))
                }
            }
        }
        Ok(())
    }

    pub fn skips(&self, database: &str) -> bool {
        self.skip_databases.contains(database)
    }

    pub fn expands(&self, database: &str, table: &str) -> bool {
        self.expand_columns.contains(&format!("{database}.{table}"))
    }
}
