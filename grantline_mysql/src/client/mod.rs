//! Access to the backing server.
//!
//! Everything above this module talks to a [`Storage`], which keeps the
//! reconciler and translator testable without a live server.

mod mysql;
mod queries;
pub mod rows;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::pagination::Window;
pub use mysql::MySqlClient;
use rows::{
    AccountKind, AccountRow, ColumnGrantRow, ColumnRow, DatabaseGrantRow, DatabaseRow,
    GlobalGrantRow, ProxyGrantRow, RoleEdgeRow, RoutineRow, ServerInfo, TableGrantRow, TableRow,
};

/// Which server generation we're talking to. Dynamic privileges and roles
/// only exist on modern (MySQL 8+) servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerCapability {
    pub modern: bool,
}

impl ServerCapability {
    /// Decide support and generation from `@@version`.
    pub fn from_version(version: &str) -> Result<Self> {
        let unsupported = || Error::UnsupportedServer(version.to_owned());
        let mariadb = version.to_lowercase().contains("mariadb");
        let mut parts = version.split(|c: char| !c.is_ascii_digit());
        let major: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(unsupported)?;
        let minor: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

        let supported = if mariadb {
            matches!(major, 10 | 11)
        } else {
            matches!((major, minor), (5, 7) | (8, _) | (9, _))
        };
        if !supported {
            return Err(unsupported());
        }
        Ok(Self {
            modern: !mariadb && major >= 8,
        })
    }
}

/// Row-level reads and statement execution against the server.
///
/// Listing calls take a [`Window`] and return up to `window.fetch_limit()`
/// rows starting at `window.offset`.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn server_info(&self) -> Result<ServerInfo>;
    async fn ping(&self) -> Result<()>;

    /// Databases in name order, excluding `skip`.
    async fn list_databases(&self, skip: &[&str], window: &Window) -> Result<Vec<DatabaseRow>>;
    async fn list_tables(&self, database: &str, window: &Window) -> Result<Vec<TableRow>>;
    async fn list_columns(
        &self,
        database: &str,
        table: &str,
        window: &Window,
    ) -> Result<Vec<ColumnRow>>;
    async fn list_routines(&self, database: &str, window: &Window) -> Result<Vec<RoutineRow>>;
    async fn list_accounts(
        &self,
        kind: AccountKind,
        collapse: bool,
        window: &Window,
    ) -> Result<Vec<AccountRow>>;

    /// A single account with its static global privileges.
    async fn get_account(&self, user: &str, host: &str) -> Result<Option<AccountRow>>;

    async fn global_grants(&self, user: &str, host: &str) -> Result<Vec<GlobalGrantRow>>;
    async fn database_grants(&self, user: &str, host: &str) -> Result<Vec<DatabaseGrantRow>>;
    async fn table_grants(&self, user: &str, host: &str) -> Result<Vec<TableGrantRow>>;
    async fn column_grants(&self, user: &str, host: &str) -> Result<Vec<ColumnGrantRow>>;
    async fn proxy_grants(&self, user: &str, host: &str) -> Result<Vec<ProxyGrantRow>>;
    /// Roles held by the account.
    async fn role_edges(&self, user: &str, host: &str) -> Result<Vec<RoleEdgeRow>>;

    /// `FUNCTION` or `PROCEDURE`, if the routine exists.
    async fn routine_type(&self, database: &str, routine: &str) -> Result<Option<String>>;

    /// Run one administrative statement.
    async fn execute(&self, statement: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_map_to_capabilities() {
        let modern = |v| ServerCapability::from_version(v).unwrap().modern;
        assert!(modern("8.0.36"));
        assert!(modern("8.4.0-commercial"));
        assert!(modern("9.1.0"));
        assert!(!modern("5.7.44-log"));
        assert!(!modern("10.11.6-MariaDB"));
        assert!(!modern("11.2.2-MariaDB-1:11.2.2+maria~ubu2204"));
    }

    #[test]
    fn old_versions_are_rejected() {
        for version in ["5.6.51", "5.5.62", "12.0.1-MariaDB", "garbage", ""] {
            assert!(
                matches!(
                    ServerCapability::from_version(version),
                    Err(Error::UnsupportedServer(_))
                ),
                "{version}"
            );
        }
    }
}
