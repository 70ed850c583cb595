//! Row shapes read from the server's catalog and grant tables.

use sqlx::FromRow;

use crate::consts::{ROLE, USER};
use crate::identity::{AccountIdentity, ResourceIdentity};

#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct ServerInfo {
    pub hostname: String,
    pub version: String,
}

impl ServerInfo {
    pub fn identity(&self) -> ResourceIdentity {
        ResourceIdentity::server(&self.hostname)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DatabaseRow {
    #[sqlx(rename = "SCHEMA_NAME")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TableRow {
    #[sqlx(rename = "TABLE_SCHEMA")]
    pub database: String,
    #[sqlx(rename = "TABLE_NAME")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ColumnRow {
    #[sqlx(rename = "TABLE_SCHEMA")]
    pub database: String,
    #[sqlx(rename = "TABLE_NAME")]
    pub table: String,
    #[sqlx(rename = "COLUMN_NAME")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RoutineRow {
    #[sqlx(rename = "ROUTINE_SCHEMA")]
    pub database: String,
    #[sqlx(rename = "SPECIFIC_NAME")]
    pub name: String,
    #[sqlx(rename = "ROUTINE_TYPE")]
    pub routine_type: String,
}

/// Whether an account is a login user or a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    User,
    Role,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::User => USER,
            AccountKind::Role => ROLE,
        }
    }
}

/// An account from `mysql.user`. Accounts without an authentication string
/// are treated as roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct AccountRow {
    #[sqlx(rename = "User")]
    pub user: String,
    #[sqlx(rename = "Host")]
    pub host: String,
    pub user_type: String,
    /// Comma list of static global privileges. Only filled for single
    /// account lookups.
    #[sqlx(default)]
    pub privs: String,
}

impl AccountRow {
    pub fn account(&self) -> AccountIdentity {
        AccountIdentity::new(&self.user, &self.host)
    }

    pub fn kind(&self) -> AccountKind {
        if self.user_type == ROLE {
            AccountKind::Role
        } else {
            AccountKind::User
        }
    }

    pub fn identity(&self) -> ResourceIdentity {
        match self.kind() {
            AccountKind::User => ResourceIdentity::User(self.account()),
            AccountKind::Role => ResourceIdentity::Role(self.account()),
        }
    }
}

/// A dynamic privilege from `mysql.global_grants`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct GlobalGrantRow {
    #[sqlx(rename = "USER")]
    pub user: String,
    #[sqlx(rename = "HOST")]
    pub host: String,
    #[sqlx(rename = "PRIV")]
    pub privilege: String,
    #[sqlx(rename = "WITH_GRANT_OPTION")]
    pub with_grant_option: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DatabaseGrantRow {
    #[sqlx(rename = "User")]
    pub user: String,
    #[sqlx(rename = "Host")]
    pub host: String,
    #[sqlx(rename = "Db")]
    pub database: String,
    pub privs: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TableGrantRow {
    #[sqlx(rename = "User")]
    pub user: String,
    #[sqlx(rename = "Host")]
    pub host: String,
    #[sqlx(rename = "Db")]
    pub database: String,
    #[sqlx(rename = "Table_name")]
    pub table: String,
    #[sqlx(rename = "Table_priv")]
    pub privs: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ColumnGrantRow {
    #[sqlx(rename = "User")]
    pub user: String,
    #[sqlx(rename = "Host")]
    pub host: String,
    #[sqlx(rename = "Db")]
    pub database: String,
    #[sqlx(rename = "Table_name")]
    pub table: String,
    #[sqlx(rename = "Column_name")]
    pub column: String,
    #[sqlx(rename = "Column_priv")]
    pub privs: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ProxyGrantRow {
    #[sqlx(rename = "User")]
    pub user: String,
    #[sqlx(rename = "Host")]
    pub host: String,
    #[sqlx(rename = "Proxied_user")]
    pub proxied_user: String,
    #[sqlx(rename = "Proxied_host")]
    pub proxied_host: String,
    #[sqlx(rename = "With_grant")]
    pub with_grant: bool,
}

/// An edge in `mysql.role_edges`: `TO` holds the `FROM` role.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RoleEdgeRow {
    #[sqlx(rename = "FROM_USER")]
    pub from_user: String,
    #[sqlx(rename = "FROM_HOST")]
    pub from_host: String,
    #[sqlx(rename = "TO_USER")]
    pub to_user: String,
    #[sqlx(rename = "TO_HOST")]
    pub to_host: String,
    #[sqlx(rename = "WITH_ADMIN_OPTION")]
    pub with_admin_option: String,
}

/// Normalize a comma-separated privilege list into catalog ids:
/// trimmed, lowercase, spaces as underscores, blanks dropped.
pub fn privilege_ids(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.replace(' ', "_").to_lowercase())
}

/// `Y`/`N` enum columns.
pub fn is_yes(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("y")
}
