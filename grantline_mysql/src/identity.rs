//! Resource and account identifiers.
//!
//! Resource ids look like `kind:body`. For databases, tables, columns and
//! routines the body is `db[.name[.column]]`. Servers carry their hostname
//! as an opaque body, and accounts (users and roles) carry `name@host`,
//! where a collapsed account lists several hosts separated by commas.

use std::fmt::Display;
use std::str::FromStr;

use grantline_core::connectors::nodes::ResourceId;

use crate::consts;
use crate::error::{Error, Result};

const MAX_SEGMENTS: usize = 3;

/// A `(name, host)` account. `host` may hold a comma-separated list when
/// accounts sharing a username are collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountIdentity {
    pub name: String,
    pub host: String,
}

impl AccountIdentity {
    pub fn new(name: &str, host: &str) -> Self {
        Self {
            name: name.to_owned(),
            host: host.to_owned(),
        }
    }

    /// Every underlying host for this account.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.host.split(',').map(str::trim).filter(|h| !h.is_empty())
    }

    pub fn is_collapsed(&self) -> bool {
        self.hosts().count() > 1
    }

    /// The single-host accounts behind this identity.
    pub fn expand(&self) -> Vec<AccountIdentity> {
        self.hosts().map(|h| AccountIdentity::new(&self.name, h)).collect()
    }
}

impl Display for AccountIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.host)
    }
}

impl FromStr for AccountIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Hosts never contain '@', names occasionally do.
        match s.rsplit_once('@') {
            Some((name, host)) if !host.is_empty() => Ok(AccountIdentity::new(name, host)),
            _ => Err(Error::MalformedId(s.to_owned())),
        }
    }
}

/// A typed resource identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceIdentity {
    Server { name: String },
    Database { database: String },
    Table { database: String, table: String },
    Column {
        database: String,
        table: String,
        column: String,
    },
    Routine { database: String, routine: String },
    User(AccountIdentity),
    Role(AccountIdentity),
}

impl ResourceIdentity {
    pub fn server(name: &str) -> Self {
        Self::Server {
            name: name.to_owned(),
        }
    }

    pub fn database(database: &str) -> Self {
        Self::Database {
            database: database.to_owned(),
        }
    }

    pub fn table(database: &str, table: &str) -> Self {
        Self::Table {
            database: database.to_owned(),
            table: table.to_owned(),
        }
    }

    pub fn column(database: &str, table: &str, column: &str) -> Self {
        Self::Column {
            database: database.to_owned(),
            table: table.to_owned(),
            column: column.to_owned(),
        }
    }

    pub fn routine(database: &str, routine: &str) -> Self {
        Self::Routine {
            database: database.to_owned(),
            routine: routine.to_owned(),
        }
    }

    /// The resource type id for this identity.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Server { .. } => consts::SERVER,
            Self::Database { .. } => consts::DATABASE,
            Self::Table { .. } => consts::TABLE,
            Self::Column { .. } => consts::COLUMN,
            Self::Routine { .. } => consts::ROUTINE,
            Self::User(_) => consts::USER,
            Self::Role(_) => consts::ROLE,
        }
    }

    /// The body after the `kind:` prefix.
    pub fn body(&self) -> String {
        match self {
            Self::Server { name } => name.to_owned(),
            Self::Database { database } => database.to_owned(),
            Self::Table { database, table } => format!("{database}.{table}"),
            Self::Column {
                database,
                table,
                column,
            } => format!("{database}.{table}.{column}"),
            Self::Routine { database, routine } => format!("{database}.{routine}"),
            Self::User(account) | Self::Role(account) => account.to_string(),
        }
    }

    /// The enclosing resource: column to table, table or routine to
    /// database. Databases hang off the server, which isn't derivable from
    /// the id alone, so they return `None` like every other kind.
    pub fn parent(&self) -> Option<ResourceIdentity> {
        match self {
            Self::Column {
                database, table, ..
            } => Some(Self::table(database, table)),
            Self::Table { database, .. } | Self::Routine { database, .. } => {
                Some(Self::database(database))
            }
            _ => None,
        }
    }

    /// The account behind a user or role id.
    pub fn account(&self) -> Option<&AccountIdentity> {
        match self {
            Self::User(account) | Self::Role(account) => Some(account),
            _ => None,
        }
    }

    /// Convert to the framework's resource id.
    pub fn to_resource_id(&self) -> ResourceId {
        ResourceId::new(self.kind(), self.to_string())
    }
}

impl Display for ResourceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.body())
    }
}

impl FromStr for ResourceIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::MalformedId(s.to_owned());
        let (kind, body) = s.split_once(':').ok_or_else(malformed)?;
        if body.is_empty() {
            return Err(malformed());
        }
        from_parts(kind, body).ok_or_else(malformed)
    }
}

/// Build an identity from an already split kind and body.
pub(crate) fn from_parts(kind: &str, body: &str) -> Option<ResourceIdentity> {
    let segments: Vec<&str> = body.split('.').collect();
    let dotted_ok = segments.len() <= MAX_SEGMENTS && segments.iter().all(|s| !s.is_empty());

    let identity = match (kind, segments.as_slice()) {
        (consts::SERVER, _) if !body.is_empty() => ResourceIdentity::server(body),
        (consts::USER, _) => ResourceIdentity::User(body.parse().ok()?),
        (consts::ROLE, _) => ResourceIdentity::Role(body.parse().ok()?),
        (_, _) if !dotted_ok => return None,
        (consts::DATABASE, [db]) => ResourceIdentity::database(db),
        (consts::TABLE, [db, table]) => ResourceIdentity::table(db, table),
        (consts::COLUMN, [db, table, column]) => ResourceIdentity::column(db, table, column),
        (consts::ROUTINE, [db, routine]) => ResourceIdentity::routine(db, routine),
        _ => return None,
    };
    Some(identity)
}

/// Parse a resource id and require it to be of the given kind.
pub fn parse_kind(s: &str, kind: &str) -> Result<ResourceIdentity> {
    let identity: ResourceIdentity = s.parse()?;
    if identity.kind() != kind {
        return Err(Error::UnsupportedResourceKind(identity.kind().to_owned()));
    }
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        let ids = [
            ResourceIdentity::server("db-01.internal"),
            ResourceIdentity::database("sales"),
            ResourceIdentity::table("sales", "orders"),
            ResourceIdentity::column("sales", "orders", "total"),
            ResourceIdentity::routine("sales", "refresh_totals"),
            ResourceIdentity::User(AccountIdentity::new("alice", "%")),
            ResourceIdentity::User(AccountIdentity::new("bob", "10.0.0.1,localhost")),
            ResourceIdentity::Role(AccountIdentity::new("analyst", "%")),
        ];
        for id in ids {
            let parsed: ResourceIdentity = id.to_string().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn serializes_with_kind_prefix() {
        assert_eq!(
            ResourceIdentity::column("db", "t", "c").to_string(),
            "column:db.t.c"
        );
        assert_eq!(
            ResourceIdentity::User(AccountIdentity::new("alice", "%")).to_string(),
            "user:alice@%"
        );
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for bad in [
            "",
            "noprefix",
            "type:a.b.c.d",
            "column:a.b.c.d",
            "table:db",
            "table:db.",
            "database:",
            "user:alice",
            "user:alice@",
            "widget:thing",
        ] {
            assert!(
                matches!(bad.parse::<ResourceIdentity>(), Err(Error::MalformedId(_))),
                "{bad} should be malformed"
            );
        }
    }

    #[test]
    fn server_names_may_contain_dots() {
        let parsed: ResourceIdentity = "server:db.example.com".parse().unwrap();
        assert_eq!(parsed, ResourceIdentity::server("db.example.com"));
    }

    #[test]
    fn parents_walk_up_the_hierarchy() {
        let column = ResourceIdentity::column("db", "t", "c");
        let table = column.parent().unwrap();
        assert_eq!(table, ResourceIdentity::table("db", "t"));
        assert_eq!(table.parent(), Some(ResourceIdentity::database("db")));
        assert_eq!(
            ResourceIdentity::routine("db", "r").parent(),
            Some(ResourceIdentity::database("db"))
        );
        assert_eq!(ResourceIdentity::database("db").parent(), None);
    }

    #[test]
    fn collapsed_accounts_expand_per_host() {
        let account: AccountIdentity = "bob@localhost,%".parse().unwrap();
        assert!(account.is_collapsed());
        assert_eq!(
            account.expand(),
            vec![
                AccountIdentity::new("bob", "localhost"),
                AccountIdentity::new("bob", "%")
            ]
        );
    }

    #[test]
    fn parse_kind_checks_the_kind() {
        assert!(parse_kind("table:db.t", "table").is_ok());
        assert!(matches!(
            parse_kind("table:db.t", "column"),
            Err(Error::UnsupportedResourceKind(_))
        ));
    }
}
