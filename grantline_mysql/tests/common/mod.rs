#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use grantline_mysql::rows::{
    AccountKind, AccountRow, ColumnGrantRow, ColumnRow, DatabaseGrantRow, DatabaseRow,
    GlobalGrantRow, ProxyGrantRow, RoleEdgeRow, RoutineRow, ServerInfo, TableGrantRow, TableRow,
};
use grantline_mysql::{
    Error, MySqlConnector, MySqlSettings, ServerCapability, Storage, Window,
};

/// In-memory stand-in for a MySQL server. Records every executed statement.
#[derive(Default)]
pub struct FakeStorage {
    pub server: ServerInfo,
    pub databases: Vec<String>,
    pub tables: Vec<(String, String)>,
    pub columns: Vec<(String, String, String)>,
    pub routines: Vec<(String, String, String)>,
    pub accounts: Vec<AccountRow>,
    pub global_grants: Vec<GlobalGrantRow>,
    pub database_grants: Vec<DatabaseGrantRow>,
    pub table_grants: Vec<TableGrantRow>,
    pub column_grants: Vec<ColumnGrantRow>,
    pub proxy_grants: Vec<ProxyGrantRow>,
    pub role_edges: Vec<RoleEdgeRow>,
    pub executed: Mutex<Vec<String>>,
    /// Storage method that fails with a closed pool.
    pub failing: Option<&'static str>,
}

impl FakeStorage {
    pub fn new(version: &str) -> Self {
        Self {
            server: ServerInfo {
                hostname: "db-01".to_owned(),
                version: version.to_owned(),
            },
            ..Default::default()
        }
    }

    pub fn with_user(mut self, user: &str, host: &str, privs: &str) -> Self {
        self.accounts.push(account(user, host, "user", privs));
        self
    }

    pub fn with_role(mut self, role: &str, host: &str) -> Self {
        self.accounts.push(account(role, host, "role", ""));
        self
    }

    pub fn with_database_grant(mut self, user: &str, host: &str, db: &str, privs: &str) -> Self {
        self.database_grants.push(DatabaseGrantRow {
            user: user.to_owned(),
            host: host.to_owned(),
            database: db.to_owned(),
            privs: privs.to_owned(),
        });
        self
    }

    pub fn with_table_grant(
        mut self,
        user: &str,
        host: &str,
        db: &str,
        table: &str,
        privs: &str,
    ) -> Self {
        self.table_grants.push(TableGrantRow {
            user: user.to_owned(),
            host: host.to_owned(),
            database: db.to_owned(),
            table: table.to_owned(),
            privs: privs.to_owned(),
        });
        self
    }

    pub fn with_column_grant(
        mut self,
        user: &str,
        host: &str,
        (db, table, column): (&str, &str, &str),
        privs: &str,
    ) -> Self {
        self.column_grants.push(ColumnGrantRow {
            user: user.to_owned(),
            host: host.to_owned(),
            database: db.to_owned(),
            table: table.to_owned(),
            column: column.to_owned(),
            privs: privs.to_owned(),
        });
        self
    }

    pub fn with_global_grant(mut self, user: &str, host: &str, privilege: &str, grantable: bool) -> Self {
        self.global_grants.push(GlobalGrantRow {
            user: user.to_owned(),
            host: host.to_owned(),
            privilege: privilege.to_owned(),
            with_grant_option: if grantable { "Y" } else { "N" }.to_owned(),
        });
        self
    }

    pub fn with_proxy(
        mut self,
        (user, host): (&str, &str),
        (proxied_user, proxied_host): (&str, &str),
        with_grant: bool,
    ) -> Self {
        self.proxy_grants.push(ProxyGrantRow {
            user: user.to_owned(),
            host: host.to_owned(),
            proxied_user: proxied_user.to_owned(),
            proxied_host: proxied_host.to_owned(),
            with_grant,
        });
        self
    }

    /// `to` holds the `from` role.
    pub fn with_role_edge(mut self, (from_user, from_host): (&str, &str), (to_user, to_host): (&str, &str), admin: bool) -> Self {
        self.role_edges.push(RoleEdgeRow {
            from_user: from_user.to_owned(),
            from_host: from_host.to_owned(),
            to_user: to_user.to_owned(),
            to_host: to_host.to_owned(),
            with_admin_option: if admin { "Y" } else { "N" }.to_owned(),
        });
        self
    }

    pub fn failing_on(mut self, method: &'static str) -> Self {
        self.failing = Some(method);
        self
    }

    fn fail_if(&self, method: &str) -> Result<(), Error> {
        match self.failing {
            Some(failing) if failing == method => Err(Error::Storage(sqlx::Error::PoolClosed)),
            _ => Ok(()),
        }
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

pub fn account(user: &str, host: &str, user_type: &str, privs: &str) -> AccountRow {
    AccountRow {
        user: user.to_owned(),
        host: host.to_owned(),
        user_type: user_type.to_owned(),
        privs: privs.to_owned(),
    }
}

fn page<T: Clone>(rows: &[T], window: &Window) -> Vec<T> {
    rows.iter()
        .skip(window.offset)
        .take(window.fetch_limit())
        .cloned()
        .collect()
}

fn owned_by<T: Clone>(rows: &[T], user: &str, host: &str, key: impl Fn(&T) -> (&str, &str)) -> Vec<T> {
    rows.iter()
        .filter(|r| key(r) == (user, host))
        .cloned()
        .collect()
}

#[async_trait]
impl Storage for FakeStorage {
    async fn server_info(&self) -> Result<ServerInfo, Error> {
        self.fail_if("server_info")?;
        Ok(self.server.clone())
    }

    async fn ping(&self) -> Result<(), Error> {
        self.fail_if("ping")?;
        Ok(())
    }

    async fn list_databases(
        &self,
        skip: &[&str],
        window: &Window,
    ) -> Result<Vec<DatabaseRow>, Error> {
        self.fail_if("list_databases")?;
        let rows: Vec<_> = self
            .databases
            .iter()
            .filter(|name| !skip.contains(&name.as_str()))
            .map(|name| DatabaseRow { name: name.clone() })
            .collect();
        Ok(page(&rows, window))
    }

    async fn list_tables(&self, database: &str, window: &Window) -> Result<Vec<TableRow>, Error> {
        self.fail_if("list_tables")?;
        let rows: Vec<_> = self
            .tables
            .iter()
            .filter(|(db, _)| db == database)
            .map(|(db, name)| TableRow {
                database: db.clone(),
                name: name.clone(),
            })
            .collect();
        Ok(page(&rows, window))
    }

    async fn list_columns(
        &self,
        database: &str,
        table: &str,
        window: &Window,
    ) -> Result<Vec<ColumnRow>, Error> {
        self.fail_if("list_columns")?;
        let rows: Vec<_> = self
            .columns
            .iter()
            .filter(|(db, t, _)| db == database && t == table)
            .map(|(db, t, name)| ColumnRow {
                database: db.clone(),
                table: t.clone(),
                name: name.clone(),
            })
            .collect();
        Ok(page(&rows, window))
    }

    async fn list_routines(&self, database: &str, window: &Window) -> Result<Vec<RoutineRow>, Error> {
        self.fail_if("list_routines")?;
        let rows: Vec<_> = self
            .routines
            .iter()
            .filter(|(db, _, _)| db == database)
            .map(|(db, name, routine_type)| RoutineRow {
                database: db.clone(),
                name: name.clone(),
                routine_type: routine_type.clone(),
            })
            .collect();
        Ok(page(&rows, window))
    }

    async fn list_accounts(
        &self,
        kind: AccountKind,
        collapse: bool,
        window: &Window,
    ) -> Result<Vec<AccountRow>, Error> {
        self.fail_if("list_accounts")?;
        let matching = self.accounts.iter().filter(|a| a.kind() == kind);
        let rows: Vec<_> = if collapse {
            let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
            for a in matching {
                grouped.entry(&a.user).or_default().push(&a.host);
            }
            grouped
                .into_iter()
                .map(|(user, hosts)| account(user, &hosts.join(","), kind.as_str(), ""))
                .collect()
        } else {
            matching.cloned().collect()
        };
        Ok(page(&rows, window))
    }

    async fn get_account(&self, user: &str, host: &str) -> Result<Option<AccountRow>, Error> {
        self.fail_if("get_account")?;
        Ok(self
            .accounts
            .iter()
            .find(|a| a.user == user && a.host == host)
            .cloned())
    }

    async fn global_grants(&self, user: &str, host: &str) -> Result<Vec<GlobalGrantRow>, Error> {
        self.fail_if("global_grants")?;
        Ok(owned_by(&self.global_grants, user, host, |r| (r.user.as_str(), r.host.as_str())))
    }

    async fn database_grants(&self, user: &str, host: &str) -> Result<Vec<DatabaseGrantRow>, Error> {
        self.fail_if("database_grants")?;
        Ok(owned_by(&self.database_grants, user, host, |r| (r.user.as_str(), r.host.as_str())))
    }

    async fn table_grants(&self, user: &str, host: &str) -> Result<Vec<TableGrantRow>, Error> {
        self.fail_if("table_grants")?;
        Ok(owned_by(&self.table_grants, user, host, |r| (r.user.as_str(), r.host.as_str())))
    }

    async fn column_grants(&self, user: &str, host: &str) -> Result<Vec<ColumnGrantRow>, Error> {
        self.fail_if("column_grants")?;
        Ok(owned_by(&self.column_grants, user, host, |r| (r.user.as_str(), r.host.as_str())))
    }

    async fn proxy_grants(&self, user: &str, host: &str) -> Result<Vec<ProxyGrantRow>, Error> {
        self.fail_if("proxy_grants")?;
        Ok(owned_by(&self.proxy_grants, user, host, |r| (r.user.as_str(), r.host.as_str())))
    }

    async fn role_edges(&self, user: &str, host: &str) -> Result<Vec<RoleEdgeRow>, Error> {
        self.fail_if("role_edges")?;
        Ok(owned_by(&self.role_edges, user, host, |r| (r.to_user.as_str(), r.to_host.as_str())))
    }

    async fn routine_type(&self, database: &str, routine: &str) -> Result<Option<String>, Error> {
        self.fail_if("routine_type")?;
        Ok(self
            .routines
            .iter()
            .find(|(db, name, _)| db == database && name == routine)
            .map(|(_, _, routine_type)| routine_type.clone()))
    }

    async fn execute(&self, statement: &str) -> Result<(), Error> {
        self.fail_if("execute")?;
        self.executed.lock().unwrap().push(statement.to_owned());
        Ok(())
    }
}

pub fn settings() -> MySqlSettings {
    MySqlSettings {
        connection_string: "mysql://root@localhost".to_owned(),
        account_host: "%".to_owned(),
        ..Default::default()
    }
}

/// Build a connector over the fake. Returns the shared fake so tests can
/// inspect executed statements.
pub async fn connector(
    storage: FakeStorage,
    settings: MySqlSettings,
) -> (MySqlConnector, Arc<FakeStorage>) {
    let capability = ServerCapability::from_version(&storage.server.version).unwrap();
    let storage = Arc::new(storage);
    let connector = MySqlConnector::with_storage(settings, storage.clone(), capability)
        .await
        .unwrap();
    (connector, storage)
}
