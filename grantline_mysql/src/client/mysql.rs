//! sqlx-backed [`Storage`].

use std::time::Duration;

use async_trait::async_trait;
use grantline_core::logging::debug;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use super::queries;
use super::rows::{
    AccountKind, AccountRow, ColumnGrantRow, ColumnRow, DatabaseGrantRow, DatabaseRow,
    GlobalGrantRow, ProxyGrantRow, RoleEdgeRow, RoutineRow, ServerInfo, TableGrantRow, TableRow,
};
use super::{ServerCapability, Storage};
use crate::error::Result;
use crate::pagination::Window;

/// Connection to a MySQL or MariaDB server.
///
/// The pool holds a single connection, so reads and statements are
/// serialized.
pub struct MySqlClient {
    pool: MySqlPool,
    capability: ServerCapability,
}

impl MySqlClient {
    /// Connect and probe the server version.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .max_lifetime(Duration::from_secs(60))
            .connect(url)
            .await?;
        let server: ServerInfo = sqlx::query_as(queries::SERVER_INFO)
            .fetch_one(&pool)
            .await?;
        let capability = ServerCapability::from_version(&server.version)?;
        debug!(
            hostname = %server.hostname,
            version = %server.version,
            modern = capability.modern,
            "connected"
        );
        Ok(Self { pool, capability })
    }

    pub fn capability(&self) -> ServerCapability {
        self.capability
    }

    async fn account_rows<T>(&self, sql: &str, user: &str, host: &str) -> Result<Vec<T>>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::mysql::MySqlRow> + Send + Unpin,
    {
        Ok(sqlx::query_as::<_, T>(sql)
            .bind(user)
            .bind(host)
            .fetch_all(&self.pool)
            .await?)
    }
}

fn bounds(window: &Window) -> (u64, u64) {
    (window.fetch_limit() as u64, window.offset as u64)
}

#[async_trait]
impl Storage for MySqlClient {
    async fn server_info(&self) -> Result<ServerInfo> {
        Ok(sqlx::query_as(queries::SERVER_INFO)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query(queries::PING).execute(&self.pool).await?;
        Ok(())
    }

    async fn list_databases(&self, skip: &[&str], window: &Window) -> Result<Vec<DatabaseRow>> {
        let (limit, offset) = bounds(window);
        let sql = queries::list_databases(skip.len());
        let mut query = sqlx::query_as::<_, DatabaseRow>(&sql);
        for name in skip {
            query = query.bind(*name);
        }
        Ok(query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn list_tables(&self, database: &str, window: &Window) -> Result<Vec<TableRow>> {
        let (limit, offset) = bounds(window);
        Ok(sqlx::query_as(queries::LIST_TABLES)
            .bind(database)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn list_columns(
        &self,
        database: &str,
        table: &str,
        window: &Window,
    ) -> Result<Vec<ColumnRow>> {
        let (limit, offset) = bounds(window);
        Ok(sqlx::query_as(queries::LIST_COLUMNS)
            .bind(database)
            .bind(table)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn list_routines(&self, database: &str, window: &Window) -> Result<Vec<RoutineRow>> {
        let (limit, offset) = bounds(window);
        Ok(sqlx::query_as(queries::LIST_ROUTINES)
            .bind(database)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn list_accounts(
        &self,
        kind: AccountKind,
        collapse: bool,
        window: &Window,
    ) -> Result<Vec<AccountRow>> {
        let (limit, offset) = bounds(window);
        let sql = queries::list_accounts(kind == AccountKind::Role, collapse);
        Ok(sqlx::query_as(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_account(&self, user: &str, host: &str) -> Result<Option<AccountRow>> {
        let sql = queries::get_account(self.capability.modern);
        Ok(sqlx::query_as(&sql)
            .bind(user)
            .bind(host)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn global_grants(&self, user: &str, host: &str) -> Result<Vec<GlobalGrantRow>> {
        self.account_rows(queries::GLOBAL_GRANTS, user, host).await
    }

    async fn database_grants(&self, user: &str, host: &str) -> Result<Vec<DatabaseGrantRow>> {
        self.account_rows(queries::DATABASE_GRANTS, user, host).await
    }

    async fn table_grants(&self, user: &str, host: &str) -> Result<Vec<TableGrantRow>> {
        self.account_rows(queries::TABLE_GRANTS, user, host).await
    }

    async fn column_grants(&self, user: &str, host: &str) -> Result<Vec<ColumnGrantRow>> {
        self.account_rows(queries::COLUMN_GRANTS, user, host).await
    }

    async fn proxy_grants(&self, user: &str, host: &str) -> Result<Vec<ProxyGrantRow>> {
        self.account_rows(queries::PROXY_GRANTS, user, host).await
    }

    async fn role_edges(&self, user: &str, host: &str) -> Result<Vec<RoleEdgeRow>> {
        self.account_rows(queries::ROLE_EDGES, user, host).await
    }

    async fn routine_type(&self, database: &str, routine: &str) -> Result<Option<String>> {
        let row: Option<RoutineRow> = sqlx::query_as(queries::ROUTINE_TYPE)
            .bind(database)
            .bind(routine)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.routine_type))
    }

    async fn execute(&self, statement: &str) -> Result<()> {
        debug!(statement, "executing");
        sqlx::raw_sql(statement).execute(&self.pool).await?;
        Ok(())
    }
}
