//! The fixed privilege table.
//!
//! Static privileges are the ones backed by `*_priv` columns in the grant
//! tables; dynamic privileges live in `mysql.global_grants` and only exist
//! on MySQL 8 and later.

use grantline_core::connectors::nodes::EntitlementPurpose;

use crate::consts::{COLUMN, DATABASE, ROLE, ROUTINE, SERVER, TABLE, USER};

/// One row of the privilege table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrivilegeDef {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub kinds: &'static [&'static str],
    /// Also register a `_with_grant` variant.
    pub grantable: bool,
    pub modern_only: bool,
    /// Dynamic privileges keep their underscores in statements.
    pub dynamic: bool,
    pub purpose: EntitlementPurpose,
}

const GLOBAL: &[&str] = &[SERVER];
const GLOBAL_DATABASE: &[&str] = &[SERVER, DATABASE];
const GLOBAL_DATABASE_ROUTINE: &[&str] = &[SERVER, DATABASE, ROUTINE];
const GLOBAL_DATABASE_TABLE: &[&str] = &[SERVER, DATABASE, TABLE];
const GLOBAL_DATABASE_TABLE_COLUMN: &[&str] = &[SERVER, DATABASE, TABLE, COLUMN];
const EVERY_OBJECT: &[&str] = &[SERVER, DATABASE, TABLE, COLUMN, ROUTINE];

const fn static_priv(
    id: &'static str,
    display_name: &'static str,
    description: &'static str,
    kinds: &'static [&'static str],
) -> PrivilegeDef {
    PrivilegeDef {
        id,
        display_name,
        description,
        kinds,
        grantable: false,
        modern_only: false,
        dynamic: false,
        purpose: EntitlementPurpose::Permission,
    }
}

const fn modern_static_priv(
    id: &'static str,
    display_name: &'static str,
    description: &'static str,
) -> PrivilegeDef {
    PrivilegeDef {
        modern_only: true,
        ..static_priv(id, display_name, description, GLOBAL)
    }
}

const fn dynamic_priv(
    id: &'static str,
    display_name: &'static str,
    description: &'static str,
) -> PrivilegeDef {
    PrivilegeDef {
        grantable: true,
        modern_only: true,
        dynamic: true,
        ..static_priv(id, display_name, description, GLOBAL)
    }
}

pub(crate) const PRIVILEGES: &[PrivilegeDef] = &[
    static_priv("alter", "Alter", "Enable use of ALTER TABLE", GLOBAL_DATABASE_TABLE),
    static_priv(
        "alter_routine",
        "Alter routine",
        "Enable stored routines to be altered or dropped",
        GLOBAL_DATABASE_ROUTINE,
    ),
    static_priv("create", "Create", "Enable database and table creation", GLOBAL_DATABASE_TABLE),
    modern_static_priv("create_role", "Create role", "Enable role creation"),
    static_priv(
        "create_routine",
        "Create routine",
        "Enable stored routine creation",
        GLOBAL_DATABASE,
    ),
    static_priv(
        "create_tablespace",
        "Create tablespace",
        "Enable tablespaces and log file groups to be created, altered, or dropped",
        GLOBAL,
    ),
    static_priv(
        "create_temporary_tables",
        "Create temporary tables",
        "Enable use of CREATE TEMPORARY TABLE",
        GLOBAL_DATABASE,
    ),
    static_priv(
        "create_user",
        "Create user",
        "Enable use of CREATE USER, DROP USER, RENAME USER, and REVOKE ALL PRIVILEGES",
        GLOBAL,
    ),
    static_priv(
        "create_view",
        "Create view",
        "Enable views to be created or altered",
        GLOBAL_DATABASE_TABLE,
    ),
    static_priv("delete", "Delete", "Enable use of DELETE", GLOBAL_DATABASE_TABLE),
    static_priv(
        "drop",
        "Drop",
        "Enable databases, tables, and views to be dropped",
        GLOBAL_DATABASE_TABLE,
    ),
    modern_static_priv("drop_role", "Drop role", "Enable roles to be dropped"),
    static_priv(
        "event",
        "Event",
        "Enable use of events for the Event Scheduler",
        GLOBAL_DATABASE,
    ),
    static_priv(
        "execute",
        "Execute",
        "Enable the user to execute stored routines",
        GLOBAL_DATABASE_ROUTINE,
    ),
    static_priv(
        "file",
        "File",
        "Enable the user to cause the server to read or write files",
        GLOBAL,
    ),
    static_priv(
        "grant",
        "Grant",
        "Enable privileges to be granted to or removed from other accounts",
        EVERY_OBJECT,
    ),
    static_priv("index", "Index", "Enable indexes to be created or dropped", GLOBAL_DATABASE_TABLE),
    static_priv("insert", "Insert", "Enable use of INSERT", GLOBAL_DATABASE_TABLE_COLUMN),
    static_priv(
        "lock_tables",
        "Lock tables",
        "Enable use of LOCK TABLES on tables for which you have the SELECT privilege",
        GLOBAL_DATABASE,
    ),
    static_priv(
        "process",
        "Process",
        "Enable the user to see all processes with SHOW PROCESSLIST",
        GLOBAL,
    ),
    PrivilegeDef {
        grantable: true,
        ..static_priv("proxy", "Proxy", "Enable user proxying", &[SERVER, USER, ROLE])
    },
    static_priv(
        "references",
        "References",
        "Enable foreign key creation",
        GLOBAL_DATABASE_TABLE_COLUMN,
    ),
    static_priv("reload", "Reload", "Enable use of FLUSH operations", GLOBAL),
    static_priv(
        "replication_client",
        "Replication client",
        "Enable the user to ask where source or replica servers are.",
        GLOBAL,
    ),
    static_priv(
        "replication_slave",
        "Replication slave",
        "Enable replicas to read binary log events from the source",
        GLOBAL,
    ),
    static_priv("select", "Select", "Enable use of SELECT", GLOBAL_DATABASE_TABLE_COLUMN),
    static_priv(
        "show_databases",
        "Show databases",
        "Enable SHOW DATABASES to show all databases.",
        GLOBAL,
    ),
    static_priv(
        "show_view",
        "Show view",
        "Enable use of SHOW CREATE VIEW",
        GLOBAL_DATABASE_TABLE,
    ),
    static_priv("shutdown", "Shutdown", "Enable use of mysqladmin shutdown", GLOBAL),
    static_priv(
        "super",
        "Super",
        "Enable use of other administrative operations such as CHANGE REPLICATION SOURCE TO, \
         CHANGE MASTER TO, KILL, PURGE BINARY LOGS, SET GLOBAL, and mysqladmin debug command.",
        GLOBAL,
    ),
    static_priv("trigger", "Trigger", "Enable trigger operations", GLOBAL_DATABASE_TABLE),
    static_priv("update", "Update", "Enable use of UPDATE", GLOBAL_DATABASE_TABLE_COLUMN),
    dynamic_priv(
        "application_password_admin",
        "Application password admin",
        "Enable dual password administration",
    ),
    dynamic_priv(
        "audit_abort_exempt",
        "Audit abort exempt",
        "Allow queries blocked by audit log filter",
    ),
    dynamic_priv("audit_admin", "Audit admin", "Enable audit log configuration"),
    dynamic_priv(
        "authentication_policy_admin",
        "Authentication policy admin",
        "Enable authentication policy administration.",
    ),
    dynamic_priv("backup_admin", "Backup admin", "Enable backup administration"),
    dynamic_priv("binlog_admin", "Binlog admin", "Enable binary log control"),
    dynamic_priv(
        "binlog_encryption_admin",
        "Binlog encryption admin",
        "Enable activation and deactivation of binary log encryption",
    ),
    dynamic_priv("clone_admin", "Clone admin", "Enable clone administration"),
    dynamic_priv(
        "connection_admin",
        "Connection admin",
        "Enable connection limit/restriction control",
    ),
    dynamic_priv(
        "encryption_key_admin",
        "Encryption key admin",
        "Enable InnoDB key rotation",
    ),
    dynamic_priv(
        "firewall_admin",
        "Firewall admin",
        "Enable firewall rule administration, any user",
    ),
    dynamic_priv(
        "firewall_exempt",
        "Firewall exempt",
        "Exempt user from firewall restrictions",
    ),
    dynamic_priv(
        "firewall_user",
        "Firewall user",
        "Enable firewall rule administration, self",
    ),
    dynamic_priv(
        "flush_optimizer_costs",
        "Flush optimizer costs",
        "Enable optimizer cost reloading",
    ),
    dynamic_priv("flush_status", "Flush status", "Enable status indicator flushing"),
    dynamic_priv("flush_tables", "Flush tables", "Enable table flushing"),
    dynamic_priv(
        "flush_user_resources",
        "Flush user resources",
        "Enable user-resource flushing",
    ),
    dynamic_priv(
        "group_replication_admin",
        "Group replication admin",
        "Enable Group Replication control",
    ),
    dynamic_priv(
        "group_replication_stream",
        "Group replication stream",
        "Allows a user account to be used for establishing Group Replication's group \
         communication connections.",
    ),
    dynamic_priv(
        "innodb_redo_log_archive",
        "InnoDB redo log archive",
        "Enable redo log archiving administration",
    ),
    dynamic_priv(
        "innodb_redo_log_enable",
        "InnoDB redo log enable",
        "Enable or disable redo logging",
    ),
    dynamic_priv(
        "ndb_stored_user",
        "NDB stored user",
        "Enable sharing of user or role between SQL nodes (NDB Cluster)",
    ),
    dynamic_priv(
        "passwordless_user_admin",
        "Passwordless user admin",
        "Enable passwordless user account administration",
    ),
    dynamic_priv(
        "persist_ro_variables_admin",
        "Persist RO variables admin",
        "Enable persisting read-only system variables",
    ),
    dynamic_priv(
        "replication_applier",
        "Replication applier",
        "Act as the PRIVILEGE_CHECKS_USER for a replication channel",
    ),
    dynamic_priv(
        "replication_slave_admin",
        "Replication slave admin",
        "Enable regular replication control",
    ),
    dynamic_priv(
        "resource_group_admin",
        "Resource group admin",
        "Enable resource group administration",
    ),
    dynamic_priv(
        "resource_group_user",
        "Resource group user",
        "Enable resource group administration",
    ),
    dynamic_priv(
        "role_admin",
        "Role admin",
        "Enable roles to be granted or revoked, use of WITH ADMIN OPTION",
    ),
    dynamic_priv(
        "sensitive_variables_observer",
        "Sensitive variables observer",
        "Enable viewing the values of sensitive system variables",
    ),
    dynamic_priv(
        "service_connection_admin",
        "Service connection admin",
        "Enables connections to the network interface that permits only administrative connections",
    ),
    dynamic_priv(
        "session_variables_admin",
        "Session variables admin",
        "Enable setting restricted session system variables",
    ),
    dynamic_priv("set_user_id", "Set user ID", "Enable setting non-self DEFINER values"),
    dynamic_priv(
        "show_routine",
        "Show routine",
        "Enable access to stored routine definitions",
    ),
    dynamic_priv(
        "skip_query_rewrite",
        "Skip query rewrite",
        "Do not rewrite queries executed by this user",
    ),
    dynamic_priv("system_user", "System user", "Designate account as system account"),
    dynamic_priv(
        "system_variables_admin",
        "System variables admin",
        "Enable modifying or persisting global system variables",
    ),
    dynamic_priv(
        "table_encryption_admin",
        "Table encryption admin",
        "Enable overriding default encryption settings",
    ),
    dynamic_priv(
        "version_token_admin",
        "Version token admin",
        "Enable use of Version Tokens functions",
    ),
    dynamic_priv("xa_recover_admin", "XA recover admin", "Enable XA RECOVER execution"),
    PrivilegeDef {
        id: "role_assignment",
        display_name: "Role Member",
        description: "Enables SET ROLE",
        kinds: &[USER, ROLE],
        grantable: true,
        modern_only: true,
        dynamic: false,
        purpose: EntitlementPurpose::Assignment,
    },
];
