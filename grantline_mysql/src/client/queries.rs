//! SQL text for the catalog and grant table reads.

pub(crate) const SERVER_INFO: &str = "SELECT @@hostname AS hostname, @@version AS version";

pub(crate) const PING: &str = "SELECT 1";

/// Schemas in name order, leaving out `skipped` bound names.
pub(crate) fn list_databases(skipped: usize) -> String {
    let filter = if skipped == 0 {
        String::new()
    } else {
        format!(
            "WHERE SCHEMA_NAME NOT IN ({}) ",
            vec!["?"; skipped].join(", ")
        )
    };
    format!(
        "SELECT SCHEMA_NAME FROM information_schema.SCHEMATA {filter}\
         ORDER BY SCHEMA_NAME LIMIT ? OFFSET ?"
    )
}

pub(crate) const LIST_TABLES: &str = "SELECT TABLE_SCHEMA, TABLE_NAME FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = ? ORDER BY TABLE_NAME LIMIT ? OFFSET ?";

pub(crate) const LIST_COLUMNS: &str =
    "SELECT TABLE_SCHEMA, TABLE_NAME, COLUMN_NAME FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? ORDER BY ORDINAL_POSITION LIMIT ? OFFSET ?";

pub(crate) const LIST_ROUTINES: &str =
    "SELECT ROUTINE_SCHEMA, SPECIFIC_NAME, ROUTINE_TYPE FROM information_schema.ROUTINES \
     WHERE ROUTINE_SCHEMA = ? ORDER BY SPECIFIC_NAME LIMIT ? OFFSET ?";

pub(crate) const ROUTINE_TYPE: &str = "SELECT ROUTINE_SCHEMA, SPECIFIC_NAME, ROUTINE_TYPE \
     FROM information_schema.ROUTINES WHERE ROUTINE_SCHEMA = ? AND SPECIFIC_NAME = ?";

pub(crate) const GLOBAL_GRANTS: &str = "SELECT USER, HOST, PRIV, \
     CAST(WITH_GRANT_OPTION AS CHAR) AS WITH_GRANT_OPTION \
     FROM mysql.global_grants WHERE USER = ? AND HOST = ?";

pub(crate) const DATABASE_GRANTS: &str = "SELECT User, Host, Db, CAST(CONCAT(
    CASE WHEN Select_priv = 'Y' THEN 'select,' ELSE '' END,
    CASE WHEN Insert_priv = 'Y' THEN 'insert,' ELSE '' END,
    CASE WHEN Update_priv = 'Y' THEN 'update,' ELSE '' END,
    CASE WHEN Delete_priv = 'Y' THEN 'delete,' ELSE '' END,
    CASE WHEN Create_priv = 'Y' THEN 'create,' ELSE '' END,
    CASE WHEN Drop_priv = 'Y' THEN 'drop,' ELSE '' END,
    CASE WHEN Grant_priv = 'Y' THEN 'grant,' ELSE '' END,
    CASE WHEN References_priv = 'Y' THEN 'references,' ELSE '' END,
    CASE WHEN Index_priv = 'Y' THEN 'index,' ELSE '' END,
    CASE WHEN Alter_priv = 'Y' THEN 'alter,' ELSE '' END,
    CASE WHEN Create_tmp_table_priv = 'Y' THEN 'create_temporary_tables,' ELSE '' END,
    CASE WHEN Lock_tables_priv = 'Y' THEN 'lock_tables,' ELSE '' END,
    CASE WHEN Execute_priv = 'Y' THEN 'execute,' ELSE '' END,
    CASE WHEN Create_view_priv = 'Y' THEN 'create_view,' ELSE '' END,
    CASE WHEN Show_view_priv = 'Y' THEN 'show_view,' ELSE '' END,
    CASE WHEN Create_routine_priv = 'Y' THEN 'create_routine,' ELSE '' END,
    CASE WHEN Alter_routine_priv = 'Y' THEN 'alter_routine,' ELSE '' END,
    CASE WHEN Event_priv = 'Y' THEN 'event,' ELSE '' END,
    CASE WHEN Trigger_priv = 'Y' THEN 'trigger,' ELSE '' END
    ) AS CHAR) AS privs
    FROM mysql.db WHERE User = ? AND Host = ?";

pub(crate) const TABLE_GRANTS: &str = "SELECT User, Host, Db, Table_name, \
     CAST(Table_priv AS CHAR) AS Table_priv \
     FROM mysql.tables_priv WHERE User = ? AND Host = ?";

pub(crate) const COLUMN_GRANTS: &str = "SELECT User, Host, Db, Table_name, Column_name, \
     CAST(Column_priv AS CHAR) AS Column_priv \
     FROM mysql.columns_priv WHERE User = ? AND Host = ?";

pub(crate) const PROXY_GRANTS: &str = "SELECT User, Host, Proxied_user, Proxied_host, \
     With_grant FROM mysql.proxies_priv WHERE User = ? AND Host = ?";

pub(crate) const ROLE_EDGES: &str = "SELECT FROM_USER, FROM_HOST, TO_USER, TO_HOST, \
     CAST(WITH_ADMIN_OPTION AS CHAR) AS WITH_ADMIN_OPTION \
     FROM mysql.role_edges WHERE TO_USER = ? AND TO_HOST = ?";

const USER_TYPE: &str =
    "CAST(CASE WHEN authentication_string = '' THEN 'role' ELSE 'user' END AS CHAR) AS user_type";

const STATIC_GLOBAL_PRIVS: &[(&str, &str)] = &[
    ("Select_priv", "select"),
    ("Insert_priv", "insert"),
    ("Update_priv", "update"),
    ("Delete_priv", "delete"),
    ("Create_priv", "create"),
    ("Drop_priv", "drop"),
    ("Reload_priv", "reload"),
    ("Shutdown_priv", "shutdown"),
    ("Process_priv", "process"),
    ("File_priv", "file"),
    ("Grant_priv", "grant"),
    ("References_priv", "references"),
    ("Index_priv", "index"),
    ("Alter_priv", "alter"),
    ("Show_db_priv", "show_databases"),
    ("Super_priv", "super"),
    ("Create_tmp_table_priv", "create_temporary_tables"),
    ("Lock_tables_priv", "lock_tables"),
    ("Execute_priv", "execute"),
    ("Repl_slave_priv", "replication_slave"),
    ("Repl_client_priv", "replication_client"),
    ("Create_view_priv", "create_view"),
    ("Show_view_priv", "show_view"),
    ("Create_routine_priv", "create_routine"),
    ("Alter_routine_priv", "alter_routine"),
    ("Create_user_priv", "create_user"),
    ("Event_priv", "event"),
    ("Trigger_priv", "trigger"),
    ("Create_tablespace_priv", "create_tablespace"),
];

const MODERN_GLOBAL_PRIVS: &[(&str, &str)] = &[
    ("Create_role_priv", "create_role"),
    ("Drop_role_priv", "drop_role"),
];

/// A single account with its static global privileges as a comma list.
pub(crate) fn get_account(modern: bool) -> String {
    let privs = STATIC_GLOBAL_PRIVS
        .iter()
        .chain(if modern { MODERN_GLOBAL_PRIVS } else { &[] })
        .map(|(column, id)| format!("CASE WHEN {column} = 'Y' THEN '{id},' ELSE '' END"))
        .collect::<Vec<_>>()
        .join(",\n    ");
    format!(
        "SELECT User, Host, CAST(CONCAT(\n    {privs}\n    ) AS CHAR) AS privs, {USER_TYPE} \
         FROM mysql.user WHERE User = ? AND Host = ?"
    )
}

/// Accounts of one kind, optionally collapsed by username.
pub(crate) fn list_accounts(role: bool, collapse: bool) -> String {
    let filter = if role {
        "authentication_string = ''"
    } else {
        "authentication_string != ''"
    };
    let user_type = if role { "role" } else { "user" };
    if collapse {
        format!(
            "SELECT User, CAST(GROUP_CONCAT(Host ORDER BY Host) AS CHAR) AS Host, \
             '{user_type}' AS user_type FROM mysql.user WHERE {filter} \
             GROUP BY User ORDER BY User LIMIT ? OFFSET ?"
        )
    } else {
        format!(
            "SELECT User, Host, {USER_TYPE} FROM mysql.user WHERE {filter} \
             ORDER BY User, Host LIMIT ? OFFSET ?"
        )
    }
}
