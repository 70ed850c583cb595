//! Resource type ids and the privilege ids that get special treatment.

pub const SERVER: &str = "server";
pub const DATABASE: &str = "database";
pub const TABLE: &str = "table";
pub const COLUMN: &str = "column";
pub const ROUTINE: &str = "routine";
pub const USER: &str = "user";
pub const ROLE: &str = "role";

/// Suffix for the synthetic WITH GRANT OPTION / WITH ADMIN OPTION variant of
/// a privilege.
pub const WITH_GRANT_SUFFIX: &str = "_with_grant";

pub const GRANT_PRIV: &str = "grant";
pub const PROXY_PRIV: &str = "proxy";
pub const PROXY_WITH_GRANT_PRIV: &str = "proxy_with_grant";
pub const ROLE_ASSIGNMENT_PRIV: &str = "role_assignment";
pub const ROLE_ASSIGNMENT_WITH_GRANT_PRIV: &str = "role_assignment_with_grant";

/// Privileges the column "grant" entitlement stands for.
pub const COLUMN_GRANT_BUNDLE: &[&str] = &["SELECT", "INSERT", "UPDATE", "REFERENCES"];

/// Host used for provisioned accounts when none is configured.
pub const DEFAULT_ACCOUNT_HOST: &str = "%";
