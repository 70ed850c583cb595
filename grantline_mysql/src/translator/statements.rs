//! Statement text. Every argument is already quoted.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Grant,
    Revoke,
}

impl Action {
    fn verb(&self) -> &'static str {
        match self {
            Action::Grant => "GRANT",
            Action::Revoke => "REVOKE",
        }
    }

    fn preposition(&self) -> &'static str {
        match self {
            Action::Grant => "TO",
            Action::Revoke => "FROM",
        }
    }

    /// The option clause only applies when granting.
    fn option(&self, enabled: bool, clause: &str) -> String {
        match self {
            Action::Grant if enabled => format!(" {clause}"),
            _ => String::new(),
        }
    }
}

/// `GRANT SELECT ON `db`.* TO 'u'@'h'`
pub(super) fn object_privilege(
    action: Action,
    keyword: &str,
    target: &str,
    account: &str,
    with_grant: bool,
) -> String {
    format!(
        "{} {keyword} ON {target} {} {account}{}",
        action.verb(),
        action.preposition(),
        action.option(with_grant, "WITH GRANT OPTION")
    )
}

/// `GRANT SELECT (`c`), INSERT (`c`) ON `db`.`t` TO 'u'@'h'`
pub(super) fn column_privilege(
    action: Action,
    keywords: &[String],
    column: &str,
    table: &str,
    account: &str,
) -> String {
    let privileges = keywords
        .iter()
        .map(|k| format!("{k} ({column})"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} {privileges} ON {table} {} {account}",
        action.verb(),
        action.preposition()
    )
}

/// `GRANT 'role'@'h' TO 'u'@'h'`
pub(super) fn role_membership(action: Action, role: &str, account: &str, with_admin: bool) -> String {
    format!(
        "{} {role} {} {account}{}",
        action.verb(),
        action.preposition(),
        action.option(with_admin, "WITH ADMIN OPTION")
    )
}

/// `GRANT PROXY ON 'target'@'h' TO 'u'@'h'`
pub(super) fn proxy(action: Action, target: &str, account: &str, with_grant: bool) -> String {
    object_privilege(action, "PROXY", target, account, with_grant)
}

pub(super) fn create_user(account: &str, password: &str) -> String {
    format!("CREATE USER {account} IDENTIFIED BY {password}")
}

pub(super) fn drop_user(account: &str) -> String {
    format!("DROP USER {account}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_and_revoke_shapes() {
        assert_eq!(
            object_privilege(Action::Grant, "SELECT", "`db`.`t`", "'a'@'%'", false),
            "GRANT SELECT ON `db`.`t` TO 'a'@'%'"
        );
        assert_eq!(
            object_privilege(Action::Revoke, "SELECT", "*.*", "'a'@'%'", true),
            "REVOKE SELECT ON *.* FROM 'a'@'%'"
        );
        assert_eq!(
            object_privilege(Action::Grant, "BACKUP_ADMIN", "*.*", "'a'@'%'", true),
            "GRANT BACKUP_ADMIN ON *.* TO 'a'@'%' WITH GRANT OPTION"
        );
    }

    #[test]
    fn column_privileges_list_each_keyword() {
        let keywords = vec!["SELECT".to_owned(), "UPDATE".to_owned()];
        assert_eq!(
            column_privilege(Action::Grant, &keywords, "`c`", "`db`.`t`", "'a'@'%'"),
            "GRANT SELECT (`c`), UPDATE (`c`) ON `db`.`t` TO 'a'@'%'"
        );
    }

    #[test]
    fn membership_and_proxy() {
        assert_eq!(
            role_membership(Action::Grant, "'r'@'%'", "'a'@'%'", true),
            "GRANT 'r'@'%' TO 'a'@'%' WITH ADMIN OPTION"
        );
        assert_eq!(
            role_membership(Action::Revoke, "'r'@'%'", "'a'@'%'", true),
            "REVOKE 'r'@'%' FROM 'a'@'%'"
        );
        assert_eq!(
            proxy(Action::Grant, "''@''", "'a'@'%'", false),
            "GRANT PROXY ON ''@'' TO 'a'@'%'"
        );
    }
}
