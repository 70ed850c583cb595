//! Allow-list validation and quoting for everything interpolated into an
//! administrative statement.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::identity::AccountIdentity;

lazy_static! {
    static ref IDENT_PART: Regex = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
    static ref USER_NAME: Regex = Regex::new(r"^[a-zA-Z0-9_%.\-]+$").unwrap();
    static ref HOST_PATTERN: Regex = Regex::new(r"^[a-zA-Z0-9_%\\.\-]+$").unwrap();
}

/// Quote a (possibly dotted) SQL identifier, one backtick-quoted part per
/// dot-separated segment.
pub fn quote_ident(ident: &str) -> Result<String> {
    ident
        .split('.')
        .map(|part| {
            if !IDENT_PART.is_match(part) {
                return Err(Error::InvalidIdentifier(ident.to_owned()));
            }
            Ok(format!("`{}`", part.replace('`', "``")))
        })
        .collect::<Result<Vec<_>>>()
        .map(|parts| parts.join("."))
}

fn quote_account_part(part: &str, allowed: &Regex) -> Result<String> {
    if !allowed.is_match(part) {
        return Err(Error::InvalidIdentifier(part.to_owned()));
    }
    Ok(quote_literal(part))
}

/// `'name'@'host'` for a single-host account. Backslashes are only
/// accepted in the host, where they escape pattern wildcards.
pub fn quote_account(account: &AccountIdentity) -> Result<String> {
    Ok(format!(
        "{}@{}",
        quote_account_part(&account.name, &USER_NAME)?,
        quote_account_part(&account.host, &HOST_PATTERN)?
    ))
}

/// Escape a password for use inside a single-quoted literal.
pub fn quote_password(password: &str) -> String {
    quote_literal(password)
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}
