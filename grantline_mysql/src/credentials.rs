//! Random passwords for provisioned accounts.

use grantline_core::connectors::nodes::CredentialOptions;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};

pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const DEFAULT_LENGTH: usize = 12;
const MAX_ATTEMPTS: usize = 20;

/// True when the password has an uppercase letter, a lowercase letter, a
/// digit and a symbol.
pub fn satisfies_policy(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SYMBOLS.contains(c))
}

/// Produce a password for the given options.
pub fn generate(options: &CredentialOptions) -> Result<String> {
    generate_with(options, &mut rand::thread_rng())
}

pub(crate) fn generate_with<R: Rng>(options: &CredentialOptions, rng: &mut R) -> Result<String> {
    let length = match options {
        CredentialOptions::RandomPassword { length: 0 } => DEFAULT_LENGTH,
        CredentialOptions::RandomPassword { length } => *length,
        CredentialOptions::NoPassword => {
            return Err(Error::CredentialGenerationFailed(
                "unsupported credential option".to_owned(),
            ))
        }
    };

    let charset: Vec<char> = ALPHANUMERIC.chars().chain(SYMBOLS.chars()).collect();
    for _ in 0..MAX_ATTEMPTS {
        let password: String = (0..length)
            .filter_map(|_| charset.choose(rng).copied())
            .collect();
        if satisfies_policy(&password) {
            return Ok(password);
        }
    }

    Err(Error::CredentialGenerationFailed(format!(
        "failed to generate a valid password after {MAX_ATTEMPTS} attempts"
    )))
}
