use thiserror::Error;

/// Errors produced by the MySQL connector.
#[derive(Debug, Error)]
pub enum Error {
    /// A resource or account id didn't follow the id grammar.
    #[error("malformed id: {0}")]
    MalformedId(String),
    /// An entitlement, principal, or grant id didn't split into the expected parts.
    #[error("malformed entitlement id: {0}")]
    MalformedEntitlementId(String),
    /// An identifier failed the allow-list before being put into a statement.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    /// The privilege isn't known for the resource kind.
    #[error("unsupported privilege {privilege} for {kind}")]
    UnsupportedPrivilege { privilege: String, kind: String },
    /// The principal or resource kind can't take part in the operation.
    #[error("unsupported resource kind: {0}")]
    UnsupportedResourceKind(String),
    /// Passthrough from the backing store.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
    /// No password satisfying the policy could be produced.
    #[error("credential generation failed: {0}")]
    CredentialGenerationFailed(String),
    /// A referenced account or routine couldn't be looked up.
    #[error("unable to resolve {0}")]
    ResolutionFailure(String),
    /// The page token wasn't a decimal offset.
    #[error("invalid page token: {0}")]
    InvalidPageToken(String),
    /// The connected server version isn't supported.
    #[error("{0} is not a supported version of MySQL")]
    UnsupportedServer(String),
    /// Connector settings failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
