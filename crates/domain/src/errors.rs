use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("I/O failure: {0}")]
    IoFailure(String),

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Parse failure: {0}")]
    ParseFailure(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Domain not found (NXDOMAIN)")]
    NxDomain,

    #[error("Query timeout")]
    QueryTimeout,
}
