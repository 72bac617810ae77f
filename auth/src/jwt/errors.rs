use thiserror::Error;

/// Error type for JWT operations.
///
/// `InvalidSignature` and `Expired` are distinct here for logging; callers
/// facing clients should collapse them into one response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Signing secret is missing or empty")]
    MissingSecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}

/// Error for token lifetime parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifetimeError {
    #[error("Invalid token lifetime format: {0:?}")]
    InvalidFormat(String),

    #[error("Unknown token lifetime unit: {0:?}")]
    UnknownUnit(String),

    #[error("Token lifetime must be positive: {0:?}")]
    NotPositive(String),

    #[error("Token lifetime is too large: {0:?}")]
    OutOfRange(String),
}
