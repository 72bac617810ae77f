use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Errors raised by login, registration and token authentication.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown email and wrong password both end here, with one message.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already in use: {0}")]
    EmailConflict(String),

    #[error("Invalid token: {0}")]
    InvalidToken(JwtError),

    #[error("Account is no longer available")]
    AccountUnavailable,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Repository error: {0}")]
    Repository(UserError),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::EmailConflict(email),
            other => AuthError::Repository(other),
        }
    }
}
