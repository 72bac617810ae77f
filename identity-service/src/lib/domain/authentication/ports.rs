use async_trait::async_trait;
use auth::JwtError;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AccessClaims;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::LoginOutcome;
use crate::domain::authentication::models::Principal;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::User;

/// Port for credential and token operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Access token and the public view of the account
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown, deleted or malformed email, or wrong password
    /// * `Password` - Stored hash is unreadable
    /// * `TokenIssuance` - Signing failed
    /// * `Repository` - Store lookup failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError>;

    /// Create a new account with the default role.
    ///
    /// # Errors
    /// * `EmailConflict` - Email is bound to an active account
    /// * `Password` - Hashing failed
    /// * `Repository` - Store write failed
    async fn register(&self, command: RegisterCommand) -> Result<PublicUser, AuthError>;

    /// Resolve the caller behind a bearer token.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, expired or malformed token
    /// * `AccountUnavailable` - Subject no longer exists or is soft-deleted
    /// * `Repository` - Store lookup failed
    async fn authenticate_token(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Signs access tokens for an account.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Issue a token whose claims are derived from `user`, expiring after the
    /// server-side lifetime.
    fn issue(&self, user: &User) -> Result<String, JwtError>;
}

/// Checks signature and expiry of presented tokens.
pub trait TokenVerifier: Send + Sync + 'static {
    fn verify(&self, token: &str) -> Result<AccessClaims, JwtError>;
}
