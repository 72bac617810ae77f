use std::sync::Arc;

use async_trait::async_trait;
use auth::JwtError;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::LoginOutcome;
use crate::domain::authentication::models::Principal;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::authentication::ports::TokenIssuer;
use crate::domain::authentication::ports::TokenVerifier;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

// Argon2id hash at the hasher's cost, verified when no account matches so an
// unknown email costs the same work as a wrong password.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Credential verification, registration and token resolution.
pub struct AuthService<UR, T>
where
    UR: UserRepository,
    T: TokenIssuer + TokenVerifier,
{
    repository: Arc<UR>,
    tokens: Arc<T>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, T> AuthService<UR, T>
where
    UR: UserRepository,
    T: TokenIssuer + TokenVerifier,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `tokens` - Token signing and verification
    pub fn new(repository: Arc<UR>, tokens: Arc<T>) -> Self {
        Self {
            repository,
            tokens,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn find_active_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        Ok(self
            .repository
            .find_by_email(email)
            .await?
            .filter(User::is_active))
    }

    fn verify_against_dummy(&self, password: &str) {
        let _ = self.password_hasher.verify(password, DUMMY_PASSWORD_HASH);
    }
}

#[async_trait]
impl<UR, T> AuthServicePort for AuthService<UR, T>
where
    UR: UserRepository,
    T: TokenIssuer + TokenVerifier,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        let Ok(email) = EmailAddress::new(command.email) else {
            tracing::debug!("Login rejected: malformed email");
            self.verify_against_dummy(&command.password);
            return Err(AuthError::InvalidCredentials);
        };

        let Some(user) = self.find_active_by_email(&email).await? else {
            tracing::warn!(email = %email, "Login rejected: no active account");
            self.verify_against_dummy(&command.password);
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify(&command.password, &user.password_hash)?
        {
            tracing::warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .issue(&user)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginOutcome {
            access_token,
            user: PublicUser::from(&user),
        })
    }

    async fn register(&self, command: RegisterCommand) -> Result<PublicUser, AuthError> {
        if self.find_active_by_email(&command.email).await?.is_some() {
            return Err(AuthError::EmailConflict(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;
        let user = User::register(command.name, command.email, password_hash);

        // The store's uniqueness constraint decides concurrent registrations;
        // its violation arrives as EmailAlreadyExists and becomes EmailConflict.
        let created = self.repository.create(user).await.map_err(|e| {
            tracing::warn!(error = %e, "Registration write rejected");
            AuthError::from(e)
        })?;

        tracing::info!(user_id = %created.id, "User registered");

        Ok(PublicUser::from(&created))
    }

    async fn authenticate_token(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::InvalidToken(e)
        })?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| AuthError::InvalidToken(JwtError::Malformed(e.to_string())))?;

        match self.repository.find_by_id(&user_id).await? {
            Some(user) if user.is_active() => {}
            _ => {
                tracing::warn!(user_id = %user_id, "Token subject no longer active");
                return Err(AuthError::AccountUnavailable);
            }
        }

        Ok(Principal {
            user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}
