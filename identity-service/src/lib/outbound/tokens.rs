use auth::JwtError;
use auth::JwtHandler;
use auth::TokenLifetime;

use crate::domain::authentication::models::AccessClaims;
use crate::domain::authentication::ports::TokenIssuer;
use crate::domain::authentication::ports::TokenVerifier;
use crate::domain::user::models::User;

/// HS256 access tokens signed with the process-wide secret.
pub struct JwtTokenService {
    handler: JwtHandler,
    lifetime: TokenLifetime,
}

impl JwtTokenService {
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    pub fn new(secret: &[u8], lifetime: TokenLifetime) -> Result<Self, JwtError> {
        Ok(Self {
            handler: JwtHandler::new(secret)?,
            lifetime,
        })
    }

    pub fn lifetime(&self) -> &TokenLifetime {
        &self.lifetime
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user: &User) -> Result<String, JwtError> {
        let claims = AccessClaims::issue(user.id, user.email.as_str(), user.role, &self.lifetime);
        self.handler.encode(&claims)
    }
}

impl TokenVerifier for JwtTokenService {
    fn verify(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.handler.decode::<AccessClaims>(token)
    }
}
