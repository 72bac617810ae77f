use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::lifetime::TokenLifetime;

/// Identity claims carried by an access token.
///
/// Generic over the role type so each service keeps its own closed role set
/// while sharing the token layout. `iat` and `exp` are Unix timestamps in
/// seconds; `exp` is always present and always computed server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims<R> {
    /// Subject (user identifier)
    pub sub: String,

    /// Email of the subject at issuance time
    pub email: String,

    /// Role of the subject at issuance time
    pub role: R,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl<R> Claims<R> {
    /// Create claims issued now and expiring after `lifetime`.
    pub fn issue(
        subject: impl ToString,
        email: impl ToString,
        role: R,
        lifetime: &TokenLifetime,
    ) -> Self {
        Self::issued_at(subject, email, role, Utc::now(), lifetime)
    }

    /// Create claims with an explicit issuance instant.
    ///
    /// # Arguments
    /// * `subject` - Unique subject identifier
    /// * `email` - Subject email
    /// * `role` - Subject role
    /// * `issued_at` - Issuance instant
    /// * `lifetime` - Validity window added to `issued_at`
    pub fn issued_at(
        subject: impl ToString,
        email: impl ToString,
        role: R,
        issued_at: DateTime<Utc>,
        lifetime: &TokenLifetime,
    ) -> Self {
        let expires_at = issued_at + lifetime.as_duration();

        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Override the expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Check if the claims are expired at `current_timestamp`.
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
