use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type to allow services to define their own token payload.
/// Signs with HS256 (HMAC with SHA-256) and accepts nothing else.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// The MAC is recomputed over the received header and payload; `exp` is
    /// mandatory and checked with zero leeway.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match this handler's secret
    /// * `Expired` - Signature is valid but `exp` is in the past
    /// * `Malformed` - Token structure, algorithm or claims are invalid
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde::Deserialize;

    use super::*;
    use crate::jwt::Claims;
    use crate::jwt::TokenLifetime;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn claims() -> Claims<String> {
        Claims::issue(
            "user123",
            "a@x.com",
            "admin".to_string(),
            &TokenLifetime::default(),
        )
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let claims = claims();

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: Claims<String> = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_new_rejects_empty_secret() {
        assert!(matches!(JwtHandler::new(b""), Err(JwtError::MissingSecret)));
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET).unwrap();

        let result = handler.decode::<Claims<String>>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let token = handler1.encode(&claims()).expect("Failed to encode token");

        let result = handler2.decode::<Claims<String>>(&token);
        assert_eq!(result, Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let expired = claims().with_expiration(Utc::now().timestamp() - 10);

        let token = handler.encode(&expired).expect("Failed to encode token");

        let result = handler.decode::<Claims<String>>(&token);
        assert_eq!(result, Err(JwtError::Expired));
    }

    #[test]
    fn test_expired_token_with_wrong_secret_reports_signature() {
        let issuer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").unwrap();
        let expired = claims().with_expiration(Utc::now().timestamp() - 10);

        let token = issuer.encode(&expired).expect("Failed to encode token");

        assert_eq!(
            verifier.decode::<Claims<String>>(&token),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_decode_tampered_payload() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let token = handler.encode(&claims()).expect("Failed to encode token");

        // Original header and signature around another token's payload.
        let forged_claims = Claims::issue(
            "user123",
            "a@x.com",
            "superuser".to_string(),
            &TokenLifetime::default(),
        );
        let forged = handler.encode(&forged_claims).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(
            handler.decode::<Claims<String>>(&tampered),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_decode_requires_expiration() {
        #[derive(Debug, Serialize, Deserialize)]
        struct NoExpiry {
            sub: String,
        }

        let handler = JwtHandler::new(SECRET).unwrap();
        let token = handler
            .encode(&NoExpiry {
                sub: "user123".to_string(),
            })
            .unwrap();

        assert!(matches!(
            handler.decode::<NoExpiry>(&token),
            Err(JwtError::Malformed(_))
        ));
    }
}
