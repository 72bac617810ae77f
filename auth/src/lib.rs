//! Authentication utilities library
//!
//! Provides reusable authentication primitives for services:
//! - Password hashing (Argon2id, PHC strings, per-call salt)
//! - JWT token signing and validation (HS256, mandatory expiry)
//! - Token lifetime parsing (`"1h"`, `"30 minutes"`, ...)
//!
//! Each service defines its own ports and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler, TokenLifetime};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let lifetime: TokenLifetime = "1h".parse().unwrap();
//! let claims = Claims::issue("user123", "alice@example.com", "user".to_string(), &lifetime);
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims<String> = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::LifetimeError;
pub use jwt::TokenLifetime;
pub use password::PasswordError;
pub use password::PasswordHasher;
