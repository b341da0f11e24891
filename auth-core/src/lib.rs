//! Authentication infrastructure library
//!
//! Provides the credential and token primitives the auth service is built
//! from:
//! - Signup credential validation (email shape, password strength)
//! - Access token signing and verification (HS256 compact tokens)
//! - Password hashing (Argon2id)
//!
//! Everything here is pure computation over explicitly passed state: the
//! signing secret, the token TTL, and the clock are constructor arguments,
//! never globals.
//!
//! # Examples
//!
//! ## Credential Validation
//! ```
//! use auth_core::CredentialValidator;
//!
//! let validator = CredentialValidator::new();
//! assert!(validator.validate("alice@example.com", "longenough!").is_ok());
//! assert!(validator.validate("not-an-email", "longenough!").is_err());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth_core::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", 3600);
//! let token = codec.sign("alice").unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth_core::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```

pub mod credentials;
pub mod jwt;
pub mod password;

pub use credentials::CredentialError;
pub use credentials::CredentialValidator;
pub use jwt::AccessTokenClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
