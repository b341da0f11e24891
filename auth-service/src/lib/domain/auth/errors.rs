use auth_core::CredentialError;
use auth_core::PasswordError;
use auth_core::TokenError;
use thiserror::Error;

use crate::domain::token::errors::RefreshTokenError;
use crate::domain::user::errors::UserError;

/// Top-level error for the signup, login, and refresh flows.
///
/// Client errors (`Validation`, `DuplicateUser`, `AuthenticationFailed`,
/// `UnknownToken`, `TokenExpired`, `UnknownUser`) carry a stable message a
/// caller can act on. `Storage` marks a transient collaborator failure and
/// is kept distinct from both client errors and internal faults.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] CredentialError),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Invalid credentials")]
    AuthenticationFailed,

    #[error("No user found: {0}")]
    UnknownUser(String),

    #[error("Refresh token is not recognized")]
    UnknownToken,

    #[error("Refresh token has expired")]
    TokenExpired,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(username) => AuthError::DuplicateUser(username),
            UserError::NotFound(name) => AuthError::UnknownUser(name),
            UserError::DatabaseError(msg) => AuthError::Storage(msg),
        }
    }
}

impl From<RefreshTokenError> for AuthError {
    fn from(err: RefreshTokenError) -> Self {
        match err {
            RefreshTokenError::UnknownUser(name) => AuthError::UnknownUser(name),
            RefreshTokenError::Expired => AuthError::TokenExpired,
            RefreshTokenError::DatabaseError(msg) => AuthError::Storage(msg),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
