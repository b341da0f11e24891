use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error for refresh token store operations
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenError {
    #[error("No user found for username: {0}")]
    UnknownUser(String),

    #[error("Refresh token has expired")]
    Expired,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<UserError> for RefreshTokenError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(name) => RefreshTokenError::UnknownUser(name),
            UserError::UsernameAlreadyExists(msg) | UserError::DatabaseError(msg) => {
                RefreshTokenError::DatabaseError(msg)
            }
        }
    }
}
