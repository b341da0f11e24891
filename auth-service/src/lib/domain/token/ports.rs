use async_trait::async_trait;

use crate::domain::token::errors::RefreshTokenError;
use crate::domain::token::models::RefreshToken;

/// Persistence operations for issued refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist an issued token record.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError>;

    /// Retrieve the record for an exact token value, if one exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_token(
        &self,
        token_value: &str,
    ) -> Result<Option<RefreshToken>, RefreshTokenError>;

    /// Atomically remove the record for `token_value`.
    ///
    /// Returns whether a record existed. Atomicity of delete-if-present is
    /// what keeps two concurrent expiry checks on the same value from both
    /// observing a live record.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn delete(&self, token_value: &str) -> Result<bool, RefreshTokenError>;
}
