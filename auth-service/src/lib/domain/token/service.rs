use std::sync::Arc;

use chrono::Utc;

use crate::domain::token::errors::RefreshTokenError;
use crate::domain::token::models::RefreshToken;
use crate::domain::token::ports::RefreshTokenRepository;
use crate::domain::user::ports::UserRepository;

/// Ledger of issued refresh tokens.
///
/// Owns the set of live records it creates. Expiry is enforced lazily: a
/// record is checked, and consumed if past its lifetime, only when someone
/// presents it.
pub struct RefreshTokenService<RR, UR>
where
    RR: RefreshTokenRepository,
    UR: UserRepository,
{
    repository: Arc<RR>,
    users: Arc<UR>,
    ttl_seconds: i64,
}

impl<RR, UR> RefreshTokenService<RR, UR>
where
    RR: RefreshTokenRepository,
    UR: UserRepository,
{
    /// Create the service with injected persistence and directory ports.
    ///
    /// # Arguments
    /// * `repository` - Refresh token persistence implementation
    /// * `users` - User directory used to resolve the owning identity
    /// * `ttl_seconds` - Lifetime of every issued token
    pub fn new(repository: Arc<RR>, users: Arc<UR>, ttl_seconds: i64) -> Self {
        Self {
            repository,
            users,
            ttl_seconds,
        }
    }

    /// Issue a fresh refresh token for `username`.
    ///
    /// # Errors
    /// * `UnknownUser` - No identity exists for the username; tokens are
    ///   never issued for nonexistent identities
    /// * `DatabaseError` - Storage operation failed
    pub async fn issue(&self, username: &str) -> Result<RefreshToken, RefreshTokenError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| RefreshTokenError::UnknownUser(username.to_string()))?;

        let token = RefreshToken::issue(user.id, Utc::now(), self.ttl_seconds);
        self.repository.save(token).await
    }

    /// Fetch the stored record for an opaque token value.
    ///
    /// Absence is a signal, not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    pub async fn lookup(
        &self,
        token_value: &str,
    ) -> Result<Option<RefreshToken>, RefreshTokenError> {
        self.repository.find_by_token(token_value).await
    }

    /// Check a token's lifetime, consuming the record when it is past.
    ///
    /// An expired record is deleted before the failure is reported, so a
    /// subsequent `lookup` for the same value comes back empty. Callers
    /// must not assume the record still exists after a failed check.
    ///
    /// # Errors
    /// * `Expired` - The token's lifetime ended; the record is gone
    /// * `DatabaseError` - Storage operation failed
    pub async fn verify_not_expired(
        &self,
        token: RefreshToken,
    ) -> Result<RefreshToken, RefreshTokenError> {
        if token.is_expired(Utc::now()) {
            self.repository.delete(&token.token).await?;
            tracing::debug!(token = %token.token, "Expired refresh token consumed");
            return Err(RefreshTokenError::Expired);
        }

        Ok(token)
    }

    /// Remove a stored token, reporting whether a record existed.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    pub async fn revoke(&self, token_value: &str) -> Result<bool, RefreshTokenError> {
        self.repository.delete(token_value).await
    }
}
