use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::SignupCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::user::models::User;

/// Port for the authentication flows.
///
/// Each operation is one request/response cycle; no session state is held
/// between calls.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first credential pair.
    ///
    /// # Errors
    /// * `Validation` - Email shape or password strength rejected
    /// * `DuplicateUser` - Username is already taken
    /// * `Storage` - A collaborator failed
    async fn signup(&self, command: SignupCommand) -> Result<TokenPair, AuthError>;

    /// Authenticate a username/password pair and issue a credential pair.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown username or non-matching password
    /// * `Storage` - A collaborator failed
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchange a refresh token for a fresh access token.
    ///
    /// # Errors
    /// * `UnknownToken` - No record exists for the presented value
    /// * `TokenExpired` - The record's lifetime ended; it has been consumed
    /// * `Storage` - A collaborator failed
    async fn refresh(&self, token_value: &str) -> Result<TokenPair, AuthError>;

    /// Administrative listing of all registered users.
    ///
    /// # Errors
    /// * `Storage` - A collaborator failed
    async fn list_users(&self) -> Result<Vec<User>, AuthError>;
}
