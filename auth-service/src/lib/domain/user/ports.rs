use async_trait::async_trait;

use crate::domain::user::errors::EventPublisherError;
use crate::domain::user::errors::UserError;
use crate::domain::user::events::UserCreatedEvent;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persistence operations for the user directory.
///
/// All lookups return an explicit present/absent result; absence is a
/// signal, not an error.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - The storage-level uniqueness constraint
    ///   rejected the username (including the case where two signups raced
    ///   past the pre-insert lookup)
    /// * `DatabaseError` - Storage operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve a user by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all users.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;
}

/// Event publishing for account lifecycle events.
#[async_trait]
pub trait EventPublisher: Send + Sync + 'static {
    /// Publish the account-creation event.
    ///
    /// # Errors
    /// * `SerializationFailed` - Event serialization failed
    /// * `PublishFailed` - Failed to publish to broker
    /// * `ConnectionFailed` - Broker connection failed
    /// * `Timeout` - Publishing timed out
    async fn publish_user_created(
        &self,
        event: &UserCreatedEvent,
    ) -> Result<(), EventPublisherError>;
}
