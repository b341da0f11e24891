use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::User;

/// Domain event published when a new account is created.
///
/// Carries a snapshot of the account's profile for downstream consumers;
/// the password hash never leaves the service.
#[derive(Debug, Clone, PartialEq)]
pub struct UserCreatedEvent {
    pub event_id: String,
    pub user_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: i64,
    pub created_at: DateTime<Utc>,
}

impl UserCreatedEvent {
    /// Create an event from a freshly persisted user.
    pub fn new(user: &User) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            user_id: user.id.to_string(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number,
            created_at: user.created_at,
        }
    }
}
