use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::events::UserCreatedEvent;

/// Serializable payload for the account-creation event.
///
/// Infrastructure representation for publishing; camelCase field names are
/// the broker-facing contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatedMessage {
    pub event_id: String,
    pub user_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&UserCreatedEvent> for UserCreatedMessage {
    fn from(event: &UserCreatedEvent) -> Self {
        Self {
            event_id: event.event_id.clone(),
            user_id: event.user_id.clone(),
            username: event.username.clone(),
            first_name: event.first_name.clone(),
            last_name: event.last_name.clone(),
            email: event.email.clone(),
            phone_number: event.phone_number,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;

    use super::*;

    #[test]
    fn test_wire_names_are_camel_case() {
        let user = User {
            id: UserId::new(),
            username: "alice".to_string(),
            password_hash: "$argon2id$test_hash".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: 5551234567,
            created_at: Utc::now(),
        };
        let event = UserCreatedEvent::new(&user);
        let message = UserCreatedMessage::from(&event);

        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("phoneNumber").is_some());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }
}
