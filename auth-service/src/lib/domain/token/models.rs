use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::UserId;

/// Server-side refresh credential tied to one user.
///
/// The token value is an opaque UUIDv4 string, globally unique and drawn
/// from a cryptographically strong source. Lifetime is independent of any
/// access token the record later helps mint; expiry is enforced only when
/// the token is presented, never by a background sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Mint a record for `user_id` expiring `ttl_seconds` after `now`.
    pub fn issue(user_id: UserId, now: DateTime<Utc>, ttl_seconds: i64) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            user_id,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    /// Whether the record's lifetime ended strictly before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_issue_sets_expiry_from_ttl() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let token = RefreshToken::issue(UserId::new(), now, 3600);

        assert_eq!(token.expires_at, now + Duration::seconds(3600));
    }

    #[test]
    fn test_issue_generates_unique_opaque_values() {
        let now = Utc::now();
        let user_id = UserId::new();

        let first = RefreshToken::issue(user_id, now, 3600);
        let second = RefreshToken::issue(user_id, now, 3600);

        assert_ne!(first.token, second.token);
        assert!(Uuid::parse_str(&first.token).is_ok());
    }

    #[test]
    fn test_expiry_is_strictly_before_now() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let token = RefreshToken::issue(UserId::new(), now, 3600);

        assert!(!token.is_expired(token.expires_at));
        assert!(token.is_expired(token.expires_at + Duration::seconds(1)));
    }
}
