use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set embedded in a signed access token.
///
/// Immutable once signed; the fields travel inside the token's
/// cryptographic envelope. Expiry always equals issue time plus the
/// codec's TTL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenClaims {
    /// Subject (the authenticated username)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Build the claim set for a token issued at `now` with lifetime `ttl`.
    pub(crate) fn issue(subject: &str, now: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = now.timestamp();
        Self {
            sub: subject.to_string(),
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }

    /// Whether the token is no longer valid at `now` (Unix timestamp).
    ///
    /// A token is expired once the current instant reaches `exp`.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.exp
    }
}
