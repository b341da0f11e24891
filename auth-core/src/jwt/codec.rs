use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessTokenClaims;
use super::errors::TokenError;

/// Wall-clock source used for token issue and expiry decisions.
pub type Clock = fn() -> DateTime<Utc>;

/// Access token codec: signs and verifies HS256 compact tokens.
///
/// The codec holds no mutable state. Any instance constructed with the same
/// secret verifies tokens signed by any other instance, so access token
/// checks need no shared storage.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
    clock: Clock,
}

impl TokenCodec {
    /// Create a codec with the given secret and token lifetime.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing key, provisioned out-of-band
    /// * `ttl_seconds` - Lifetime of every signed token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in configuration or a vault, never in code
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self::with_clock(secret, ttl_seconds, Utc::now)
    }

    /// Create a codec with a substituted clock, for deterministic expiry
    /// behavior under test.
    pub fn with_clock(secret: &[u8], ttl_seconds: i64, clock: Clock) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl: Duration::seconds(ttl_seconds),
            clock,
        }
    }

    /// Sign an access token for `subject`.
    ///
    /// The token carries `{sub, iat, exp}` with `exp = iat + ttl`, encoded
    /// as the standard three-part `header.payload.signature` form.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token serialization or signing failed
    pub fn sign(&self, subject: &str) -> Result<String, TokenError> {
        let claims = AccessTokenClaims::issue(subject, (self.clock)(), self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a presented token and return its claims.
    ///
    /// The signature is recomputed over the received header and payload and
    /// compared in constant time; only then is expiry checked, against this
    /// codec's clock.
    ///
    /// # Errors
    /// * `Malformed` - The token structure cannot be parsed
    /// * `BadSignature` - The signature does not match; never downgraded
    /// * `Expired` - The current instant is at or past `exp`
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is decided below against this codec's clock, not the
        // library's wall clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            },
        )?;

        if data.claims.is_expired((self.clock)().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
