/// Signup input. Transient; never persisted as-is.
#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: i64,
}

/// Credential pair returned by the signup, login, and refresh flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived signed access token
    pub access_token: String,

    /// Opaque server-side refresh token value
    pub refresh_token: String,
}
