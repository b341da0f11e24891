use std::sync::Arc;

use async_trait::async_trait;
use auth_core::CredentialValidator;
use auth_core::PasswordHasher;
use auth_core::TokenCodec;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::SignupCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::token::ports::RefreshTokenRepository;
use crate::domain::token::service::RefreshTokenService;
use crate::domain::user::events::UserCreatedEvent;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::EventPublisher;
use crate::domain::user::ports::UserRepository;

/// Orchestrator for the signup, login, and refresh flows.
///
/// Sequences credential validation, directory lookups, password hashing,
/// and token issuance; holds no per-request state of its own.
pub struct AuthService<UR, RR, EP>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    EP: EventPublisher,
{
    users: Arc<UR>,
    refresh_tokens: RefreshTokenService<RR, UR>,
    event_publisher: Arc<EP>,
    token_codec: Arc<TokenCodec>,
    credential_validator: CredentialValidator,
    password_hasher: PasswordHasher,
    rotate_refresh_on_use: bool,
}

impl<UR, RR, EP> AuthService<UR, RR, EP>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    EP: EventPublisher,
{
    /// Create the orchestrator with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User directory implementation
    /// * `refresh_tokens` - Refresh token ledger
    /// * `event_publisher` - Account lifecycle event publishing
    /// * `token_codec` - Access token signing
    /// * `rotate_refresh_on_use` - Replace refresh tokens on every exchange
    ///   instead of letting them live until expiry
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: RefreshTokenService<RR, UR>,
        event_publisher: Arc<EP>,
        token_codec: Arc<TokenCodec>,
        rotate_refresh_on_use: bool,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            event_publisher,
            token_codec,
            credential_validator: CredentialValidator::new(),
            password_hasher: PasswordHasher::new(),
            rotate_refresh_on_use,
        }
    }

    /// Issue the refresh + access token pair for an authenticated username.
    async fn issue_token_pair(&self, username: &str) -> Result<TokenPair, AuthError> {
        let refresh_token = self.refresh_tokens.issue(username).await?;
        let access_token = self.token_codec.sign(username)?;

        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.token,
        })
    }
}

#[async_trait]
impl<UR, RR, EP> AuthServicePort for AuthService<UR, RR, EP>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    EP: EventPublisher,
{
    async fn signup(&self, command: SignupCommand) -> Result<TokenPair, AuthError> {
        self.credential_validator
            .validate(&command.email, &command.password)?;

        if self
            .users
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateUser(command.username));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            phone_number: command.phone_number,
            created_at: Utc::now(),
        };

        // Two signups can race past the lookup above; the storage-level
        // uniqueness constraint is authoritative and surfaces here as
        // UsernameAlreadyExists.
        let created = self.users.create(user).await?;

        tracing::info!(user_id = %created.id, username = %created.username, "User created");

        let event = UserCreatedEvent::new(&created);
        if let Err(e) = self.event_publisher.publish_user_created(&event).await {
            tracing::error!(
                "Failed to publish UserCreated event for user {}: {}",
                created.id,
                e
            );
        }

        self.issue_token_pair(&created.username).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        // Unknown username and wrong password produce the same outcome, so
        // login never acts as a user-existence oracle.
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => return Err(AuthError::AuthenticationFailed),
        };

        if !self
            .password_hasher
            .verify(password, &user.password_hash)?
        {
            return Err(AuthError::AuthenticationFailed);
        }

        self.issue_token_pair(&user.username).await
    }

    async fn refresh(&self, token_value: &str) -> Result<TokenPair, AuthError> {
        let stored = self
            .refresh_tokens
            .lookup(token_value)
            .await?
            .ok_or(AuthError::UnknownToken)?;

        let stored = self.refresh_tokens.verify_not_expired(stored).await?;

        let user = self
            .users
            .find_by_id(&stored.user_id)
            .await?
            .ok_or_else(|| AuthError::UnknownUser(stored.user_id.to_string()))?;

        let access_token = self.token_codec.sign(&user.username)?;

        // Default policy echoes the presented token back; it stays valid
        // until its own expiry. Rotation replaces it on every exchange.
        let refresh_token = if self.rotate_refresh_on_use {
            self.refresh_tokens.revoke(&stored.token).await?;
            self.refresh_tokens.issue(&user.username).await?.token
        } else {
            stored.token
        };

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.users.list_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;
    use uuid::Uuid;

    use super::*;
    use crate::domain::token::errors::RefreshTokenError;
    use crate::domain::token::models::RefreshToken;
    use crate::domain::user::errors::EventPublisherError;
    use crate::domain::user::errors::UserError;

    const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
        }
    }

    mock! {
        pub TestRefreshTokenRepository {}

        #[async_trait]
        impl RefreshTokenRepository for TestRefreshTokenRepository {
            async fn save(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError>;
            async fn find_by_token(&self, token_value: &str) -> Result<Option<RefreshToken>, RefreshTokenError>;
            async fn delete(&self, token_value: &str) -> Result<bool, RefreshTokenError>;
        }
    }

    mock! {
        pub TestEventPublisher {}

        #[async_trait]
        impl EventPublisher for TestEventPublisher {
            async fn publish_user_created(&self, event: &UserCreatedEvent) -> Result<(), EventPublisherError>;
        }
    }

    fn test_service(
        users: MockTestUserRepository,
        tokens: MockTestRefreshTokenRepository,
        events: MockTestEventPublisher,
    ) -> AuthService<MockTestUserRepository, MockTestRefreshTokenRepository, MockTestEventPublisher>
    {
        test_service_with_rotation(users, tokens, events, false)
    }

    fn test_service_with_rotation(
        users: MockTestUserRepository,
        tokens: MockTestRefreshTokenRepository,
        events: MockTestEventPublisher,
        rotate_on_use: bool,
    ) -> AuthService<MockTestUserRepository, MockTestRefreshTokenRepository, MockTestEventPublisher>
    {
        let users = Arc::new(users);
        let refresh_tokens = RefreshTokenService::new(Arc::new(tokens), Arc::clone(&users), 3600);
        AuthService::new(
            users,
            refresh_tokens,
            Arc::new(events),
            Arc::new(TokenCodec::new(TEST_SECRET, 3600)),
            rotate_on_use,
        )
    }

    fn signup_command(username: &str) -> SignupCommand {
        SignupCommand {
            username: username.to_string(),
            password: "longenoughpassword".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: format!("{username}@example.com"),
            phone_number: 5551234567,
        }
    }

    fn stored_user(username: &str, password_hash: &str) -> User {
        User {
            id: UserId::new(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: format!("{username}@example.com"),
            phone_number: 5551234567,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_signup_success() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let mut events = MockTestEventPublisher::new();

        // Duplicate check comes back empty, then the token ledger resolves
        // the freshly persisted user.
        users
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|user| {
                user.username == "alice"
                    && user.email == "alice@example.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));
        users
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(|_| Ok(Some(stored_user("alice", "$argon2id$test_hash"))));

        tokens.expect_save().times(1).returning(|token| Ok(token));
        events
            .expect_publish_user_created()
            .withf(|event| event.username == "alice" && event.first_name == "Alice")
            .times(1)
            .returning(|_| Ok(()));

        let service = test_service(users, tokens, events);

        let pair = service
            .signup(signup_command("alice"))
            .await
            .expect("Signup failed");

        assert!(!pair.access_token.is_empty());
        assert!(Uuid::parse_str(&pair.refresh_token).is_ok());

        // The access token is verifiable and carries the username.
        let codec = TokenCodec::new(TEST_SECRET, 3600);
        let claims = codec.verify(&pair.access_token).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[tokio::test]
    async fn test_signup_invalid_email_short_circuits() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let mut events = MockTestEventPublisher::new();

        users.expect_find_by_username().times(0);
        users.expect_create().times(0);
        tokens.expect_save().times(0);
        events.expect_publish_user_created().times(0);

        let service = test_service(users, tokens, events);

        let mut command = signup_command("alice");
        command.email = "not-an-email".to_string();

        let result = service.signup(command).await;
        assert!(matches!(
            result,
            Err(AuthError::Validation(
                auth_core::CredentialError::InvalidEmailFormat
            ))
        ));
    }

    #[tokio::test]
    async fn test_signup_weak_password_short_circuits() {
        let mut users = MockTestUserRepository::new();
        let tokens = MockTestRefreshTokenRepository::new();
        let events = MockTestEventPublisher::new();

        users.expect_find_by_username().times(0);
        users.expect_create().times(0);

        let service = test_service(users, tokens, events);

        let mut command = signup_command("alice");
        command.password = "short".to_string();

        let result = service.signup(command).await;
        assert!(matches!(
            result,
            Err(AuthError::Validation(
                auth_core::CredentialError::WeakPassword { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let mut events = MockTestEventPublisher::new();

        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("alice", "$argon2id$test_hash"))));
        users.expect_create().times(0);
        tokens.expect_save().times(0);
        events.expect_publish_user_created().times(0);

        let service = test_service(users, tokens, events);

        let result = service.signup(signup_command("alice")).await;
        assert!(matches!(result, Err(AuthError::DuplicateUser(_))));
    }

    #[tokio::test]
    async fn test_signup_storage_race_maps_to_duplicate() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let mut events = MockTestEventPublisher::new();

        // The pre-insert lookup saw nothing, but a concurrent signup won
        // the insert; the uniqueness violation is a client error, not a
        // fatal one.
        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        users
            .expect_create()
            .times(1)
            .returning(|user| Err(UserError::UsernameAlreadyExists(user.username)));
        tokens.expect_save().times(0);
        events.expect_publish_user_created().times(0);

        let service = test_service(users, tokens, events);

        let result = service.signup(signup_command("alice")).await;
        assert!(matches!(result, Err(AuthError::DuplicateUser(_))));
    }

    #[tokio::test]
    async fn test_signup_tolerates_event_publish_failure() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let mut events = MockTestEventPublisher::new();

        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        users.expect_create().times(1).returning(|user| Ok(user));
        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("alice", "$argon2id$test_hash"))));
        tokens.expect_save().times(1).returning(|token| Ok(token));
        events
            .expect_publish_user_created()
            .times(1)
            .returning(|_| Err(EventPublisherError::PublishFailed("broker down".to_string())));

        let service = test_service(users, tokens, events);

        // Eventing is fire-and-forget; the signup still succeeds.
        let result = service.signup(signup_command("alice")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let events = MockTestEventPublisher::new();

        let hash = PasswordHasher::new().hash("password123").unwrap();
        let user = stored_user("alice", &hash);

        users
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(2)
            .returning(move |_| Ok(Some(user.clone())));
        tokens.expect_save().times(1).returning(|token| Ok(token));

        let service = test_service(users, tokens, events);

        let pair = service
            .login("alice", "password123")
            .await
            .expect("Login failed");

        let codec = TokenCodec::new(TEST_SECRET, 3600);
        assert_eq!(codec.verify(&pair.access_token).unwrap().sub, "alice");
        assert!(!pair.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let events = MockTestEventPublisher::new();

        let hash = PasswordHasher::new().hash("password123").unwrap();
        let user = stored_user("alice", &hash);

        users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        tokens.expect_save().times(0);

        let service = test_service(users, tokens, events);

        let result = service.login("alice", "wrong_password").await;
        assert!(matches!(result, Err(AuthError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let events = MockTestEventPublisher::new();

        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        tokens.expect_save().times(0);

        let service = test_service(users, tokens, events);

        let result = service.login("ghost", "password123").await;
        assert!(matches!(result, Err(AuthError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_refresh_echoes_same_token() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let events = MockTestEventPublisher::new();

        let user = stored_user("alice", "$argon2id$test_hash");
        let user_id = user.id;
        let stored = RefreshToken {
            token: Uuid::new_v4().to_string(),
            user_id,
            expires_at: Utc::now() + Duration::seconds(3600),
        };
        let presented = stored.token.clone();
        let expected_lookup = stored.token.clone();

        tokens
            .expect_find_by_token()
            .withf(move |value| value == expected_lookup)
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        tokens.expect_delete().times(0);
        tokens.expect_save().times(0);
        users
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = test_service(users, tokens, events);

        let pair = service.refresh(&presented).await.expect("Refresh failed");

        // No rotation: the presented value comes back unchanged.
        assert_eq!(pair.refresh_token, presented);

        let codec = TokenCodec::new(TEST_SECRET, 3600);
        assert_eq!(codec.verify(&pair.access_token).unwrap().sub, "alice");
    }

    #[tokio::test]
    async fn test_refresh_unknown_token() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let events = MockTestEventPublisher::new();

        tokens
            .expect_find_by_token()
            .times(1)
            .returning(|_| Ok(None));
        users.expect_find_by_id().times(0);

        let service = test_service(users, tokens, events);

        let result = service.refresh("never-issued").await;
        assert!(matches!(result, Err(AuthError::UnknownToken)));
    }

    #[tokio::test]
    async fn test_refresh_expired_token_is_consumed() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let events = MockTestEventPublisher::new();

        let expired = RefreshToken {
            token: Uuid::new_v4().to_string(),
            user_id: UserId::new(),
            expires_at: Utc::now() - Duration::seconds(10),
        };
        let token_value = expired.token.clone();
        let deleted_value = expired.token.clone();

        tokens
            .expect_find_by_token()
            .times(1)
            .returning(move |_| Ok(Some(expired.clone())));
        tokens
            .expect_delete()
            .withf(move |value| value == deleted_value)
            .times(1)
            .returning(|_| Ok(true));
        users.expect_find_by_id().times(0);

        let service = test_service(users, tokens, events);

        let result = service.refresh(&token_value).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn test_refresh_with_rotation_issues_new_token() {
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();
        let events = MockTestEventPublisher::new();

        let user = stored_user("alice", "$argon2id$test_hash");
        let user_id = user.id;
        let stored = RefreshToken {
            token: Uuid::new_v4().to_string(),
            user_id,
            expires_at: Utc::now() + Duration::seconds(3600),
        };
        let presented = stored.token.clone();
        let rotated_away = stored.token.clone();
        let lookup_user = user.clone();

        tokens
            .expect_find_by_token()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        users
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        tokens
            .expect_delete()
            .withf(move |value| value == rotated_away)
            .times(1)
            .returning(|_| Ok(true));
        // Rotation issues a replacement through the normal path.
        users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(lookup_user.clone())));
        tokens.expect_save().times(1).returning(|token| Ok(token));

        let service = test_service_with_rotation(users, tokens, events, true);

        let pair = service.refresh(&presented).await.expect("Refresh failed");
        assert_ne!(pair.refresh_token, presented);
        assert!(Uuid::parse_str(&pair.refresh_token).is_ok());
    }

    #[tokio::test]
    async fn test_list_users_delegates_to_directory() {
        let mut users = MockTestUserRepository::new();
        let tokens = MockTestRefreshTokenRepository::new();
        let events = MockTestEventPublisher::new();

        users.expect_list_all().times(1).returning(|| {
            Ok(vec![
                stored_user("alice", "$argon2id$test_hash"),
                stored_user("bob", "$argon2id$test_hash"),
            ])
        });

        let service = test_service(users, tokens, events);

        let listed = service.list_users().await.expect("Listing failed");
        assert_eq!(listed.len(), 2);
    }
}
