use std::sync::Arc;
use std::time::Duration;

use auth_core::TokenCodec;
use auth_service::config::Config;
use auth_service::domain::auth::service::AuthService;
use auth_service::domain::token::service::RefreshTokenService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::events::KafkaEventProducer;
use auth_service::outbound::repositories::PostgresRefreshTokenRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        kafka_brokers = %config.kafka.brokers,
        kafka_topic = %config.kafka.topic,
        access_token_ttl = config.jwt.ttl_seconds,
        refresh_token_ttl = config.refresh.ttl_seconds,
        rotate_refresh_on_use = config.refresh.rotate_on_use,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_codec = Arc::new(TokenCodec::new(
        config.jwt.secret.as_bytes(),
        config.jwt.ttl_seconds,
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let refresh_token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool));
    let event_producer = Arc::new(KafkaEventProducer::new(&config.kafka)?);

    let refresh_tokens = RefreshTokenService::new(
        refresh_token_repository,
        Arc::clone(&user_repository),
        config.refresh.ttl_seconds,
    );
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        refresh_tokens,
        event_producer,
        token_codec,
        config.refresh.rotate_on_use,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;

    Ok(())
}
