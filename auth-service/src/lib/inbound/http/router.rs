use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::refresh_token::refresh_token;
use super::handlers::signup::signup;
use crate::domain::auth::service::AuthService;
use crate::outbound::events::KafkaEventProducer;
use crate::outbound::repositories::PostgresRefreshTokenRepository;
use crate::outbound::repositories::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<
        AuthService<PostgresUserRepository, PostgresRefreshTokenRepository, KafkaEventProducer>,
    >,
}

pub fn create_router(
    auth_service: Arc<
        AuthService<PostgresUserRepository, PostgresRefreshTokenRepository, KafkaEventProducer>,
    >,
) -> Router {
    let state = AppState { auth_service };

    let routes = Router::new()
        .route("/auth/v1/signup", post(signup))
        .route("/auth/v1/login", post(login))
        .route("/auth/v1/refreshToken", post(refresh_token))
        .route("/auth/v1/users", get(list_users));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    routes
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
