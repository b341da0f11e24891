use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::JwtResponseData;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<Json<JwtResponseData>, ApiError> {
    let pair = state
        .auth_service
        .login(&body.username, &body.password)
        .await?;
    Ok(Json(pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}
