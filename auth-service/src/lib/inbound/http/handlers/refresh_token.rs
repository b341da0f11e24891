use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::JwtResponseData;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequestBody>,
) -> Result<Json<JwtResponseData>, ApiError> {
    let pair = state.auth_service.refresh(&body.token).await?;
    Ok(Json(pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequestBody {
    token: String,
}
