use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::JwtResponseData;
use crate::domain::auth::models::SignupCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequestBody>,
) -> Result<Json<JwtResponseData>, ApiError> {
    let pair = state.auth_service.signup(body.into_command()).await?;
    Ok(Json(pair.into()))
}

/// HTTP request body for account creation (raw JSON, camelCase wire names)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequestBody {
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: i64,
}

impl SignupRequestBody {
    fn into_command(self) -> SignupCommand {
        SignupCommand {
            username: self.username,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
        }
    }
}
