use axum::extract::State;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

/// Administrative listing of registered accounts.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserData>>, ApiError> {
    let users = state.auth_service.list_users().await?;
    Ok(Json(users.iter().map(UserData::from).collect()))
}

/// Wire shape for one account. The password hash never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub user_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number,
            created_at: user.created_at,
        }
    }
}
