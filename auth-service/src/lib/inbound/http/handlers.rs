use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::TokenPair;

pub mod list_users;
pub mod login;
pub mod refresh_token;
pub mod signup;

/// Wire shape for every token-issuing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponseData {
    pub access_token: String,

    /// Opaque refresh token value
    pub token: String,
}

impl From<TokenPair> for JwtResponseData {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            token: pair.refresh_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    ServiceUnavailable(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(_) | AuthError::DuplicateUser(_) => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::AuthenticationFailed | AuthError::UnknownToken | AuthError::TokenExpired => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::UnknownUser(_) => ApiError::NotFound(err.to_string()),
            AuthError::Storage(detail) => {
                tracing::error!(error = %detail, "Storage failure");
                ApiError::ServiceUnavailable("Storage temporarily unavailable".to_string())
            }
            AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal failure");
                ApiError::InternalServerError("Internal error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status_code: u16,
    data: ApiErrorData,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
