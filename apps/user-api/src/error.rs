use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use user_lib::errors_service::UserServiceError;
use utoipa::ToSchema;

pub const USER_NOT_FOUND: &str = "User does not exist";
pub const USER_ALREADY_EXISTS: &str = "User already exists";
pub const BODY_TOO_LARGE: &str = "Request body too large";
pub const REQUEST_TIMED_OUT: &str = "Request timed out";

/// Either a single message or one message per invalid field.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: ErrorMessage,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(Vec<String>),
    NotFound(String),
    Conflict(String),
    PayloadTooLarge,
    RequestTimeout,
    Internal(String),
}

impl ApiError {
    pub fn user_not_found() -> Self {
        ApiError::NotFound(USER_NOT_FOUND.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msgs) => (StatusCode::BAD_REQUEST, ErrorMessage::Many(msgs)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorMessage::One(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorMessage::One(msg)),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorMessage::One(BODY_TOO_LARGE.to_string()),
            ),
            ApiError::RequestTimeout => (
                StatusCode::REQUEST_TIMEOUT,
                ErrorMessage::One(REQUEST_TIMED_OUT.to_string()),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorMessage::One(msg)),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        ApiError::BadRequest(vec![rejection.body_text()])
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Validation(msgs) => ApiError::BadRequest(msgs),
            UserServiceError::NotFound => ApiError::user_not_found(),
            UserServiceError::UsernameAlreadyExists => ApiError::Conflict(USER_ALREADY_EXISTS.to_string()),
            UserServiceError::Internal(err) => ApiError::Internal(err.to_string()),
            _ => ApiError::Internal("unexpected error".to_string()),
        }
    }
}

/// Check if environment is production-like (prod, prod01, prod02, etc.)
pub fn is_prod_like(env: &str) -> bool {
    env.to_lowercase().starts_with("prod")
}

/// Converts a service error to an ApiError, logging internal errors.
/// In production, internal error details are hidden.
pub fn handle_service_error(err: UserServiceError, env: &str, operation: &str) -> ApiError {
    match &err {
        UserServiceError::Validation(_)
        | UserServiceError::NotFound
        | UserServiceError::UsernameAlreadyExists => ApiError::from(err),
        _ => {
            tracing::error!(env = %env, error = ?err, operation = %operation, "service error");
            if is_prod_like(env) {
                ApiError::Internal("internal server error".to_string())
            } else {
                ApiError::from(err)
            }
        }
    }
}
