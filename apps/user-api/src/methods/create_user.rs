use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::{CreateUserRequest, UserEnvelope};
use crate::methods::routes::USERS_PATH;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = USERS_PATH,
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserEnvelope),
        (status = 400, description = "One message per invalid field", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let Json(payload) = payload?;

    state
        .user_service
        .create_user(&payload)
        .await
        .map(|user| Json(UserEnvelope::from(user)))
        .map_err(|e| handle_service_error(e, &state.env, "create_user"))
}
