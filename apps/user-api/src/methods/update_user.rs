use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;
use serde_json::Value;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::{UpdateUserRequest, UserEnvelope};
use crate::methods::routes::USER_BY_USERNAME_PATH;
use crate::state::AppState;

#[utoipa::path(
    patch,
    path = USER_BY_USERNAME_PATH,
    tag = "users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 400, description = "Invalid patch", body = ErrorResponse),
        (status = 404, description = "User does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_user(
    Path(username): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let Json(payload) = payload?;

    state
        .user_service
        .update_user(&username, &payload)
        .await
        .map(|user| Json(UserEnvelope::from(user)))
        .map_err(|e| handle_service_error(e, &state.env, "update_user"))
}
