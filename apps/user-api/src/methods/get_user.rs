use axum::extract::{Path, State};
use axum::Json;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::UserEnvelope;
use crate::methods::routes::USER_BY_USERNAME_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = USER_BY_USERNAME_PATH,
    tag = "users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 404, description = "User does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_user(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserEnvelope>, ApiError> {
    state
        .user_service
        .get_user(&username)
        .await
        .map(|user| Json(UserEnvelope::from(user)))
        .map_err(|e| handle_service_error(e, &state.env, "get_user"))
}
