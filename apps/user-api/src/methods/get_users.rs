use axum::{extract::State, Json};
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::UsersResponse;
use crate::methods::routes::USERS_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = USERS_PATH,
    tag = "users",
    responses(
        (status = 200, description = "All users", body = UsersResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    state
        .user_service
        .get_users()
        .await
        .map(|users| Json(UsersResponse::from(users)))
        .map_err(|e| handle_service_error(e, &state.env, "get_users"))
}
