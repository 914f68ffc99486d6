use axum::extract::{Path, State};
use axum::Json;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::MessageResponse;
use crate::methods::routes::USER_BY_USERNAME_PATH;
use crate::state::AppState;

pub const USER_DELETED: &str = "User deleted! :(";

#[utoipa::path(
    delete,
    path = USER_BY_USERNAME_PATH,
    tag = "users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn delete_user(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .user_service
        .delete_user(&username)
        .await
        .map(|_| {
            Json(MessageResponse {
                message: USER_DELETED.to_string(),
            })
        })
        .map_err(|e| handle_service_error(e, &state.env, "delete_user"))
}
