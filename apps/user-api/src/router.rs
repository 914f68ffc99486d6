use axum::{
    http::{header, HeaderName, Method, StatusCode},
    middleware::from_fn,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::MiddlewareConfig;
use crate::error::{ErrorMessage, ErrorResponse};
use crate::methods::create_user::{__path_create_user, create_user};
use crate::methods::delete_user::{__path_delete_user, delete_user};
use crate::methods::entities::{
    CreateUserRequest, MessageResponse, UpdateUserRequest, UserEnvelope, UserResponse,
    UsersResponse,
};
use crate::methods::get_user::{__path_get_user, get_user};
use crate::methods::get_users::{__path_get_users, get_users};
use crate::methods::health_check::{__path_health_check, health_check};
use crate::methods::routes::{
    OPENAPI_JSON_PATH, SERVICE_DOCS_PATH, SERVICE_HEALTH_PATH, USERS_PATH, USER_BY_USERNAME_PATH,
};
use crate::methods::update_user::{__path_update_user, update_user};
use crate::middleware::json_errors::json_error_bodies;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(get_users, create_user, get_user, update_user, delete_user, health_check),
    components(schemas(
        CreateUserRequest, UpdateUserRequest, UserResponse, UserEnvelope, UsersResponse,
        MessageResponse, ErrorResponse, ErrorMessage
    )),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "service", description = "Service endpoints")
    )
)]
pub struct ApiDoc;

fn cors_layer(config: &MiddlewareConfig, x_request_id: HeaderName) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION, x_request_id];

    if config.allows_any_origin() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers)
    } else {
        let origins: Vec<_> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(headers)
    }
}

/// Builds the application router with every layer except rate limiting,
/// which needs the peer address and is added by the binary.
pub fn build_router(state: AppState, config: &MiddlewareConfig) -> Router {
    let mut app = Router::new()
        .route(USERS_PATH, get(get_users).post(create_user))
        .route(
            USER_BY_USERNAME_PATH,
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route(SERVICE_HEALTH_PATH, get(health_check))
        .merge(SwaggerUi::new(SERVICE_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .with_state(state);

    // Applied inner to outer: trace, request id, body limit, CORS, timeout, JSON error bodies
    app = app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(tracing::Level::DEBUG)),
    );

    let x_request_id = HeaderName::from_static("x-request-id");
    app = app
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid));

    app = app.layer(RequestBodyLimitLayer::new(config.max_body_size));

    app = app.layer(cors_layer(config, x_request_id));

    app = app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        config.request_timeout,
    ));

    app.layer(from_fn(json_error_bodies))
}
