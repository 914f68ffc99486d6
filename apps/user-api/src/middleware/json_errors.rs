use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// Rewrites the plain-text 408 and 413 replies produced by the timeout and
/// body-limit layers into the usual `{message}` body.
pub async fn json_error_bodies(request: Request<Body>, next: Next) -> Response {
    let response = next.run(request).await;
    if is_json(&response) {
        return response;
    }

    match response.status() {
        StatusCode::REQUEST_TIMEOUT => ApiError::RequestTimeout.into_response(),
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge.into_response(),
        _ => response,
    }
}
