use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::adapters::state::HookSecret;

pub const HOOK_SECRET_HEADER: &str = "X-AUTH-HOOK-SECRET";

/// Middleware guarding the routes the auth library calls back into.
pub async fn validate_hook_secret(
    State(HookSecret(expected_secret)): State<HookSecret>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Response {
    match headers.get(HOOK_SECRET_HEADER) {
        Some(header_value) => match header_value.to_str() {
            Ok(provided_secret) if provided_secret == &*expected_secret => next.run(request).await,
            Ok(_) => {
                warn!("Invalid secret provided in {} header", HOOK_SECRET_HEADER);
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            Err(_) => {
                warn!("{} header contains invalid UTF-8", HOOK_SECRET_HEADER);
                (StatusCode::BAD_REQUEST, "Bad request").into_response()
            }
        },
        None => {
            warn!("{} header is missing", HOOK_SECRET_HEADER);
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}
