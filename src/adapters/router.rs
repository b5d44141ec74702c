use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::adapters::{
    controllers::{
        auth_controller::AuthController, file_controller::FileController,
        health_controller::HealthController,
    },
    middleware::validate_hook_secret,
    state::AppState,
};

async fn hello_world() -> &'static str {
    "terminal-gateway"
}

pub fn build_router(app_state: AppState, cors: CorsLayer) -> Router {
    // Routes only the auth library may call
    let hook_routes = Router::new()
        .route(
            "/api/v1/auth/hooks/reset-password",
            post(AuthController::send_reset_password),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            validate_hook_secret,
        ));

    let public_routes = Router::new()
        .route("/", get(hello_world))
        .route("/api/v1/health", get(HealthController::health_check))
        .route(
            "/api/v1/files",
            get(FileController::list_files).post(FileController::upload_file),
        )
        .route(
            "/api/v1/files/{file_id}",
            delete(FileController::delete_file),
        )
        .route(
            "/api/v1/files/{file_id}/url",
            get(FileController::get_download_url),
        )
        .route(
            "/api/v1/files/{file_id}/metadata",
            get(FileController::get_file_metadata),
        )
        .route(
            "/api/v1/files/{file_id}/exists",
            get(FileController::file_exists),
        )
        .route(
            "/api/v1/auth/password/validate",
            post(AuthController::validate_password),
        )
        .route(
            "/api/v1/auth/password/reset",
            post(AuthController::check_password_reset),
        )
        .route("/api/v1/auth/providers", get(AuthController::list_providers));

    Router::new()
        .merge(hook_routes)
        .merge(public_routes)
        .layer(cors)
        .with_state(app_state)
}
