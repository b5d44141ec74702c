use std::sync::Arc;

use terminal_gateway::{
    adapters::{
        router::build_router,
        state::{AppState, HookSecret},
    },
    domain::config::{server::ServerConfig, terminal::TerminalConfig},
    services,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments set the variables directly
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let terminal_config = TerminalConfig::from_env()
        .unwrap_or_else(|e| panic!("ERROR: invalid Terminal configuration: {}", e));
    let server_config = ServerConfig::from_env()
        .unwrap_or_else(|e| panic!("ERROR: invalid server configuration: {}", e));

    tracing::info!(
        "Starting terminal-gateway for app {} against {}",
        terminal_config.app_id,
        terminal_config.endpoint
    );

    let cors = match &server_config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<_> = allowed_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    };

    let terminal_services = services::create_terminal_services(&terminal_config)
        .expect("Failed to create Terminal services");

    let app_state = AppState {
        terminal_config: Arc::new(terminal_config),
        hook_secret: HookSecret(Arc::from(server_config.hook_secret.as_str())),
        storage_service: terminal_services.storage,
        email_service: terminal_services.email,
    };

    let router = build_router(app_state, cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", server_config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", server_config.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
