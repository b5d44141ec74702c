use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use crate::domain::config::terminal::TerminalConfig;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "appName")]
    pub app_name: String,
    #[serde(rename = "appId")]
    pub app_id: String,
    #[serde(rename = "terminalEndpoint")]
    pub terminal_endpoint: String,
}

pub struct HealthController;

impl HealthController {
    /// GET /api/v1/health
    pub async fn health_check(State(config): State<Arc<TerminalConfig>>) -> Json<HealthResponse> {
        debug!("Health check requested");

        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            app_name: config.app_name.clone(),
            app_id: config.app_id.clone(),
            terminal_endpoint: config.endpoint.clone(),
        })
    }
}
