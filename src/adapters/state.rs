use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    application::services::{EmailService, StorageService},
    domain::config::terminal::TerminalConfig,
};

/// Secret expected in `X-AUTH-HOOK-SECRET` on auth-library callbacks.
#[derive(Clone)]
pub struct HookSecret(pub Arc<str>);

#[derive(Clone, FromRef)]
pub struct AppState {
    pub terminal_config: Arc<TerminalConfig>,
    pub hook_secret: HookSecret,
    pub storage_service: Arc<dyn StorageService>,
    pub email_service: Arc<dyn EmailService>,
}
