mod error;
pub mod http;
mod terminal_email;
mod terminal_storage;

pub use error::{EmailError, StorageError};
pub use terminal_email::TerminalEmailService;
pub use terminal_storage::TerminalStorageService;

use std::sync::Arc;

use reqwest::Client;

use crate::{
    application::services::{EmailService, StorageService},
    domain::config::terminal::TerminalConfig,
};

pub struct TerminalServices {
    pub storage: Arc<dyn StorageService>,
    pub email: Arc<dyn EmailService>,
}

/// Builds the Terminal-backed services around one shared connection pool.
pub fn create_terminal_services(config: &TerminalConfig) -> Result<TerminalServices, StorageError> {
    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| StorageError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

    Ok(TerminalServices {
        storage: Arc::new(TerminalStorageService::new(client.clone(), config)),
        email: Arc::new(TerminalEmailService::new(client, config)),
    })
}
