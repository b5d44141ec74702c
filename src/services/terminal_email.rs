use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    application::services::EmailService,
    domain::config::terminal::TerminalConfig,
    services::{
        error::EmailError,
        http::{error_message, API_KEY_HEADER},
    },
};

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    to: &'a str,
    data: &'a BTreeMap<String, String>,
    #[serde(rename = "appName")]
    app_name: &'a str,
}

/// Sends transactional email (password reset links) through the Terminal
/// service, which owns the templates and the sender address.
pub struct TerminalEmailService {
    client: Client,
    endpoint: String,
    api_key: String,
    app_name: String,
}

impl TerminalEmailService {
    pub fn new(client: Client, config: &TerminalConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            app_name: config.app_name.clone(),
        }
    }
}

#[async_trait]
impl EmailService for TerminalEmailService {
    async fn send_email(
        &self,
        to: &str,
        data: BTreeMap<String, String>,
    ) -> Result<Value, EmailError> {
        let body = SendEmailRequest {
            to,
            data: &data,
            app_name: &self.app_name,
        };

        let response = self
            .client
            .post(format!("{}/email/send", self.endpoint))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            warn!(kind = ?data.get("type"), "Email delivery rejected: {}", message);
            return Err(EmailError::SendFailed(message));
        }

        info!(kind = ?data.get("type"), "Email accepted for delivery");
        Ok(response.json().await?)
    }
}
