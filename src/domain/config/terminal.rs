use std::fmt;

use super::{optional, required, ConfigError};

const DEFAULT_APP_NAME: &str = "app";

/// Connection settings for the hosted Terminal service (storage, email and
/// OAuth proxy). Loaded once at startup and read-only afterwards.
#[derive(Clone, PartialEq)]
pub struct TerminalConfig {
    pub endpoint: String,
    pub api_key: String,
    pub app_id: String,
    pub app_name: String,
}

impl TerminalConfig {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        app_id: impl Into<String>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            app_id: app_id.into(),
            app_name: app_name.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = required(&lookup, "TERMINAL_END_POINT")?;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "TERMINAL_END_POINT",
                reason: "must be an http(s) URL".to_string(),
            });
        }

        Ok(Self::new(
            endpoint,
            required(&lookup, "TERMINAL_API_KEY")?,
            required(&lookup, "TERMINAL_APP_ID")?,
            optional(&lookup, "APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
        ))
    }
}

impl fmt::Debug for TerminalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("app_id", &self.app_id)
            .field("app_name", &self.app_name)
            .finish()
    }
}
