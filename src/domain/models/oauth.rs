use serde::Serialize;

use crate::domain::config::terminal::TerminalConfig;

/// Generic OAuth provider entry handed to the auth library. The Terminal
/// service performs the authorization-code exchange, so no client secret is
/// involved on our side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuthProviderConfig {
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "authorizationUrl")]
    pub authorization_url: String,
    #[serde(rename = "tokenUrl")]
    pub token_url: String,
    pub scopes: Vec<String>,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "accessType")]
    pub access_type: String,
}

impl OAuthProviderConfig {
    pub fn google_proxy(config: &TerminalConfig) -> Self {
        Self {
            provider_id: "google".to_string(),
            authorization_url: format!("{}/auth/google/start", config.endpoint),
            token_url: format!("{}/auth/google/token", config.endpoint),
            scopes: ["openid", "email", "profile"]
                .into_iter()
                .map(String::from)
                .collect(),
            client_id: "not-needed".to_string(),
            access_type: "offline".to_string(),
        }
    }
}
