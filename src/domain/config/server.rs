use super::{optional, required, ConfigError};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` means every origin is allowed (development only).
    pub cors_allowed_origins: Option<Vec<String>>,
    /// Shared secret the auth library presents when it calls back into the
    /// reset-password hook.
    pub hook_secret: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match optional(&lookup, "PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let cors_allowed_origins = optional(&lookup, "CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            port,
            cors_allowed_origins,
            hook_secret: required(&lookup, "AUTH_HOOK_SECRET")?,
        })
    }
}
