use serde::{Deserialize, Serialize};

use crate::domain::password::PasswordRequirement;

#[derive(Debug, Deserialize)]
pub struct ValidatePasswordRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordCheckRequest {
    pub password: String,
    pub confirmation: String,
}

#[derive(Debug, Serialize)]
pub struct PasswordCheckResponse {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl PasswordCheckResponse {
    pub fn from_unmet(unmet: &[PasswordRequirement]) -> Self {
        Self {
            valid: unmet.is_empty(),
            errors: unmet.iter().map(|r| r.message().to_string()).collect(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![reason.into()],
        }
    }
}

/// Payload the auth library posts when a user asks for a reset link.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordHookRequest {
    pub email: String,
    pub url: String,
}
