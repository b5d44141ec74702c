use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    adapters::dto::auth_dto::{
        PasswordCheckResponse, ResetPasswordCheckRequest, ResetPasswordHookRequest,
        ValidatePasswordRequest,
    },
    application::{error::ApplicationError, services::EmailService},
    domain::{
        config::terminal::TerminalConfig,
        models::oauth::OAuthProviderConfig,
        password::{validate_password, validate_password_reset, PasswordResetError},
    },
};

pub struct AuthController;

impl AuthController {
    /// POST /api/v1/auth/password/validate
    pub async fn validate_password(
        Json(body): Json<ValidatePasswordRequest>,
    ) -> Json<PasswordCheckResponse> {
        Json(PasswordCheckResponse::from_unmet(&validate_password(
            &body.password,
        )))
    }

    /// POST /api/v1/auth/password/reset
    pub async fn check_password_reset(
        Json(body): Json<ResetPasswordCheckRequest>,
    ) -> Json<PasswordCheckResponse> {
        let response = match validate_password_reset(&body.password, &body.confirmation) {
            Ok(()) => PasswordCheckResponse::from_unmet(&[]),
            Err(PasswordResetError::Weak(unmet)) => PasswordCheckResponse::from_unmet(&unmet),
            Err(err @ PasswordResetError::Mismatch) => {
                PasswordCheckResponse::rejected(err.to_string())
            }
        };
        Json(response)
    }

    /// GET /api/v1/auth/providers
    pub async fn list_providers(
        State(config): State<Arc<TerminalConfig>>,
    ) -> Json<Vec<OAuthProviderConfig>> {
        Json(vec![OAuthProviderConfig::google_proxy(&config)])
    }

    /// POST /api/v1/auth/hooks/reset-password
    /// Called by the auth library with the user's email and the reset URL.
    pub async fn send_reset_password(
        State(email_service): State<Arc<dyn EmailService>>,
        Json(body): Json<ResetPasswordHookRequest>,
    ) -> Result<(StatusCode, Json<Value>), ApplicationError> {
        let email = body.email.trim();
        if email.is_empty() || !email.contains('@') {
            warn!("Reset password hook called without a usable email");
            return Err(ApplicationError::BadRequest(
                "A valid email is required".to_string(),
            ));
        }
        if body.url.trim().is_empty() {
            return Err(ApplicationError::BadRequest(
                "A reset URL is required".to_string(),
            ));
        }

        let ack = email_service.send_reset_password(email, &body.url).await?;
        info!("Password reset email dispatched");

        Ok((StatusCode::ACCEPTED, Json(ack)))
    }
}
