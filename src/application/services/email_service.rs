use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::services::EmailError;

#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends a templated email. `data` is interpreted by the provider; the
    /// returned value is the provider's acknowledgement, untouched.
    async fn send_email(
        &self,
        to: &str,
        data: BTreeMap<String, String>,
    ) -> Result<Value, EmailError>;

    async fn send_reset_password(&self, to: &str, reset_link: &str) -> Result<Value, EmailError> {
        let data = BTreeMap::from([
            ("resetLink".to_string(), reset_link.to_string()),
            ("type".to_string(), "reset-password".to_string()),
        ]);
        self.send_email(to, data).await
    }
}
