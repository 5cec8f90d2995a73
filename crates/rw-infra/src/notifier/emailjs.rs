//! Confirmation mail through an EmailJS-compatible send endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use rw_core::ports::{ConfirmationNotifierPort, NotifierError};
use rw_core::validation::is_plausible_email;

pub const DEFAULT_EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

pub struct EmailJsNotifier {
    client: Client,
    config: EmailJsConfig,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    email: &'a str,
    #[serde(rename = "fullName")]
    full_name: &'a str,
}

impl EmailJsNotifier {
    pub fn new(config: EmailJsConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ConfirmationNotifierPort for EmailJsNotifier {
    async fn send_confirmation(&self, email: &str, full_name: &str) -> Result<(), NotifierError> {
        if !is_plausible_email(email) {
            return Err(NotifierError::InvalidRecipient(email.to_string()));
        }

        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams { email, full_name },
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifierError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::Delivery(format!("{status}: {body}")));
        }

        info!(template_id = %self.config.template_id, "confirmation mail accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn notifier(endpoint: String) -> EmailJsNotifier {
        EmailJsNotifier::new(EmailJsConfig {
            endpoint,
            service_id: "service_x".into(),
            template_id: "template_y".into(),
            public_key: "public_z".into(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn posts_template_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1.0/email/send")
            .match_body(Matcher::Json(serde_json::json!({
                "service_id": "service_x",
                "template_id": "template_y",
                "user_id": "public_z",
                "template_params": { "email": "a@x.com", "fullName": "Ada" }
            })))
            .with_status(200)
            .with_body("OK")
            .create_async()
            .await;

        let endpoint = format!("{}/api/v1.0/email/send", server.url());
        notifier(endpoint)
            .send_confirmation("a@x.com", "Ada")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn implausible_recipient_is_refused_without_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = notifier(server.url())
            .send_confirmation("not-an-email", "Ada")
            .await
            .unwrap_err();

        assert!(matches!(err, NotifierError::InvalidRecipient(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_send_is_delivery_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(400)
            .with_body("The user ID is invalid")
            .create_async()
            .await;

        let err = notifier(server.url())
            .send_confirmation("a@x.com", "Ada")
            .await
            .unwrap_err();

        assert!(matches!(err, NotifierError::Delivery(msg) if msg.contains("user ID")));
    }
}
