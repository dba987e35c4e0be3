use super::Notifier;
use crate::config::WhatsAppCredentials;
use crate::error::NotifyError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody<'a>,
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

/// Sends plain-text messages through the WhatsApp Cloud API.
pub struct WhatsAppNotifier {
    api_base: String,
    credentials: Option<WhatsAppCredentials>,
    client: Client,
}

impl WhatsAppNotifier {
    pub fn new(
        api_base: impl Into<String>,
        credentials: Option<WhatsAppCredentials>,
        client: Client,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            credentials,
            client,
        }
    }

    fn messages_url(&self, creds: &WhatsAppCredentials) -> String {
        format!(
            "{}/{}/messages",
            self.api_base.trim_end_matches('/'),
            creds.phone_id
        )
    }
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let creds = self.credentials.as_ref().ok_or(NotifyError::MissingConfig)?;

        let payload = TextMessage {
            messaging_product: "whatsapp",
            to: &creds.to,
            kind: "text",
            text: TextBody { body: text },
        };

        let url = self.messages_url(creds);
        debug!("Posting {} bytes to {}", text.len(), url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&creds.token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
