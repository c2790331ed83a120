use crate::adapters::http::{decode_json, join_url};
use crate::domain::model::NotificationReceipt;
use crate::utils::error::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const RESEND_API_BASE: &str = "https://api.resend.com";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Minimal client for Resend's `POST /emails`.
#[derive(Debug, Clone)]
pub struct ResendClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(RESEND_API_BASE, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    pub async fn send(&self, email: &OutboundEmail) -> Result<NotificationReceipt> {
        tracing::debug!("Sending '{}' from {} to {:?}", email.subject, email.from, email.to);

        let response = self
            .client
            .post(join_url(&self.base_url, "/emails"))
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        decode_json(response).await
    }
}
