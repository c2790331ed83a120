use crate::adapters::http::{decode_json, join_url};
use crate::domain::model::Invite;
use crate::domain::ports::UserModule;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// User-module access over the backend's admin HTTP API.
///
/// Invites created here are admin-user invites; the backend emits
/// `invite.created` for each one.
#[derive(Debug, Clone)]
pub struct AdminApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

#[derive(Deserialize)]
struct InviteEnvelope {
    invite: Invite,
}

impl AdminApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            client: Client::new(),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn create_invite(&self, email: &str) -> Result<Invite> {
        let url = join_url(&self.base_url, "/admin/invites");
        tracing::debug!("Creating invite for {} via {}", email, url);

        let response = self
            .authorize(self.client.post(url))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;

        let envelope: InviteEnvelope = decode_json(response).await?;
        Ok(envelope.invite)
    }
}

#[async_trait]
impl UserModule for AdminApiClient {
    async fn retrieve_invite(&self, id: &str) -> Result<Invite> {
        let url = join_url(&self.base_url, &format!("/admin/invites/{}", id));
        let response = self.authorize(self.client.get(url)).send().await?;
        let envelope: InviteEnvelope = decode_json(response).await?;
        Ok(envelope.invite)
    }
}
