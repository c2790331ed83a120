use crate::core::events::{EventMessage, Subscriber};
use crate::core::templates::{INVITE_PREVIEW, INVITE_SUBJECT};
use crate::domain::model::{Channel, Delivery, EmailTemplate, NotificationRequest};
use crate::domain::ports::{NotificationModule, UserModule};
use crate::utils::error::{GlueError, Result};
use async_trait::async_trait;

pub const INVITE_EVENTS: [&str; 2] = ["invite.created", "invite.resent"];
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:9000";
pub const DEFAULT_REPLY_TO: &str = "support@flowdose.xyz";

/// Emails an invite link whenever an invite is created or resent.
///
/// Delivery is best effort: lookup and send failures are logged and reported
/// as [`Delivery::Dropped`], never retried.
pub struct InviteSubscriber<U: UserModule, N: NotificationModule> {
    users: U,
    notifications: N,
    backend_url: String,
    reply_to: String,
}

impl<U: UserModule, N: NotificationModule> InviteSubscriber<U, N> {
    pub fn new(users: U, notifications: N, backend_url: Option<String>) -> Self {
        Self {
            users,
            notifications,
            backend_url: backend_url.unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            reply_to: DEFAULT_REPLY_TO.to_string(),
        }
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = reply_to.into();
        self
    }

    pub fn invite_link(&self, token: &str) -> String {
        let token: String = url::form_urlencoded::byte_serialize(token.as_bytes()).collect();
        format!(
            "{}/app/invite?token={}",
            self.backend_url.trim_end_matches('/'),
            token
        )
    }

    async fn send_invite(&self, invite_id: &str) -> Result<String> {
        let invite = self.users.retrieve_invite(invite_id).await?;
        tracing::info!("Processing invitation {} for {}", invite.id, invite.email);

        let request = NotificationRequest {
            to: invite.email.clone(),
            channel: Channel::Email,
            template: EmailTemplate::InviteUser,
            data: serde_json::json!({
                "emailOptions": {
                    "replyTo": self.reply_to,
                    "subject": INVITE_SUBJECT,
                },
                "inviteLink": self.invite_link(&invite.token),
                "preview": INVITE_PREVIEW,
            }),
        };

        self.notifications.create_notification(request).await?;
        Ok(invite.email)
    }

    pub async fn handle_invite(&self, event: &EventMessage) -> Delivery {
        let Some(invite_id) = event.data.get("id").and_then(|v| v.as_str()) else {
            tracing::error!("{} event carries no invite id, skipping", event.name);
            return Delivery::Dropped {
                reason: "event data has no id".to_string(),
            };
        };

        match self.send_invite(invite_id).await {
            Ok(email) => {
                tracing::info!("Successfully sent invite email to {}", email);
                Delivery::Sent { to: email }
            }
            Err(e) => {
                tracing::error!("Failed to send invite email for {}: {}", invite_id, e);
                Delivery::Dropped {
                    reason: describe(&e),
                }
            }
        }
    }
}

fn describe(error: &GlueError) -> String {
    match error {
        GlueError::ProviderError { status, .. } => format!("provider returned {}", status),
        other => other.to_string(),
    }
}

#[async_trait]
impl<U: UserModule, N: NotificationModule> Subscriber for InviteSubscriber<U, N> {
    fn name(&self) -> &str {
        "invite-notifications"
    }

    fn events(&self) -> &[&'static str] {
        &INVITE_EVENTS
    }

    async fn handle(&self, event: &EventMessage) -> Delivery {
        self.handle_invite(event).await
    }
}
