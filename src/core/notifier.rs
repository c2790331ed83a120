use crate::adapters::resend::{OutboundEmail, ResendClient};
use crate::core::templates;
use crate::domain::model::{NotificationReceipt, NotificationRequest};
use crate::domain::ports::NotificationModule;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Email notification provider backed by Resend.
pub struct ResendNotifier {
    client: ResendClient,
    from: String,
}

impl ResendNotifier {
    pub fn new(client: ResendClient, from: impl Into<String>) -> Self {
        Self {
            client,
            from: from.into(),
        }
    }

    pub fn compose(&self, request: &NotificationRequest) -> Result<OutboundEmail> {
        let rendered = templates::render(request.template, &request.data)?;
        let reply_to = request.email_options().and_then(|o| o.reply_to);

        Ok(OutboundEmail {
            from: self.from.clone(),
            to: vec![request.to.clone()],
            subject: rendered.subject,
            html: rendered.html,
            reply_to,
        })
    }
}

#[async_trait]
impl NotificationModule for ResendNotifier {
    async fn create_notification(&self, request: NotificationRequest) -> Result<NotificationReceipt> {
        let email = self.compose(&request)?;
        let receipt = self.client.send(&email).await?;
        tracing::debug!(
            "Resend accepted {} for {} as {}",
            request.template.as_str(),
            request.to,
            receipt.id
        );
        Ok(receipt)
    }
}
