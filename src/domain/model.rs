use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publishable key as the storefront expects it from the Store API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishableApiKey {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub revoked_by: Option<String>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl PublishableApiKey {
    pub fn stand_in(now: DateTime<Utc>) -> Self {
        Self {
            id: "pk_01STANDIN000000000000000000".to_string(),
            title: "Development Publishable Key".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            revoked_by: None,
            revoked_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryPage {
    pub collections: Vec<serde_json::Value>,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    pub products: Vec<serde_json::Value>,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invite {
    pub id: String,
    pub email: String,
    pub token: String,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmailTemplate {
    #[serde(rename = "invite-user")]
    InviteUser,
    #[serde(rename = "verify-test")]
    VerifyTest,
}

impl EmailTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailTemplate::InviteUser => "invite-user",
            EmailTemplate::VerifyTest => "verify-test",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailOptions {
    pub reply_to: Option<String>,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationRequest {
    pub to: String,
    pub channel: Channel,
    pub template: EmailTemplate,
    pub data: serde_json::Value,
}

impl NotificationRequest {
    /// `data.emailOptions`, when the template data carries one.
    pub fn email_options(&self) -> Option<EmailOptions> {
        self.data
            .get("emailOptions")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationReceipt {
    pub id: String,
}

/// Outcome of a best-effort handler. Dispatchers log it and move on.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Sent { to: String },
    Dropped { reason: String },
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Delivery::Sent { .. })
    }
}
