use crate::domain::model::EmailTemplate;
use crate::utils::error::{GlueError, Result};

pub const INVITE_SUBJECT: &str = "You've been invited to Medusa!";
pub const INVITE_PREVIEW: &str = "The administration dashboard awaits...";
pub const VERIFY_SUBJECT: &str = "Flowdose Email Verification Test";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

pub fn render(template: EmailTemplate, data: &serde_json::Value) -> Result<RenderedEmail> {
    let subject = data
        .pointer("/emailOptions/subject")
        .and_then(|v| v.as_str());

    match template {
        EmailTemplate::InviteUser => {
            let link = data
                .get("inviteLink")
                .and_then(|v| v.as_str())
                .ok_or_else(|| GlueError::ConfigError {
                    message: "invite-user template needs an inviteLink".to_string(),
                })?;
            let preview = data
                .get("preview")
                .and_then(|v| v.as_str())
                .unwrap_or(INVITE_PREVIEW);

            Ok(RenderedEmail {
                subject: subject.unwrap_or(INVITE_SUBJECT).to_string(),
                html: invite_html(link, preview),
            })
        }
        EmailTemplate::VerifyTest => Ok(RenderedEmail {
            subject: subject.unwrap_or(VERIFY_SUBJECT).to_string(),
            html: verify_html(),
        }),
    }
}

fn invite_html(link: &str, preview: &str) -> String {
    let link = escape_html(link);
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <p style="display: none;">{preview}</p>
  <h2 style="color: #5E35B1;">You've been invited to be an administrator</h2>
  <p>Click the button below to accept the invitation and set up your account.</p>
  <p><a href="{link}" style="background: #5E35B1; color: #fff; padding: 10px 16px; border-radius: 4px; text-decoration: none;">Accept invitation</a></p>
  <p>Or copy this link into your browser: {link}</p>
  <hr style="border: 1px solid #eaeaea; margin: 20px 0;" />
  <p style="color: #666; font-size: 12px;">If you were not expecting this invitation, you can ignore this email.</p>
</div>"#,
        preview = escape_html(preview),
        link = link,
    )
}

fn verify_html() -> String {
    r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #5E35B1;">Flowdose Email Verification</h2>
  <p>This is a test email to verify that your Resend setup is working correctly with the flowdose.xyz domain.</p>
  <p>If you received this email, your Resend configuration is correctly set up!</p>
  <hr style="border: 1px solid #eaeaea; margin: 20px 0;" />
  <p style="color: #666; font-size: 12px;">This is an automated message from Flowdose.</p>
</div>"#
        .to_string()
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
