//! Transactional email delivery
//!
//! Messages go out through a mail provider's HTTP API. The mailer is a
//! best-effort collaborator: callers log a failed delivery and carry on
//! with the primary operation, which has already been persisted.

use crate::config::MailConfig;
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Payload accepted by the mail provider's message endpoint
#[derive(Debug, Serialize)]
struct OutboundMessage<'a> {
    from: String,
    to: &'a str,
    subject: &'a str,
    html: String,
}

/// Mail delivery client
///
/// Cheap to clone; the HTTP client and config are shared.
#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    config: Arc<MailConfig>,
}

impl Mailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    /// Send the post-registration welcome email
    pub async fn send_registration_email(&self, recipient: &str, name: &str) -> Result<()> {
        let html = format!(
            "<h1>Account Created Successfully</h1>\
             <p>Hi {name},</p>\
             <p>Welcome to DailyBlog. Your account is ready to use.</p>",
        );
        self.deliver(recipient, "Welcome to DailyBlog", html).await
    }

    /// Send the password reset link
    pub async fn send_password_reset_email(
        &self,
        recipient: &str,
        name: &str,
        reset_link: &str,
    ) -> Result<()> {
        let html = format!(
            "<h1>Password Reset Request</h1>\
             <p>Hi {name},</p>\
             <p>Use the link below to reset your password. \
             The link expires shortly.</p>\
             <p><a href=\"{reset_link}\">Reset password</a></p>",
        );
        self.deliver(recipient, "Password Reset", html).await
    }

    async fn deliver(&self, to: &str, subject: &str, html: String) -> Result<()> {
        if !self.config.enabled {
            debug!(recipient = to, subject, "mail disabled, skipping delivery");
            return Ok(());
        }

        let message = OutboundMessage {
            from: format!("{} <{}>", self.config.sender_name, self.config.sender),
            to,
            subject,
            html,
        };

        self.client
            .post(format!("{}/messages", self.config.api_url))
            .bearer_auth(&self.config.api_token)
            .json(&message)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
