//! Outbound Mail
//!
//! SMTP delivery for password-reset links. Mail is optional: without
//! SMTP configuration the server logs the link instead of sending it,
//! and delivery failures are logged rather than returned, because the
//! reset endpoint's acknowledgement must stay uniform no matter what
//! happened behind it.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::AppError;
use crate::server::config::SmtpConfig;

/// SMTP mailer for account mail. Cheap to clone.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    frontend_url: String,
}

impl Mailer {
    /// Build a mailer from SMTP settings.
    ///
    /// # Errors
    ///
    /// Config errors when the relay host or the from address will not
    /// parse; both are startup-time mistakes worth failing loudly on.
    pub fn new(smtp: &SmtpConfig, frontend_url: &str) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
            .map_err(|e| AppError::config(format!("invalid SMTP relay host: {e}")))?
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .build();

        let from = smtp
            .from
            .parse::<Mailbox>()
            .map_err(|e| AppError::config(format!("invalid SMTP_FROM address: {e}")))?;

        Ok(Self {
            transport,
            from,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a password-reset link. Failures are logged, never returned.
    pub async fn send_reset_link(&self, email: &str, token: &str) {
        let recipient = match email.parse::<Mailbox>() {
            Ok(recipient) => recipient,
            Err(e) => {
                tracing::warn!("Refusing to mail an unparseable address: {:?}", e);
                return;
            }
        };

        let reset_link = format!("{}/reset-password/{}", self.frontend_url, token);
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject("Reset your Wayfare password")
            .body(format!(
                "A password reset was requested for this address.\n\n\
                 Follow this link within the next hour to choose a new password:\n\
                 {reset_link}\n\n\
                 If you did not request this, you can ignore this email."
            ));

        let message = match message {
            Ok(message) => message,
            Err(e) => {
                tracing::error!("Failed to build reset email: {:?}", e);
                return;
            }
        };

        match self.transport.send(message).await {
            Ok(_) => tracing::info!("Password reset email sent to {}", email),
            Err(e) => tracing::error!("Failed to send reset email: {:?}", e),
        }
    }
}
