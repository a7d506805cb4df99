//! Email notification service using lettre

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};

use crate::{EmailConfig, MailError};

/// Outgoing message; the sender is owned by the [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub plain: String,
    pub html: String,
}

/// Hands an [`Email`] to the outside world and waits for the outcome.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

/// Mailer backed by an authenticated SMTP relay
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a new mailer from configuration.
    ///
    /// Fails before any connection is attempted when host, username or
    /// password is missing.
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let credentials = config.credentials()?;
        let from: Mailbox = config.sender()?.parse()?;

        let builder = if config.smtp_secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(credentials.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(credentials.host)?
        };

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(
                credentials.username.to_owned(),
                credentials.password.to_owned(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        tracing::info!(
            smtp_host = %credentials.host,
            smtp_port = config.smtp_port,
            smtp_secure = config.smtp_secure,
            from = %from,
            "Email service initialized with authentication and TLS"
        );

        Ok(Self { transport, from })
    }

    /// Open a connection to the relay and close it again.
    pub async fn ping(&self) -> Result<bool, MailError> {
        Ok(self.transport.test_connection().await?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        tracing::info!(to = %email.to, subject = %email.subject, "Sending email");

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(email.subject);

        if let Some(reply_to) = email.reply_to {
            builder = builder.reply_to(reply_to.parse()?);
        }

        let message = builder.multipart(MultiPart::alternative_plain_html(email.plain, email.html))?;

        self.transport.send(message).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fails_fast_without_credentials() {
        let config = EmailConfig {
            smtp_host: Some("smtp.example.com".to_owned()),
            ..Default::default()
        };

        assert!(matches!(SmtpMailer::new(&config), Err(MailError::MissingCredentials)));
    }

    #[test]
    fn new_rejects_invalid_sender() {
        let config = EmailConfig {
            smtp_host: Some("smtp.example.com".to_owned()),
            smtp_username: Some("info@mpwebstudio.rs".to_owned()),
            smtp_password: Some("secret".to_owned()),
            from_address: Some("not an address".to_owned()),
            ..Default::default()
        };

        assert!(matches!(SmtpMailer::new(&config), Err(MailError::Address(_))));
    }
}
