use serde::Deserialize;

use crate::MailError;

/// SMTP relay settings.
///
/// Host and credentials are optional here so that a half-configured
/// deployment still boots; the relay refuses to send until they are set.
#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    /// Relay validated submissions by email. When off, submissions are only logged.
    #[serde(default = "default_relay")]
    pub relay: bool,
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Implicit TLS from the first byte. Otherwise STARTTLS is negotiated.
    #[serde(default)]
    pub smtp_secure: bool,
    #[serde(default)]
    pub smtp_username: Option<String>,
    #[serde(default)]
    pub smtp_password: Option<String>,
    /// Defaults to the SMTP username.
    #[serde(default)]
    pub from_address: Option<String>,
    /// Defaults to the SMTP username.
    #[serde(default)]
    pub to_address: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            relay: default_relay(),
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_secure: false,
            smtp_username: None,
            smtp_password: None,
            from_address: None,
            to_address: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_relay() -> bool {
    true
}

fn default_smtp_port() -> u16 {
    587
}

fn default_timeout_secs() -> u64 {
    30
}

/// Host, username and password of a fully configured relay.
pub struct SmtpCredentials<'a> {
    pub host: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl EmailConfig {
    pub fn credentials(&self) -> Result<SmtpCredentials<'_>, MailError> {
        match (
            present(&self.smtp_host),
            present(&self.smtp_username),
            present(&self.smtp_password),
        ) {
            (Some(host), Some(username), Some(password)) => Ok(SmtpCredentials {
                host,
                username,
                password,
            }),
            _ => Err(MailError::MissingCredentials),
        }
    }

    pub fn sender(&self) -> Result<&str, MailError> {
        present(&self.from_address)
            .or_else(|| present(&self.smtp_username))
            .ok_or(MailError::MissingAddress("from"))
    }

    pub fn recipient(&self) -> Result<&str, MailError> {
        present(&self.to_address)
            .or_else(|| present(&self.smtp_username))
            .ok_or(MailError::MissingAddress("to"))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
