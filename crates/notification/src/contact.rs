use std::sync::Arc;

use mpwebstudio_contact::ValidatedContact;

use crate::{Email, EmailConfig, MailError, Mailer, SmtpMailer};

/// Relays accepted contact submissions to the studio inbox.
#[derive(Clone)]
pub struct ContactNotifier {
    mailer: Arc<dyn Mailer>,
    to: String,
}

impl ContactNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, to: impl Into<String>) -> Self {
        Self {
            mailer,
            to: to.into(),
        }
    }

    /// SMTP-backed notifier. Missing credentials or addresses fail here,
    /// before anything is sent.
    pub fn from_config(config: &EmailConfig) -> Result<Self, MailError> {
        let mailer = SmtpMailer::new(config)?;
        let to = config.recipient()?;

        Ok(Self::new(Arc::new(mailer), to))
    }

    pub async fn notify(&self, contact: &ValidatedContact) -> Result<(), MailError> {
        self.mailer.send(contact_email(contact, &self.to)).await
    }
}

/// Builds the inbox notification for a submission. Replies go to the visitor.
pub fn contact_email(contact: &ValidatedContact, to: &str) -> Email {
    Email {
        to: to.to_owned(),
        reply_to: Some(contact.email.to_owned()),
        subject: format!("MP Web Studio — Novi upit ({})", contact.name),
        plain: plain_body(contact),
        html: html_body(contact),
    }
}

fn plain_body(contact: &ValidatedContact) -> String {
    format!(
        "Novi upit sa sajta MP Web Studio\n\n\
         Ime: {}\n\
         Email: {}\n\
         Telefon: {}\n\
         Stranica: {}\n\
         Vreme: {}\n\n\
         Poruka:\n{}\n",
        contact.name,
        contact.email,
        contact.phone.as_deref().unwrap_or("-"),
        contact.source_page.as_deref().unwrap_or("-"),
        contact.created_at_iso(),
        contact.message
    )
}

fn html_body(contact: &ValidatedContact) -> String {
    format!(
        "<h2>Novi upit sa sajta MP Web Studio</h2>\
         <ul>\
         <li><b>Ime:</b> {}</li>\
         <li><b>Email:</b> {}</li>\
         <li><b>Telefon:</b> {}</li>\
         <li><b>Stranica:</b> {}</li>\
         <li><b>Vreme:</b> {}</li>\
         </ul>\
         <h3>Poruka</h3>\
         <p>{}</p>",
        escape_html(&contact.name),
        escape_html(&contact.email),
        escape_html(contact.phone.as_deref().unwrap_or("-")),
        escape_html(contact.source_page.as_deref().unwrap_or("-")),
        escape_html(&contact.created_at_iso()),
        escape_html(&contact.message).replace('\n', "<br>")
    )
}

/// Escapes `& < > " '` so user input can be embedded in HTML.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
