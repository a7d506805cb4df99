use anyhow::Result;
use mpwebstudio_notification::SmtpMailer;

/// Connect to the configured relay once and report the outcome.
pub async fn check(config: mpwebstudio::Config) -> Result<()> {
    let mailer = SmtpMailer::new(&config.mail)?;
    let recipient = config.mail.recipient()?;

    if !mailer.ping().await? {
        anyhow::bail!("SMTP relay refused the connection");
    }

    tracing::info!(recipient = %recipient, "SMTP relay reachable, notifications will be delivered");

    Ok(())
}
