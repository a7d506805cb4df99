#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("SMTP env vars missing (SMTP_HOST/SMTP_USER/SMTP_PASS)")]
    MissingCredentials,

    #[error("no {0} address configured")]
    MissingAddress(&'static str),

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("mail relay is not configured: {0}")]
    Unconfigured(String),
}
