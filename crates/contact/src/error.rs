/// First failed check of a contact submission.
///
/// The `Display` text is shown to the visitor as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("Unesite ime (min 2 slova).")]
    Name,

    #[error("Unesite ispravan email.")]
    Email,

    #[error("Poruka mora imati bar 10 karaktera.")]
    Message,
}

impl ContactError {
    /// Field the error belongs to, as named in the JSON payload.
    pub fn field(&self) -> &'static str {
        match self {
            ContactError::Name => "name",
            ContactError::Email => "email",
            ContactError::Message => "message",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContactError>;
