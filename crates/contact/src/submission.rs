use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use crate::{ContactError, Result};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Raw contact form payload as posted by the site.
///
/// Every field is lenient: a missing key, `null` or any non-string JSON value
/// becomes an empty string. Nothing is trimmed or checked at this stage.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source_page: String,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => value,
        _ => String::new(),
    })
}

impl From<serde_json::Value> for ContactSubmission {
    /// Anything that is not a JSON object is an empty submission.
    fn from(value: serde_json::Value) -> Self {
        match value {
            value @ serde_json::Value::Object(_) => {
                serde_json::from_value(value).unwrap_or_default()
            }
            _ => Self::default(),
        }
    }
}

/// Lengths are counted in UTF-16 code units, the way the site's scripts count them.
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn validate_name(name: &str) -> std::result::Result<(), validator::ValidationError> {
    if utf16_len(name) < 2 {
        return Err(validator::ValidationError::new("name_length"));
    }

    Ok(())
}

fn validate_message(message: &str) -> std::result::Result<(), validator::ValidationError> {
    if utf16_len(message) < 10 {
        return Err(validator::ValidationError::new("message_length"));
    }

    Ok(())
}

#[derive(Validate)]
struct ContactInput {
    #[validate(custom(function = "validate_name"))]
    name: String,
    #[validate(regex(path = *EMAIL_RE))]
    email: String,
    #[validate(custom(function = "validate_message"))]
    message: String,
    phone: String,
    source_page: String,
}

impl From<ContactSubmission> for ContactInput {
    fn from(value: ContactSubmission) -> Self {
        Self {
            name: value.name.trim().to_owned(),
            email: value.email.trim().to_owned(),
            message: value.message.trim().to_owned(),
            phone: value.phone.trim().to_owned(),
            source_page: value.source_page.trim().to_owned(),
        }
    }
}

/// Checks are reported in this order, only the first failure is returned.
const CHECK_ORDER: [ContactError; 3] = [ContactError::Name, ContactError::Email, ContactError::Message];

impl ContactSubmission {
    /// Normalizes and validates the submission, stamping it with the current time.
    pub fn validate(self) -> Result<ValidatedContact> {
        self.validate_at(Utc::now())
    }

    pub fn validate_at(self, created_at: DateTime<Utc>) -> Result<ValidatedContact> {
        let input = ContactInput::from(self);

        if let Err(errors) = input.validate() {
            let failed = errors.field_errors();
            let first = CHECK_ORDER
                .into_iter()
                .find(|check| failed.contains_key(check.field()))
                .unwrap_or(ContactError::Name);

            return Err(first);
        }

        Ok(ValidatedContact {
            name: input.name,
            email: input.email,
            phone: non_empty(input.phone),
            message: input.message,
            source_page: non_empty(input.source_page),
            created_at,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// A submission that passed every check. Lives for a single request only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub source_page: Option<String>,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl ValidatedContact {
    /// `createdAt` as ISO-8601 UTC with millisecond precision.
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

fn iso_millis<S>(value: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
