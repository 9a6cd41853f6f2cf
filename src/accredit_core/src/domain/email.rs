use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex must compile")
});

#[derive(Debug, Error, PartialEq)]
pub enum EmailError {
    #[error("The email value must be set")]
    Empty,
    #[error("Invalid email address")]
    Invalid,
}

/// Validated email address.
///
/// The domain portion is lower-cased on construction, so two values that
/// differ only in domain casing compare equal. The address is treated as
/// sensitive data and kept behind [`Secret`].
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }

    /// Lower-cased form used for case-insensitive uniqueness checks.
    pub fn normalized_key(&self) -> String {
        self.0.expose_secret().to_lowercase()
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let raw = value.expose_secret().trim();

        if raw.is_empty() {
            return Err(EmailError::Empty);
        }

        if !EMAIL_REGEX.is_match(raw) {
            return Err(EmailError::Invalid);
        }

        // Normalize: lower-case the domain portion, keep the local part as-is.
        let at = raw.rfind('@').ok_or(EmailError::Invalid)?;
        let (local, domain) = raw.split_at(at);
        let normalized = format!("{}{}", local, domain.to_lowercase());

        Ok(Self(Secret::from(normalized)))
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
