//! Customer email addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Longest address accepted at checkout (RFC 5321 path limit).
const MAX_LEN: usize = 254;

/// Why a checkout email was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Empty,
    #[error("email is longer than {MAX_LEN} characters")]
    TooLong,
    #[error("email must look like name@domain")]
    Malformed,
}

/// A customer email address, as captured at checkout.
///
/// Stored trimmed. Validation is deliberately loose: one `@` with something
/// on both sides and no whitespace. Stored orders go through the same check
/// when they are read back.
///
/// ```
/// use buraq_core::Email;
///
/// assert_eq!(Email::parse(" budi@buraq.id ").unwrap().as_str(), "budi@buraq.id");
/// assert!(Email::parse("budi.buraq.id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise form input.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the trimmed input is blank, too long, or not
    /// of the form `local@domain`.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.len() > MAX_LEN {
            return Err(EmailError::TooLong);
        }

        let well_formed = trimmed.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }) && !trimmed.chars().any(char::is_whitespace);
        if !well_formed {
            return Err(EmailError::Malformed);
        }

        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
