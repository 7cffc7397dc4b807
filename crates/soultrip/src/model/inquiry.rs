//! Contact form inquiries.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::form::{non_blank, opt_text};
use crate::error::{Error, Result};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Check that a string looks like an email address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Handling state of a contact inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InquiryStatus {
    /// Not yet opened.
    #[default]
    New,
    /// Opened by the admin.
    Read,
    /// Answered.
    Replied,
    /// Done.
    Closed,
}

impl InquiryStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [Self::New, Self::Read, Self::Replied, Self::Closed];

    /// The value stored in the database.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Read => "Read",
            Self::Replied => "Replied",
            Self::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::validation("Invalid status value"))
    }
}

/// A stored contact inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    /// Row id.
    pub id: i64,
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Sender phone.
    pub phone: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
    /// Handling state.
    pub status: InquiryStatus,
    /// Creation time.
    pub created_at: String,
    /// Last status change.
    pub updated_at: String,
}

impl Inquiry {
    /// Subject line, or the generic label used when none was given.
    #[must_use]
    pub fn subject_or_default(&self) -> &str {
        self.subject.as_deref().unwrap_or(GENERAL_INQUIRY)
    }
}

/// Subject used when the sender left it blank.
pub const GENERAL_INQUIRY: &str = "General Inquiry";

/// A contact form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewInquiry {
    /// Sender name.
    #[serde(default)]
    pub name: String,
    /// Sender email.
    #[serde(default)]
    pub email: String,
    /// Sender phone.
    #[serde(default, deserialize_with = "opt_text")]
    pub phone: Option<String>,
    /// Subject line.
    #[serde(default, deserialize_with = "opt_text")]
    pub subject: Option<String>,
    /// Message body.
    #[serde(default)]
    pub message: String,
}

impl NewInquiry {
    /// Trim the fields and check name, email and message.
    ///
    /// # Errors
    ///
    /// Returns a validation error when a required field is blank or the email
    /// is malformed.
    pub fn validate(self) -> Result<Self> {
        let name = non_blank(Some(&self.name)).map(str::to_string);
        let email = non_blank(Some(&self.email)).map(str::to_string);
        let message = non_blank(Some(&self.message)).map(str::to_string);

        let (Some(name), Some(email), Some(message)) = (name, email, message) else {
            return Err(Error::validation("Name, email and message are required"));
        };
        if !is_valid_email(&email) {
            return Err(Error::validation("Please provide a valid email address"));
        }

        Ok(Self {
            name,
            email,
            phone: self.phone,
            subject: self.subject,
            message,
        })
    }
}

/// Body of a status change request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InquiryStatusUpdate {
    /// Requested status name.
    #[serde(default)]
    pub status: String,
}
