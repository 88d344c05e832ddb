use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ContactMessage, InquiryType};

/// Raw form input, exactly as the visitor typed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub inquiry_type: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Unknown inquiry type '{0}'")]
    UnknownInquiryType(String),
}

impl ContactForm {
    /// Checks required fields and shapes the message to send.
    /// Blank optional fields are dropped.
    pub fn validate(&self) -> Result<ContactMessage, ValidationError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
            ("inquiryType", &self.inquiry_type),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let email = self.email.trim();
        if !looks_like_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        let inquiry_type = InquiryType::parse(&self.inquiry_type)
            .ok_or_else(|| ValidationError::UnknownInquiryType(self.inquiry_type.trim().to_string()))?;

        Ok(ContactMessage {
            name: self.name.trim().to_string(),
            email: email.to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            inquiry_type,
            phone: non_blank(self.phone.as_deref()),
            organization: non_blank(self.organization.as_deref()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Same bar a browser's `type=email` input sets: something@domain.tld, no spaces.
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
