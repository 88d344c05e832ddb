use serde::{Deserialize, Serialize};

/// What the sender is writing about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InquiryType {
    General,
    Sponsorship,
    Speaking,
    Tickets,
    Media,
    Other,
}

impl InquiryType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "general" => Some(InquiryType::General),
            "sponsorship" => Some(InquiryType::Sponsorship),
            "speaking" => Some(InquiryType::Speaking),
            "tickets" => Some(InquiryType::Tickets),
            "media" => Some(InquiryType::Media),
            "other" => Some(InquiryType::Other),
            _ => None,
        }
    }
}

/// A validated contact message, ready to be written to the content API.
/// Write-only: the site never reads these back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub inquiry_type: InquiryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_camel_case_without_empty_optionals() {
        let message = ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.org".to_string(),
            subject: "Booth".to_string(),
            message: "Do you have space?".to_string(),
            inquiry_type: InquiryType::Sponsorship,
            phone: None,
            organization: Some("Analytical Engines".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "name": "Ada",
                "email": "ada@example.org",
                "subject": "Booth",
                "message": "Do you have space?",
                "inquiryType": "sponsorship",
                "organization": "Analytical Engines"
            })
        );
    }

    #[test]
    fn test_parse_inquiry_type() {
        assert_eq!(InquiryType::parse(" Speaking "), Some(InquiryType::Speaking));
        assert_eq!(InquiryType::parse("press"), None);
    }
}
