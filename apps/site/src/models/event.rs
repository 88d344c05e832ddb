use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cms_client::Resource;
use crate::models::{double_option, null_default, CmsRecord, EntityRef, Media};

/// A summit session, workshop or ceremony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    #[serde(rename = "documentId", default)]
    pub document_id: Option<String>,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Slug")]
    pub slug: String,
    #[serde(rename = "ShortDescription", default)]
    pub short_description: Option<String>,
    #[serde(rename = "StartDate", default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "EndDate", default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
    #[serde(rename = "Room", default)]
    pub room: Option<String>,
    /// Category, e.g. "Workshop" or "Conference".
    #[serde(rename = "Enumeration", default)]
    pub category: Option<String>,
    #[serde(rename = "Featured", default, deserialize_with = "null_default")]
    pub featured: bool,
    #[serde(rename = "MaxAttendees", default)]
    pub max_attendees: Option<u32>,
    #[serde(rename = "Image", default)]
    pub image: Option<Media>,
    #[serde(default, deserialize_with = "null_default")]
    pub speakers: Vec<EntityRef>,
    #[serde(
        rename = "publishedAt",
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<Option<DateTime<Utc>>>,
}

impl Event {
    /// Duration in whole minutes, when both ends are known and ordered.
    pub fn duration_minutes(&self) -> Option<i64> {
        let (start, end) = (self.start_date?, self.end_date?);
        let minutes = (end - start).num_minutes();
        (minutes >= 0).then_some(minutes)
    }
}

impl CmsRecord for Event {
    const RESOURCE: Resource = Resource::Events;

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn published_at(&self) -> Option<Option<DateTime<Utc>>> {
        self.published_at
    }

    fn resolve_media(&mut self, base: &str) {
        if let Some(image) = self.image.as_mut() {
            image.resolve(base);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_minimal_event() {
        let event: Event = serde_json::from_value(json!({
            "id": 7,
            "Title": "DeFi Workshop",
            "Slug": "defi-workshop"
        }))
        .unwrap();
        assert_eq!(event.title, "DeFi Workshop");
        assert!(!event.featured);
        assert!(event.image.is_none());
        assert!(event.speakers.is_empty());
        assert!(event.is_published());
    }

    #[test]
    fn test_null_flags_and_relations_decode() {
        let event: Event = serde_json::from_value(json!({
            "id": 1,
            "Title": "Opening Ceremony",
            "Slug": "opening",
            "Featured": null,
            "speakers": null
        }))
        .unwrap();
        assert!(!event.featured);
        assert!(event.speakers.is_empty());
    }

    #[test]
    fn test_null_published_at_is_draft() {
        let event: Event = serde_json::from_value(json!({
            "id": 7,
            "Title": "Draft",
            "Slug": "draft",
            "publishedAt": null
        }))
        .unwrap();
        assert!(!event.is_published());
    }

    #[test]
    fn test_duration_minutes() {
        let event: Event = serde_json::from_value(json!({
            "id": 1,
            "Title": "Panel",
            "Slug": "panel",
            "StartDate": "2025-03-10T09:00:00.000Z",
            "EndDate": "2025-03-10T10:30:00.000Z"
        }))
        .unwrap();
        assert_eq!(event.duration_minutes(), Some(90));
    }
}
