use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cms_client::Resource;
use crate::models::{double_option, null_default, CmsRecord, EntityRef, Media};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: u64,
    #[serde(rename = "documentId", default)]
    pub document_id: Option<String>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Slug")]
    pub slug: String,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Organization", default)]
    pub organization: Option<String>,
    #[serde(rename = "ShortBio", default)]
    pub short_bio: Option<String>,
    #[serde(rename = "LongBio", default)]
    pub long_bio: Option<String>,
    #[serde(rename = "Featured", default, deserialize_with = "null_default")]
    pub featured: bool,
    #[serde(rename = "ProfileImage", default)]
    pub profile_image: Option<Media>,
    #[serde(rename = "LinkedIn", default)]
    pub linkedin: Option<String>,
    #[serde(rename = "Twitter", default)]
    pub twitter: Option<String>,
    #[serde(rename = "Website", default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub events: Vec<EntityRef>,
    #[serde(
        rename = "publishedAt",
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<Option<DateTime<Utc>>>,
}

impl Speaker {
    /// Placeholder shown when no profile image exists.
    pub fn initial(&self) -> Option<char> {
        self.name.trim().chars().next().map(|c| c.to_ascii_uppercase())
    }

    /// Social links that are actually filled in, labeled for display.
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("LinkedIn", self.linkedin.as_deref()),
            ("Twitter", self.twitter.as_deref()),
            ("Website", self.website.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| {
            url.map(str::trim)
                .filter(|u| !u.is_empty())
                .map(|u| (label, u))
        })
        .collect()
    }
}

impl CmsRecord for Speaker {
    const RESOURCE: Resource = Resource::Speakers;

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn published_at(&self) -> Option<Option<DateTime<Utc>>> {
        self.published_at
    }

    fn resolve_media(&mut self, base: &str) {
        if let Some(image) = self.profile_image.as_mut() {
            image.resolve(base);
        }
    }
}
