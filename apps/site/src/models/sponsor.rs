use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cms_client::Resource;
use crate::models::{double_option, null_default, CmsRecord, EntityRef, Media};

/// Sponsorship level. Declaration order is display priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SponsorTier {
    Platinum,
    Gold,
    Silver,
}

impl SponsorTier {
    pub const ALL: [SponsorTier; 3] = [SponsorTier::Platinum, SponsorTier::Gold, SponsorTier::Silver];

    pub fn as_str(&self) -> &'static str {
        match self {
            SponsorTier::Platinum => "Platinum",
            SponsorTier::Gold => "Gold",
            SponsorTier::Silver => "Silver",
        }
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

impl FromStr for SponsorTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SponsorTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sponsor tier '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    pub id: u64,
    #[serde(rename = "documentId", default)]
    pub document_id: Option<String>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Slug")]
    pub slug: String,
    /// Kept as the raw CMS string; the category filter compares it exactly.
    #[serde(rename = "Tier", default)]
    pub tier: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Featured", default, deserialize_with = "null_default")]
    pub featured: bool,
    #[serde(rename = "Logo", default)]
    pub logo: Option<Media>,
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

impl Sponsor {
    pub fn parsed_tier(&self) -> Option<SponsorTier> {
        self.tier.as_deref().and_then(|t| t.parse().ok())
    }

    /// 0 for Platinum through 2 for Silver; missing or unknown tiers sort last.
    pub fn tier_rank(&self) -> u8 {
        self.parsed_tier().map_or(u8::MAX, |t| t.rank())
    }
}

impl CmsRecord for Sponsor {
    const RESOURCE: Resource = Resource::Sponsors;

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn published_at(&self) -> Option<Option<DateTime<Utc>>> {
        self.published_at
    }

    fn resolve_media(&mut self, base: &str) {
        if let Some(logo) = self.logo.as_mut() {
            logo.resolve(base);
        }
    }
}
