//! Records served by the content API.
//!
//! Every optional CMS field is modeled as `Option` or defaulted so that a
//! partially filled record still decodes. Defaulted fields also accept an
//! explicit `null` (see `null_default`). Records that cannot decode at all
//! are dropped one by one in `cms_client::decode_records`.

pub mod contact;
pub mod event;
pub mod media;
pub mod rich_text;
pub mod speaker;
pub mod sponsor;
pub mod ticket;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::cms_client::Resource;

pub use contact::{ContactMessage, InquiryType};
pub use event::Event;
pub use media::Media;
pub use speaker::Speaker;
pub use sponsor::{Sponsor, SponsorTier};
pub use ticket::TicketCategory;

/// Common surface of every collection record the site reads.
pub trait CmsRecord: DeserializeOwned + Serialize + Send {
    const RESOURCE: Resource;

    fn slug(&self) -> Option<&str>;

    /// Raw `publishedAt`: `None` when the field was absent, `Some(None)` for drafts.
    fn published_at(&self) -> Option<Option<DateTime<Utc>>>;

    /// Absent `publishedAt` is trusted as published; an explicit null is a draft.
    fn is_published(&self) -> bool {
        !matches!(self.published_at(), Some(None))
    }

    /// Rewrites relative media URLs against `base`.
    fn resolve_media(&mut self, base: &str);
}

/// Minimal summary of a related record (an event's speakers, a speaker's events).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: u64,
    #[serde(default, alias = "Title", alias = "Name")]
    pub label: Option<String>,
    #[serde(default, alias = "Slug")]
    pub slug: Option<String>,
}

/// Keeps "field missing" apart from "field is null".
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reads an explicit `null` as the type's default, like a missing key.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
