//! Explicit load functions, one per page entry.
//!
//! Each loader issues its fetches once and returns a `LoadState`. There is no
//! cache and no retry: "Try Again" on a page simply calls the loader again.

pub mod handlers;
pub mod home;

use serde::Serialize;
use tracing::{error, warn};

use crate::cms_client::{decode_records, ContentApi, ContentQuery, Direction, FetchError, Resource};
use crate::models::{CmsRecord, Event, Speaker, Sponsor, TicketCategory};

pub use home::{load_home, HomePage};

/// What a page renders from: still waiting, the fetched list, or an error.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadState<T> {
    Loading,
    Loaded { items: Vec<T> },
    Failed { error: String },
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    /// The upstream error is logged; pages only get a generic message.
    pub fn from_result(resource: Resource, result: Result<Vec<T>, FetchError>) -> Self {
        match result {
            Ok(items) => LoadState::Loaded { items },
            Err(e) => {
                error!("Content API error on /{}: {e}", resource.path());
                LoadState::Failed {
                    error: format!("Could not load {}", resource.path()),
                }
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn items(&self) -> Option<&[T]> {
        match self {
            LoadState::Loaded { items } => Some(items),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Queries
// ────────────────────────────────────────────────────────────────────────────

pub fn events_query() -> ContentQuery {
    ContentQuery::new()
        .populate_all()
        .sort("StartDate", Direction::Asc)
}

pub fn speakers_query() -> ContentQuery {
    ContentQuery::new().populate_all().sort("Name", Direction::Asc)
}

pub fn sponsors_query() -> ContentQuery {
    ContentQuery::new().populate_all().sort("Name", Direction::Asc)
}

/// The server-side filter is a hint only; `visible_tickets` re-checks `isActive`.
pub fn tickets_query() -> ContentQuery {
    ContentQuery::new()
        .filter_eq("isActive", true)
        .sort("sortOrder", Direction::Asc)
}

// ────────────────────────────────────────────────────────────────────────────
// Loaders
// ────────────────────────────────────────────────────────────────────────────

/// Fetches one collection, keeps decodable published records and resolves
/// their media URLs against `media_base`.
pub async fn load_collection<T: CmsRecord>(
    api: &dyn ContentApi,
    query: &ContentQuery,
    media_base: &str,
) -> Result<Vec<T>, FetchError> {
    let records = api.fetch(T::RESOURCE, query).await?;
    let fetched = records.len();

    let mut items: Vec<T> = decode_records::<T>(records)
        .into_iter()
        .filter(|item| item.is_published())
        .collect();
    for item in &mut items {
        item.resolve_media(media_base);
    }

    if items.len() < fetched {
        warn!(
            "{}: {} of {} records skipped (malformed or unpublished)",
            T::RESOURCE.path(),
            fetched - items.len(),
            fetched
        );
    }
    Ok(items)
}

pub async fn load_events(api: &dyn ContentApi, media_base: &str) -> LoadState<Event> {
    LoadState::from_result(
        Resource::Events,
        load_collection(api, &events_query(), media_base).await,
    )
}

pub async fn load_speakers(api: &dyn ContentApi, media_base: &str) -> LoadState<Speaker> {
    LoadState::from_result(
        Resource::Speakers,
        load_collection(api, &speakers_query(), media_base).await,
    )
}

pub async fn load_sponsors(api: &dyn ContentApi, media_base: &str) -> LoadState<Sponsor> {
    LoadState::from_result(
        Resource::Sponsors,
        load_collection(api, &sponsors_query(), media_base).await,
    )
}

pub async fn load_tickets(api: &dyn ContentApi, media_base: &str) -> LoadState<TicketCategory> {
    LoadState::from_result(
        Resource::TicketCategories,
        load_collection(api, &tickets_query(), media_base).await,
    )
}

/// Detail-page lookup. `Ok(None)` when no published record has that slug.
pub async fn load_by_slug<T: CmsRecord>(
    api: &dyn ContentApi,
    slug: &str,
    media_base: &str,
) -> Result<Option<T>, FetchError> {
    let query = ContentQuery::new()
        .filter_eq("Slug", slug)
        .populate_all()
        .limit(1);
    let items: Vec<T> = load_collection(api, &query, media_base).await?;
    Ok(items.into_iter().find(|item| item.slug() == Some(slug)))
}
