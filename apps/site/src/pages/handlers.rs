//! Axum route handlers for the content pages.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::catalog::{
    categories_of, group_by_tier, ticket_cards, CatalogFilter, CategorySelection, EmptyState,
    Searchable, TicketCard,
};
use crate::errors::AppError;
use crate::models::{CmsRecord, Event, Speaker, Sponsor};
use crate::pages::{
    load_by_slug, load_events, load_home, load_speakers, load_sponsors, load_tickets, HomePage,
    LoadState,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `?category=Workshop&q=defi&featured=true`. Sponsors also accept `tier=`;
/// `category` wins when both are sent.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub category: Option<String>,
    pub tier: Option<String>,
    pub q: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub featured: Option<bool>,
}

impl From<FilterParams> for CatalogFilter {
    fn from(params: FilterParams) -> Self {
        let category = params.category.or(params.tier);
        CatalogFilter {
            category: CategorySelection::from_param(category.as_deref()),
            query: params.q.unwrap_or_default(),
            featured_only: params.featured.unwrap_or(false),
        }
    }
}

/// `featured=` with no value means "not set"; `1`/`on`/`yes` count as true.
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("featured must be true or false, got '{value}'"))),
        },
    }
}

#[derive(Debug, Serialize)]
pub struct ListPage<T> {
    pub state: LoadState<T>,
    pub filter: CatalogFilter,
    pub categories: Vec<String>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<EmptyState>,
    /// Same request again; set when the fetch failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<String>,
}

/// Applies `filter` to a loaded list. A failed load is passed through with a
/// retry link and a 502 status.
fn list_page<T: Searchable + Clone>(
    state: LoadState<T>,
    filter: CatalogFilter,
    retry_path: &str,
) -> (StatusCode, ListPage<T>) {
    match state {
        LoadState::Loaded { items } => {
            let outcome = filter.run(&items);
            (
                StatusCode::OK,
                ListPage {
                    categories: categories_of(&items),
                    total: outcome.total,
                    empty: outcome.empty,
                    state: LoadState::Loaded {
                        items: outcome.items,
                    },
                    filter,
                    retry: None,
                },
            )
        }
        other => (
            StatusCode::BAD_GATEWAY,
            ListPage {
                state: other,
                filter,
                categories: Vec::new(),
                total: 0,
                empty: None,
                retry: Some(retry_path.to_string()),
            },
        ),
    }
}

async fn detail<T: CmsRecord>(state: &AppState, slug: &str) -> Result<Json<T>, AppError> {
    load_by_slug::<T>(state.cms.as_ref(), slug, state.media_base())
        .await
        .map_err(|e| AppError::content(T::RESOURCE, e))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No {} with slug '{slug}'", T::RESOURCE.path())))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/home
pub async fn handle_home(State(state): State<AppState>) -> Json<HomePage> {
    Json(load_home(state.cms.as_ref(), state.media_base()).await)
}

/// GET /api/v1/events
pub async fn handle_events(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> (StatusCode, Json<ListPage<Event>>) {
    let loaded = load_events(state.cms.as_ref(), state.media_base()).await;
    let (status, page) = list_page(loaded, params.into(), "/api/v1/events");
    (status, Json(page))
}

/// GET /api/v1/events/:slug
pub async fn handle_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Event>, AppError> {
    detail(&state, &slug).await
}

/// GET /api/v1/speakers
pub async fn handle_speakers(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> (StatusCode, Json<ListPage<Speaker>>) {
    let loaded = load_speakers(state.cms.as_ref(), state.media_base()).await;
    let (status, page) = list_page(loaded, params.into(), "/api/v1/speakers");
    (status, Json(page))
}

/// GET /api/v1/speakers/:slug
pub async fn handle_speaker(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Speaker>, AppError> {
    detail(&state, &slug).await
}

/// GET /api/v1/sponsors
///
/// The filtered list plus the same sponsors grouped by tier for display.
pub async fn handle_sponsors(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> (StatusCode, Json<Value>) {
    let loaded = load_sponsors(state.cms.as_ref(), state.media_base()).await;
    let (status, page) = list_page(loaded, params.into(), "/api/v1/sponsors");

    let visible: Vec<&Sponsor> = page.state.items().map(|s| s.iter().collect()).unwrap_or_default();
    let tiers = group_by_tier(&visible);
    (status, Json(json!({ "page": page, "tiers": tiers })))
}

/// GET /api/v1/sponsors/:slug
pub async fn handle_sponsor(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Sponsor>, AppError> {
    detail(&state, &slug).await
}

/// GET /api/v1/tickets
pub async fn handle_tickets(State(state): State<AppState>) -> (StatusCode, Json<LoadState<TicketCard>>) {
    match load_tickets(state.cms.as_ref(), state.media_base()).await {
        LoadState::Loaded { items } => (
            StatusCode::OK,
            Json(LoadState::Loaded {
                items: ticket_cards(items, Utc::now()),
            }),
        ),
        LoadState::Failed { error } => (StatusCode::BAD_GATEWAY, Json(LoadState::Failed { error })),
        LoadState::Loading => (StatusCode::ACCEPTED, Json(LoadState::Loading)),
    }
}
