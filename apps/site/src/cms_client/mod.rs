/// CMS Client: the single point of entry for all content API calls.
///
/// Reads are plain GETs against a collection with bracketed query
/// parameters; the only write is creating a contact message. Nothing here
/// retries or caches: every page load re-fetches and a retry is a new call.
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::ContactMessage;

#[cfg(test)]
pub mod fake;
pub mod query;

pub use query::{ContentQuery, Direction, Resource};

/// Shown when the content API rejects a message without saying why.
pub const GENERIC_SUBMISSION_FAILURE: &str = "Failed to send message. Please try again.";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Content API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Content API response has no data array")]
    MissingData,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl SubmissionError {
    /// Text safe to show next to the form.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Rejected { message, .. } => message.clone(),
            SubmissionError::Transport(_) => GENERIC_SUBMISSION_FAILURE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CmsErrorEnvelope {
    error: CmsErrorBody,
}

#[derive(Debug, Deserialize)]
struct CmsErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct CreateEnvelope<'a, T> {
    data: &'a T,
}

/// Pulls the nested `error.message` out of a content API error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<CmsErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
        .filter(|m| !m.trim().is_empty())
}

/// The read/write surface the site needs from the content system.
///
/// Carried in `AppState` as `Arc<dyn ContentApi>`; `CmsClient` is the
/// production backend.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Returns the raw records of `{ data: [...] }`.
    async fn fetch(&self, resource: Resource, query: &ContentQuery)
        -> Result<Vec<Value>, FetchError>;

    async fn create_message(&self, message: &ContactMessage) -> Result<(), SubmissionError>;
}

/// HTTP backend for `ContentApi`.
#[derive(Clone)]
pub struct CmsClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl CmsClient {
    pub fn new(base_url: &str, api_token: Option<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    fn endpoint(&self, resource: Resource) -> String {
        format!("{}/api/{}", self.base_url, resource.path())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ContentApi for CmsClient {
    async fn fetch(
        &self,
        resource: Resource,
        query: &ContentQuery,
    ) -> Result<Vec<Value>, FetchError> {
        debug!("GET /{}?{}", resource.path(), query.to_query_string());

        let response = self
            .authorize(self.client.get(self.endpoint(resource)))
            .query(&query.to_pairs())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Content API returned {} for /{}", status, resource.path());
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or(body),
            });
        }

        let mut payload: Value = serde_json::from_str(&body)?;
        match payload.get_mut("data").map(Value::take) {
            Some(Value::Array(records)) => {
                debug!("Fetched {} {} records", records.len(), resource.path());
                Ok(records)
            }
            _ => Err(FetchError::MissingData),
        }
    }

    async fn create_message(&self, message: &ContactMessage) -> Result<(), SubmissionError> {
        let response = self
            .authorize(self.client.post(self.endpoint(Resource::Messages)))
            .json(&CreateEnvelope { data: message })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Contact message accepted ({})", status);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Content API rejected contact message: {} {}", status, body);
        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| GENERIC_SUBMISSION_FAILURE.to_string()),
        })
    }
}

/// Decodes each record on its own; records that do not fit `T` are skipped
/// so one malformed entry cannot blank a whole page.
pub fn decode_records<T: DeserializeOwned>(records: Vec<Value>) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value::<T>(record) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    warn!("Skipping malformed record id={}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use crate::models::{Event, InquiryType};

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn spawn_cms(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.org".to_string(),
            subject: "Hello".to_string(),
            message: "Question about tickets".to_string(),
            inquiry_type: InquiryType::Tickets,
            phone: None,
            organization: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_sends_bracketed_query() {
        let router = Router::new().route(
            "/api/events",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({ "data": [params] }))
            }),
        );
        let base = spawn_cms(router).await;
        let client = CmsClient::new(&base, None).unwrap();

        let query = ContentQuery::new()
            .filter_eq("Slug", "opening-ceremony")
            .populate_all()
            .sort("StartDate", Direction::Asc)
            .limit(3);
        let records = client.fetch(Resource::Events, &query).await.unwrap();

        assert_eq!(records.len(), 1);
        let echoed = &records[0];
        assert_eq!(echoed["filters[Slug][$eq]"], "opening-ceremony");
        assert_eq!(echoed["populate"], "*");
        assert_eq!(echoed["sort[0]"], "StartDate:asc");
        assert_eq!(echoed["pagination[limit]"], "3");
    }

    #[tokio::test]
    async fn test_fetch_attaches_bearer_token() {
        let router = Router::new().route(
            "/api/speakers",
            get(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some("Bearer secret-token") => (StatusCode::OK, Json(json!({ "data": [] }))),
                    _ => (StatusCode::UNAUTHORIZED, Json(json!({}))),
                }
            }),
        );
        let base = spawn_cms(router).await;
        let client = CmsClient::new(&base, Some("secret-token".to_string())).unwrap();

        let records = client
            .fetch(Resource::Speakers, &ContentQuery::new())
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_surfaces_status_and_message() {
        let router = Router::new().route(
            "/api/sponsors",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "data": null, "error": { "status": 403, "message": "Forbidden" } })),
                )
            }),
        );
        let base = spawn_cms(router).await;
        let client = CmsClient::new(&base, None).unwrap();

        let err = client
            .fetch(Resource::Sponsors, &ContentQuery::new())
            .await
            .unwrap_err();
        match err {
            FetchError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_without_data_array_fails() {
        let router = Router::new().route(
            "/api/ticket-categories",
            get(|| async { Json(json!({ "meta": {} })) }),
        );
        let base = spawn_cms(router).await;
        let client = CmsClient::new(&base, None).unwrap();

        let err = client
            .fetch(Resource::TicketCategories, &ContentQuery::new())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingData));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CmsClient::new(&format!("http://{addr}"), None).unwrap();
        let err = client
            .fetch(Resource::Events, &ContentQuery::new())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_create_message_posts_data_envelope() {
        let received: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let router = Router::new()
            .route(
                "/api/messages",
                post(
                    |State(slot): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                        *slot.lock().unwrap() = Some(body);
                        (StatusCode::CREATED, Json(json!({ "data": { "id": 1 } })))
                    },
                ),
            )
            .with_state(received.clone());
        let base = spawn_cms(router).await;
        let client = CmsClient::new(&base, None).unwrap();

        client.create_message(&message()).await.unwrap();

        let body = received.lock().unwrap().clone().unwrap();
        assert_eq!(body["data"]["name"], "Ada");
        assert_eq!(body["data"]["inquiryType"], "tickets");
        assert!(body["data"].get("phone").is_none());
    }

    #[tokio::test]
    async fn test_create_message_rejection_uses_nested_message() {
        let router = Router::new().route(
            "/api/messages",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": { "message": "email must be a valid email" } })),
                )
            }),
        );
        let base = spawn_cms(router).await;
        let client = CmsClient::new(&base, None).unwrap();

        let err = client.create_message(&message()).await.unwrap_err();
        assert_eq!(err.user_message(), "email must be a valid email");
    }

    #[tokio::test]
    async fn test_create_message_rejection_without_body_uses_fallback() {
        let router = Router::new().route(
            "/api/messages",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_cms(router).await;
        let client = CmsClient::new(&base, None).unwrap();

        let err = client.create_message(&message()).await.unwrap_err();
        match &err {
            SubmissionError::Rejected { status, .. } => assert_eq!(*status, 500),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(err.user_message(), GENERIC_SUBMISSION_FAILURE);
    }

    #[test]
    fn test_decode_records_skips_malformed() {
        let records = vec![
            json!({ "id": 1, "Title": "Opening Ceremony", "Slug": "opening-ceremony" }),
            json!({ "id": 2, "Slug": "no-title" }),
            json!({ "id": 3, "Title": "DeFi Workshop", "Slug": "defi-workshop", "Image": null }),
        ];
        let events: Vec<Event> = decode_records(records);
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Opening Ceremony", "DeFi Workshop"]);
    }
}
