use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::contact::form::ContactForm;
use crate::contact::session::{ContactSession, SubmissionState, SubmitError};
use crate::errors::AppError;
use crate::state::AppState;

/// Every submit response names its session here, errors included, so the
/// page can retry into the same form.
pub const SESSION_HEADER: &str = "x-contact-session";

const SENT_NOTICE: &str = "Thank you! Your message has been sent.";

#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub state: SubmissionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    /// How long the success notice stays before the session returns to idle.
    pub reset_after_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct ContactStatus {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub state: SubmissionState,
    pub fields: ContactForm,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/contact
///
/// Opens a session and submits the form into it in one step.
pub async fn handle_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> impl IntoResponse {
    let (id, session) = state.contact.open();
    let outcome = submit(&state, id, &session, form).await;
    ([(SESSION_HEADER, id.to_string())], outcome)
}

/// POST /api/v1/contact/sessions
pub async fn handle_open_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ContactStatus>) {
    let (id, session) = state.contact.open();
    (StatusCode::CREATED, Json(status_of(id, &session)))
}

/// GET /api/v1/contact/sessions/:id
pub async fn handle_session_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactStatus>, AppError> {
    let session = find(&state, id)?;
    Ok(Json(status_of(id, &session)))
}

/// POST /api/v1/contact/sessions/:id/submit
///
/// Replaces the session's fields with the body and submits. A failed send
/// keeps the fields so the same session can be submitted again.
pub async fn handle_session_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<ContactForm>,
) -> Result<impl IntoResponse, AppError> {
    let session = find(&state, id)?;
    let outcome = submit(&state, id, &session, form).await;
    Ok(([(SESSION_HEADER, id.to_string())], outcome))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn submit(
    state: &AppState,
    id: Uuid,
    session: &ContactSession,
    form: ContactForm,
) -> Result<(StatusCode, Json<ContactReceipt>), AppError> {
    session.update(|fields| *fields = form);

    let submitted = session.submit().await.map_err(|e| match e {
        SubmitError::InProgress => AppError::Conflict(SubmitError::InProgress.to_string()),
        SubmitError::Invalid(invalid) => AppError::Validation(invalid.to_string()),
    })?;

    let (status, message) = match &submitted {
        SubmissionState::Failed(reason) => return Err(AppError::Submission(reason.clone())),
        SubmissionState::Success => (StatusCode::CREATED, Some(SENT_NOTICE)),
        _ => (StatusCode::ACCEPTED, None),
    };
    tracing::info!("Contact session {id}: {status}");

    Ok((
        status,
        Json(ContactReceipt {
            session_id: id,
            state: submitted,
            message,
            reset_after_secs: state.contact.reset_after().as_secs(),
        }),
    ))
}

fn find(state: &AppState, id: Uuid) -> Result<ContactSession, AppError> {
    state
        .contact
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("No contact session {id}")))
}

fn status_of(id: Uuid, session: &ContactSession) -> ContactStatus {
    ContactStatus {
        session_id: id,
        state: session.state(),
        fields: session.fields(),
    }
}
