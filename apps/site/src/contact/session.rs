//! One contact form's submission lifecycle.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──2xx──▶ Success ──(reset delay)──▶ Idle
//!                      │
//!                      └──non-2xx / transport──▶ Failed ──submit──▶ Submitting
//! ```
//!
//! Validation failures never leave the current state. Only one POST may be in
//! flight per session; success clears the fields, failure keeps them.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::cms_client::ContentApi;
use crate::contact::form::{ContactForm, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success,
    Failed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    InProgress,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

struct Inner {
    state: SubmissionState,
    fields: ContactForm,
    /// Bumped on every submission so a stale reset timer cannot clobber a newer state.
    generation: u64,
}

/// Cloneable handle to a single form's state.
#[derive(Clone)]
pub struct ContactSession {
    inner: Arc<Mutex<Inner>>,
    api: Arc<dyn ContentApi>,
    reset_after: Duration,
}

impl ContactSession {
    pub fn new(api: Arc<dyn ContentApi>, reset_after: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: SubmissionState::Idle,
                fields: ContactForm::default(),
                generation: 0,
            })),
            api,
            reset_after,
        }
    }

    pub fn state(&self) -> SubmissionState {
        lock(&self.inner).state.clone()
    }

    pub fn fields(&self) -> ContactForm {
        lock(&self.inner).fields.clone()
    }

    /// Edits the form in place, e.g. as the visitor types.
    pub fn update(&self, edit: impl FnOnce(&mut ContactForm)) {
        edit(&mut lock(&self.inner).fields);
    }

    /// Validates, sends exactly one POST and records the outcome.
    pub async fn submit(&self) -> Result<SubmissionState, SubmitError> {
        let (message, generation) = {
            let mut inner = lock(&self.inner);
            if inner.state == SubmissionState::Submitting {
                return Err(SubmitError::InProgress);
            }
            let message = inner.fields.validate()?;
            inner.state = SubmissionState::Submitting;
            inner.generation += 1;
            (message, inner.generation)
        };

        let outcome = self.api.create_message(&message).await;

        let mut inner = lock(&self.inner);
        match outcome {
            Ok(()) => {
                info!("Contact message from {} submitted", message.email);
                inner.fields = ContactForm::default();
                inner.state = SubmissionState::Success;
                self.schedule_reset(generation);
            }
            Err(e) => {
                warn!("Contact submission failed: {e}");
                inner.state = SubmissionState::Failed(e.user_message());
            }
        }
        Ok(inner.state.clone())
    }

    fn schedule_reset(&self, generation: u64) {
        let inner = Arc::clone(&self.inner);
        let delay = self.reset_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = lock(&inner);
            if inner.generation == generation && inner.state == SubmissionState::Success {
                inner.state = SubmissionState::Idle;
            }
        });
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms_client::fake::{FakeContent, GatedContent};

    const RESET: Duration = Duration::from_secs(5);

    fn fill(form: &mut ContactForm) {
        form.name = "Ada".to_string();
        form.email = "ada@example.org".to_string();
        form.subject = "Tickets".to_string();
        form.message = "Group discount?".to_string();
        form.inquiry_type = "tickets".to_string();
    }

    fn session(api: FakeContent) -> (ContactSession, Arc<FakeContent>) {
        let api = Arc::new(api);
        (ContactSession::new(api.clone(), RESET), api)
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_fields_then_returns_to_idle() {
        let (session, api) = session(FakeContent::new());
        session.update(fill);

        assert_eq!(session.submit().await, Ok(SubmissionState::Success));
        assert_eq!(session.fields(), ContactForm::default());
        assert_eq!(api.messages.lock().unwrap().len(), 1);

        tokio::time::sleep(RESET - Duration::from_secs(1)).await;
        assert_eq!(session.state(), SubmissionState::Success);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(session.state(), SubmissionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_fields() {
        let (session, _api) = session(FakeContent::new().submit_responses(&[500]));
        session.update(fill);
        let before = session.fields();

        let state = session.submit().await.unwrap();
        assert!(matches!(state, SubmissionState::Failed(_)));
        assert_eq!(session.fields(), before);

        tokio::time::sleep(RESET * 2).await;
        assert!(matches!(session.state(), SubmissionState::Failed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_failure_sends_again() {
        let (session, api) = session(FakeContent::new().submit_responses(&[500, 201]));
        session.update(fill);

        session.submit().await.unwrap();
        assert_eq!(session.submit().await, Ok(SubmissionState::Success));
        assert_eq!(api.messages.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_form_never_submits() {
        let (session, api) = session(FakeContent::new());
        session.update(|form| form.name = "Ada".to_string());

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(ValidationError::MissingFields(_))));
        assert_eq!(session.state(), SubmissionState::Idle);
        assert!(api.messages.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_does_not_reset_newer_success() {
        let (session, _api) = session(FakeContent::new());
        session.update(fill);
        session.submit().await.unwrap();

        tokio::time::sleep(Duration::from_secs(3)).await;
        session.update(fill);
        session.submit().await.unwrap();

        // First timer fires at 5s; the second submission's timer at 8s.
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(session.state(), SubmissionState::Success);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(session.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_second_submit_blocked_while_in_flight() {
        let api = Arc::new(GatedContent::new());
        let session = ContactSession::new(api.clone(), RESET);
        session.update(fill);

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.submit().await }
        });
        while session.state() != SubmissionState::Submitting {
            tokio::task::yield_now().await;
        }

        assert_eq!(session.submit().await, Err(SubmitError::InProgress));

        api.release();
        assert_eq!(first.await.unwrap(), Ok(SubmissionState::Success));
    }
}
