//! In-memory `ContentApi` for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use super::{ContentApi, ContentQuery, FetchError, Resource, SubmissionError};
use crate::models::ContactMessage;

/// Body text carried by every `failing` collection, as a proxy error page would.
pub const UPSTREAM_ERROR_BODY: &str = "<html><h1>Internal Server Error</h1><pre>at db.query</pre></html>";

#[derive(Default)]
pub struct FakeContent {
    collections: HashMap<&'static str, Result<Vec<Value>, u16>>,
    /// Statuses returned by successive `create_message` calls; empty means 201.
    submit_statuses: Mutex<VecDeque<u16>>,
    pub queries: Mutex<Vec<(Resource, String)>>,
    pub messages: Mutex<Vec<ContactMessage>>,
}

impl FakeContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource: Resource, records: Vec<Value>) -> Self {
        self.collections.insert(resource.path(), Ok(records));
        self
    }

    pub fn failing(mut self, resource: Resource, status: u16) -> Self {
        self.collections.insert(resource.path(), Err(status));
        self
    }

    pub fn submit_responses(self, statuses: &[u16]) -> Self {
        *self.submit_statuses.lock().unwrap() = statuses.iter().copied().collect();
        self
    }

    pub fn fetch_count(&self, resource: Resource) -> usize {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, _)| *r == resource)
            .count()
    }
}

#[async_trait]
impl ContentApi for FakeContent {
    async fn fetch(
        &self,
        resource: Resource,
        query: &ContentQuery,
    ) -> Result<Vec<Value>, FetchError> {
        self.queries
            .lock()
            .unwrap()
            .push((resource, query.to_query_string()));
        match self.collections.get(resource.path()) {
            Some(Ok(records)) => Ok(records.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                status: *status,
                message: UPSTREAM_ERROR_BODY.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn create_message(&self, message: &ContactMessage) -> Result<(), SubmissionError> {
        let status = self.submit_statuses.lock().unwrap().pop_front().unwrap_or(201);
        self.messages.lock().unwrap().push(message.clone());
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(SubmissionError::Rejected {
                status,
                message: super::GENERIC_SUBMISSION_FAILURE.to_string(),
            })
        }
    }
}

/// Holds every `create_message` until `release` is called; reads are empty.
#[derive(Default)]
pub struct GatedContent {
    gate: Notify,
}

impl GatedContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ContentApi for GatedContent {
    async fn fetch(
        &self,
        _resource: Resource,
        _query: &ContentQuery,
    ) -> Result<Vec<Value>, FetchError> {
        Ok(Vec::new())
    }

    async fn create_message(&self, _message: &ContactMessage) -> Result<(), SubmissionError> {
        self.gate.notified().await;
        Ok(())
    }
}
