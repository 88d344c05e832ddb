//! Open contact forms, one `ContactSession` each, keyed by a random id.
//!
//! A visitor opens a session, submits into it (as often as failures require)
//! and polls it to see the success notice fall back to idle. Sessions nobody
//! has touched for `SESSION_IDLE_TTL` are dropped the next time one opens.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::cms_client::ContentApi;
use crate::contact::session::{ContactSession, SubmissionState};

pub const SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

struct Entry {
    session: ContactSession,
    last_used: Instant,
}

#[derive(Clone)]
pub struct ContactDesk {
    sessions: Arc<Mutex<HashMap<Uuid, Entry>>>,
    api: Arc<dyn ContentApi>,
    reset_after: Duration,
    idle_ttl: Duration,
}

impl ContactDesk {
    pub fn new(api: Arc<dyn ContentApi>, reset_after: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            api,
            reset_after,
            idle_ttl: SESSION_IDLE_TTL,
        }
    }

    pub fn reset_after(&self) -> Duration {
        self.reset_after
    }

    pub fn open(&self) -> (Uuid, ContactSession) {
        let now = Instant::now();
        let mut sessions = lock(&self.sessions);

        let before = sessions.len();
        // An in-flight POST keeps its session alive whatever its age.
        sessions.retain(|_, entry| {
            now.duration_since(entry.last_used) < self.idle_ttl
                || entry.session.state() == SubmissionState::Submitting
        });
        if sessions.len() < before {
            debug!("Dropped {} idle contact sessions", before - sessions.len());
        }

        let id = Uuid::new_v4();
        let session = ContactSession::new(Arc::clone(&self.api), self.reset_after);
        sessions.insert(
            id,
            Entry {
                session: session.clone(),
                last_used: now,
            },
        );
        (id, session)
    }

    /// Looks a session up and marks it as used.
    pub fn get(&self, id: &Uuid) -> Option<ContactSession> {
        let mut sessions = lock(&self.sessions);
        let entry = sessions.get_mut(id)?;
        entry.last_used = Instant::now();
        Some(entry.session.clone())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        lock(&self.sessions).len()
    }
}

fn lock(sessions: &Mutex<HashMap<Uuid, Entry>>) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
    sessions.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms_client::fake::FakeContent;

    fn desk() -> ContactDesk {
        ContactDesk::new(Arc::new(FakeContent::new()), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_open_sessions_are_independent() {
        let desk = desk();
        let (first, a) = desk.open();
        let (second, _) = desk.open();
        assert_ne!(first, second);

        a.update(|form| form.name = "Ada".to_string());
        assert_eq!(desk.get(&first).unwrap().fields().name, "Ada");
        assert_eq!(desk.get(&second).unwrap().fields().name, "");
        assert!(desk.get(&Uuid::new_v4()).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_dropped_on_next_open() {
        let desk = desk();
        let (stale, _) = desk.open();
        let (kept, _) = desk.open();

        tokio::time::sleep(SESSION_IDLE_TTL - Duration::from_secs(60)).await;
        assert!(desk.get(&kept).is_some());
        tokio::time::sleep(Duration::from_secs(120)).await;

        desk.open();
        assert!(desk.get(&stale).is_none());
        assert!(desk.get(&kept).is_some());
        assert_eq!(desk.len(), 2);
    }
}
