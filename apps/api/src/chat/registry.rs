use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use tracing::debug;
use uuid::Uuid;

use crate::chat::session::{ChatSession, SessionSettings, SessionSnapshot};

/// In-memory chat sessions, keyed by id. Lives as long as the process.
///
/// The lock is only ever held for synchronous session updates, never across an await.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, ChatSession>>>,
    settings: Arc<SessionSettings>,
}

impl SessionRegistry {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            sessions: Arc::default(),
            settings: Arc::new(settings),
        }
    }

    pub fn create(&self) -> SessionSnapshot {
        let mut session = ChatSession::new(&self.settings);
        let id = session.id();
        let snapshot = session.snapshot(Instant::now());
        debug!("Created chat session {id}");
        self.lock().insert(id, session);
        snapshot
    }

    /// Runs `f` against the session, or returns `None` if it does not exist.
    pub fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut ChatSession) -> R) -> Option<R> {
        self.lock().get_mut(&id).map(f)
    }

    // Every session mutation is one synchronous step, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, ChatSession>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}
