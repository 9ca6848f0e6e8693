//! Process-wide registry of active debug sessions
//!
//! Explicitly constructed and handed to the tool handler rather than living
//! in a global. The outer RwLock serializes map mutation; each session's own
//! Mutex serializes its command traffic, so independent sessions debug in
//! parallel while one session never has two commands in flight.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::session::DebugSession;

/// Snapshot of one session for listing
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub session_id: String,
    pub target: String,
    pub running: bool,
    pub breakpoint_count: usize,
}

/// Keyed store of active debug sessions
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<DebugSession>>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under its id, returning the shared handle
    pub async fn insert(&self, session: DebugSession) -> Arc<Mutex<DebugSession>> {
        let id = session.session_id.clone();
        let handle = Arc::new(Mutex::new(session));
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, Arc::clone(&handle));
        handle
    }

    pub async fn get(&self, session_id: &str) -> Option<Arc<Mutex<DebugSession>>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Remove a session from the registry. The returned handle keeps the
    /// session alive long enough for the caller to terminate it.
    pub async fn remove(&self, session_id: &str) -> Option<Arc<Mutex<DebugSession>>> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }

    /// Stable snapshot of all sessions, no ordering guarantee
    pub async fn list(&self) -> Vec<SessionSummary> {
        let handles: Vec<Arc<Mutex<DebugSession>>> = {
            let sessions = self.sessions.read().await;
            sessions.values().cloned().collect()
        };

        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            let session = handle.lock().await;
            summaries.push(SessionSummary {
                session_id: session.session_id.clone(),
                target: session.target.clone(),
                running: session.running,
                breakpoint_count: session.breakpoints.len(),
            });
        }
        summaries
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
