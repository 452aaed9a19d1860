use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::services::session::DialogueSession;

struct Entry {
    owner_id: String,
    session: Arc<Mutex<DialogueSession>>,
}

/// Live dialogue sessions keyed by id. Each session has its own lock; the
/// map lock is only held for lookups and membership changes.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, owner_id: &str, session: DialogueSession) -> Arc<Mutex<DialogueSession>> {
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(
            id,
            Entry { owner_id: owner_id.to_string(), session: handle.clone() },
        );
        handle
    }

    /// Looks up a session owned by `owner_id`. Sessions of other users are
    /// indistinguishable from missing ones.
    pub async fn get(&self, owner_id: &str, id: Uuid) -> Option<Arc<Mutex<DialogueSession>>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.session.clone())
    }

    pub async fn remove(&self, owner_id: &str, id: Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&id) {
            Some(entry) if entry.owner_id == owner_id => {
                sessions.remove(&id);
                true
            }
            _ => false,
        }
    }

    /// Drops every session owned by `owner_id` and returns how many went.
    pub async fn remove_owner(&self, owner_id: &str) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.owner_id != owner_id);
        before - sessions.len()
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
