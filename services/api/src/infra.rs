use loan_eligibility::config::{EligibilityConfig, DEFAULT_SESSION_CAPACITY};
use loan_eligibility::workflows::eligibility::{
    ArtifactHandle, EligibilityEngine, SessionId, SessionStore, SessionStoreError, WizardSession,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<EligibilityEngine>,
}

/// Live wizard sessions, capped so abandoned sessions cannot grow memory without limit.
/// At capacity, a new session evicts the one idle the longest.
#[derive(Clone)]
pub(crate) struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, WizardSession>>>,
    capacity: usize,
}

impl InMemorySessionStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))?;
        if guard.contains_key(&session.id) {
            return Err(SessionStoreError::Conflict);
        }
        while guard.len() >= self.capacity {
            let Some(idle) = guard
                .values()
                .min_by_key(|stored| stored.updated_at)
                .map(|stored| stored.id.clone())
            else {
                break;
            };
            guard.remove(&idle);
            debug!(session_id = %idle.0, "evicted idle session at capacity");
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: WizardSession) -> Result<(), SessionStoreError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))?;
        if guard.contains_key(&session.id) {
            guard.insert(session.id.clone(), session);
            Ok(())
        } else {
            Err(SessionStoreError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<WizardSession, SessionStoreError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))?;
        guard.remove(id).ok_or(SessionStoreError::NotFound)
    }
}

/// Load the artifact once and build the shared rule engine around it.
pub(crate) fn build_engine(config: &EligibilityConfig) -> Arc<EligibilityEngine> {
    let artifact = ArtifactHandle::load(&config.artifact_path);
    Arc::new(EligibilityEngine::new(artifact, config.engine_config()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn session(id: &str, idle_minutes: i64) -> WizardSession {
        let mut session = WizardSession::new(SessionId(id.to_string()));
        session.updated_at = Utc::now() - Duration::minutes(idle_minutes);
        session
    }

    #[test]
    fn full_store_evicts_the_longest_idle_session() {
        let store = InMemorySessionStore::with_capacity(2);
        store.insert(session("session-a", 30)).expect("insert a");
        store.insert(session("session-b", 60)).expect("insert b");

        store.insert(session("session-c", 0)).expect("insert c");

        let evicted = SessionId("session-b".to_string());
        assert_eq!(store.fetch(&evicted).expect("fetch"), None);
        assert!(store
            .fetch(&SessionId("session-a".to_string()))
            .expect("fetch")
            .is_some());
        assert!(store
            .fetch(&SessionId("session-c".to_string()))
            .expect("fetch")
            .is_some());
    }

    #[test]
    fn recent_activity_protects_a_session_from_eviction() {
        let store = InMemorySessionStore::with_capacity(2);
        store.insert(session("session-a", 60)).expect("insert a");
        store.insert(session("session-b", 30)).expect("insert b");
        store.update(session("session-a", 0)).expect("touch a");

        store.insert(session("session-c", 0)).expect("insert c");

        assert_eq!(
            store.fetch(&SessionId("session-b".to_string())).expect("fetch"),
            None
        );
        assert!(store
            .fetch(&SessionId("session-a".to_string()))
            .expect("fetch")
            .is_some());
    }

    #[test]
    fn duplicate_ids_conflict_without_evicting() {
        let store = InMemorySessionStore::with_capacity(1);
        store.insert(session("session-a", 0)).expect("insert a");

        let err = store
            .insert(session("session-a", 0))
            .expect_err("duplicate id");

        assert!(matches!(err, SessionStoreError::Conflict));
        assert!(store
            .fetch(&SessionId("session-a".to_string()))
            .expect("fetch")
            .is_some());
    }
}
