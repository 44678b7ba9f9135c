use super::session::{SessionId, WizardSession};

/// Storage abstraction so the service can be exercised without a live server.
pub trait SessionStore: Send + Sync {
    fn insert(&self, session: WizardSession) -> Result<WizardSession, SessionStoreError>;
    fn update(&self, session: WizardSession) -> Result<(), SessionStoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError>;
    fn remove(&self, id: &SessionId) -> Result<WizardSession, SessionStoreError>;
}

/// Error enumeration for session storage failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
