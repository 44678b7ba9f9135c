use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

/// Serialized prediction object shipped alongside the service.
///
/// The payload is kept opaque; the eligibility rules never read it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub path: PathBuf,
    pub payload: Value,
}

impl ModelArtifact {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactLoadError> {
        let path = path.as_ref().to_path_buf();
        let bytes = fs::read(&path).map_err(|source| ArtifactLoadError::Missing {
            path: path.clone(),
            source,
        })?;
        let payload = serde_json::from_slice(&bytes).map_err(|source| {
            ArtifactLoadError::Corrupt {
                path: path.clone(),
                source,
            }
        })?;

        Ok(Self { path, payload })
    }
}

/// Failure to deserialize the model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactLoadError {
    #[error("Error loading model: {} could not be read ({source})", .path.display())]
    Missing {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error loading model: {} is not a valid artifact ({source})", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Immutable result of the one-time artifact load, shared by every request.
#[derive(Debug, Clone)]
pub enum ArtifactHandle {
    Loaded(Arc<ModelArtifact>),
    Unavailable(Arc<ArtifactLoadError>),
}

impl ArtifactHandle {
    /// Load once at startup; a failure is logged and kept for later reporting.
    pub fn load(path: impl AsRef<Path>) -> Self {
        match ModelArtifact::load(path) {
            Ok(artifact) => {
                info!(path = %artifact.path.display(), "model artifact loaded");
                Self::Loaded(Arc::new(artifact))
            }
            Err(err) => {
                warn!(error = %err, "model artifact unavailable; rules continue without it");
                Self::Unavailable(Arc::new(err))
            }
        }
    }

    pub fn artifact(&self) -> Option<&ModelArtifact> {
        match self {
            Self::Loaded(artifact) => Some(artifact),
            Self::Unavailable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ArtifactLoadError> {
        match self {
            Self::Loaded(_) => None,
            Self::Unavailable(err) => Some(err),
        }
    }
}

impl From<ModelArtifact> for ArtifactHandle {
    fn from(artifact: ModelArtifact) -> Self {
        Self::Loaded(Arc::new(artifact))
    }
}

impl From<ArtifactLoadError> for ArtifactHandle {
    fn from(err: ArtifactLoadError) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
