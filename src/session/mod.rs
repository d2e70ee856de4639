//! Session Store
//!
//! Holds the client-side session token and user id. One store is built at
//! startup and shared (`Arc<SessionStore>`) with everything that needs it.
//! Every mutation is written through to the configured backend so the
//! session survives restarts. Concurrent writers are not arbitrated: the
//! last write wins.

mod backend;

pub use backend::{FileBackend, MemoryBackend, SessionBackend};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::fallback::OFFLINE_TOKEN;

/// Persisted session state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Errors persisting the session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

pub struct SessionStore {
    state: RwLock<Session>,
    backend: Box<dyn SessionBackend>,
}

impl SessionStore {
    /// Open a store, restoring whatever the backend persisted
    pub async fn open(backend: impl SessionBackend + 'static) -> SessionResult<Self> {
        let restored = match backend.load().await {
            Ok(restored) => restored,
            Err(SessionError::Serialization(e)) => {
                tracing::warn!(
                    "Unreadable session at {} ({}), starting signed out",
                    backend.describe(),
                    e
                );
                None
            }
            Err(e) => return Err(e),
        };
        match &restored {
            Some(session) if session.token.is_some() => {
                tracing::info!("Restored session from {}", backend.describe());
            }
            _ => tracing::debug!("No session stored at {}", backend.describe()),
        }

        Ok(Self {
            state: RwLock::new(restored.unwrap_or_default()),
            backend: Box::new(backend),
        })
    }

    /// Store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(Session::default()),
            backend: Box::new(MemoryBackend::new()),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn user_id(&self) -> Option<String> {
        self.state.read().await.user_id.clone()
    }

    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    /// Any token, offline or real, counts for route access
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    /// Whether the session was entered without a reachable backend
    pub async fn is_offline(&self) -> bool {
        self.state.read().await.token.as_deref() == Some(OFFLINE_TOKEN)
    }

    pub async fn set_token(&self, token: impl Into<String>) -> SessionResult<()> {
        let token = token.into();
        self.update(|s| s.token = Some(token)).await
    }

    pub async fn set_user_id(&self, user_id: impl Into<String>) -> SessionResult<()> {
        let user_id = user_id.into();
        self.update(|s| s.user_id = Some(user_id)).await
    }

    /// Store token and user id with a single write
    pub async fn sign_in(&self, token: impl Into<String>, user_id: impl Into<String>) -> SessionResult<()> {
        let token = token.into();
        let user_id = user_id.into();
        self.update(|s| {
            s.token = Some(token);
            s.user_id = Some(user_id);
        })
        .await
    }

    /// Forget token and user id
    pub async fn clear(&self) -> SessionResult<()> {
        self.update(|s| {
            s.token = None;
            s.user_id = None;
        })
        .await
    }

    async fn update<F: FnOnce(&mut Session)>(&self, f: F) -> SessionResult<()> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        f(&mut next);
        next.updated_at = Some(Utc::now());

        // Memory only changes once the backend holds the new state
        self.backend.save(&next).await?;
        *state = next;
        Ok(())
    }
}
