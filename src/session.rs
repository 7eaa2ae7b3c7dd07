// ABOUTME: Session store holding the current bearer credential and user identity
// ABOUTME: Wholesale replace on login/logout, observable via a watch channel, disk persisted
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! Current-session state shared by every engine.
//!
//! The store holds at most one credential. Login replaces it wholesale,
//! logout (or a 401 from any endpoint) clears it; there is no partial
//! update. Dependents either read the current value once at the start of an
//! operation or subscribe to observe replacement. The credential is
//! persisted to disk so a restarted client resumes its session.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdesk_core::models::UserProfile;
use tokio::sync::watch;
use tracing::{debug, warn};

/// An established sign-in: the bearer token plus the resolved identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent on every authenticated request
    pub token: String,
    /// Identity the server resolved at login
    pub user: UserProfile,
    /// When the session was established
    pub established_at: DateTime<Utc>,
}

/// Shared store for the current session.
///
/// Cheap to clone; all clones observe the same state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    current: watch::Sender<Option<Arc<Session>>>,
    path: PathBuf,
}

impl SessionStore {
    /// Empty store persisting to `path`
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let (current, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(Inner { current, path }),
        }
    }

    /// Store hydrated from the credential file when one is present and valid
    #[must_use]
    pub fn hydrate(path: PathBuf) -> Self {
        let store = Self::new(path);
        if let Some(session) = load_session(&store.inner.path) {
            debug!(user.id = session.user.id, "session restored from disk");
            store
                .inner
                .current
                .send_replace(Some(Arc::new(session)));
        }
        store
    }

    /// Snapshot of the current session, if one is established
    #[must_use]
    pub fn current(&self) -> Option<Arc<Session>> {
        self.inner.current.borrow().clone()
    }

    /// Identity of the signed-in user, if any
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.current().map(|s| s.user.clone())
    }

    /// Whether a session is currently established
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    /// Observe session replacement; the receiver sees the value at
    /// subscription time plus every later replace
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Session>>> {
        self.inner.current.subscribe()
    }

    /// Replace the session wholesale and persist it.
    ///
    /// Persistence failures degrade to an in-memory session and are logged;
    /// the sign-in itself has already happened server-side.
    pub fn establish(&self, session: Session) {
        if let Err(e) = persist_session(&self.inner.path, &session) {
            warn!(
                path = %self.inner.path.display(),
                error = %e,
                "failed to persist session credential"
            );
        }
        self.inner.current.send_replace(Some(Arc::new(session)));
    }

    /// Drop the session and remove the persisted credential
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.inner.path) {
            if e.kind() != ErrorKind::NotFound {
                warn!(
                    path = %self.inner.path.display(),
                    error = %e,
                    "failed to remove persisted credential"
                );
            }
        }
        self.inner.current.send_replace(None);
    }
}

fn load_session(path: &Path) -> Option<Session> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "failed to read credential file");
            }
            return None;
        }
    };
    match serde_json::from_slice(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed credential file");
            None
        }
    }
}

fn persist_session(path: &Path, session: &Session) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_vec_pretty(session).map_err(std::io::Error::other)?;
    fs::write(path, raw)
}
