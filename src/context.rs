// ABOUTME: Dependency container wiring config, session, notices, and transport
// ABOUTME: Cloneable context passed to every engine constructor
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! # Client Context
//!
//! One explicit container owns the client-wide collaborators: configuration,
//! the session store, the notice bus, and the HTTP transport. Engines are
//! constructed from a context and hold cheap clones of what they need, so
//! two engines built from the same context always observe the same session.
//! There are no module-level globals anywhere in the crate.

use std::sync::Arc;

use crate::api::ApiTransport;
use crate::auth::AuthGateway;
use crate::config::ClientConfig;
use crate::notices::NoticeBus;
use crate::session::SessionStore;
use crate::tasks::{
    AssignmentDirectory, CallScheduler, ConversationEngine, NotificationFeed, ResponseEngine,
};

/// Shared dependency container for the client engines
#[derive(Debug, Clone)]
pub struct ClientContext {
    config: Arc<ClientConfig>,
    session: SessionStore,
    notices: NoticeBus,
    api: ApiTransport,
}

impl ClientContext {
    /// Build the context: hydrate the session from disk and wire the
    /// transport to it
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let session = SessionStore::hydrate(config.credentials_file());
        let notices = NoticeBus::default();
        let api = ApiTransport::new(&config, session.clone());
        Self {
            config: Arc::new(config),
            session,
            notices,
            api,
        }
    }

    /// Client configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session store holding the current credential
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Transient notice bus
    #[must_use]
    pub const fn notices(&self) -> &NoticeBus {
        &self.notices
    }

    /// Shared HTTP transport
    #[must_use]
    pub const fn api(&self) -> &ApiTransport {
        &self.api
    }

    // ========================================================================
    // Engine factories
    // ========================================================================

    /// Authentication gateway
    #[must_use]
    pub fn auth(&self) -> AuthGateway {
        AuthGateway::new(self)
    }

    /// Assignment directory (create, list, fetch)
    #[must_use]
    pub fn assignments(&self) -> AssignmentDirectory {
        AssignmentDirectory::new(self)
    }

    /// Assignment response engine (accept, reject, discuss)
    #[must_use]
    pub fn responses(&self) -> ResponseEngine {
        ResponseEngine::new(self)
    }

    /// Conversation engine (transcript, messages, completion)
    #[must_use]
    pub fn conversations(&self) -> ConversationEngine {
        ConversationEngine::new(self)
    }

    /// Call scheduling sub-engine
    #[must_use]
    pub fn calls(&self) -> CallScheduler {
        CallScheduler::new(self)
    }

    /// Notification feed readout
    #[must_use]
    pub fn notifications(&self) -> NotificationFeed {
        NotificationFeed::new(self)
    }
}
