// ABOUTME: Sign-in gateway feeding the session store
// ABOUTME: Login, logout, and profile refresh against the console auth endpoints
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! # Authentication Gateway
//!
//! The three calls that bootstrap everything else: `login` establishes the
//! session the other engines read their bearer credential from, `logout`
//! discards it, and `profile` re-resolves the identity attached to it.
//! Sign-in state itself lives in [`SessionStore`]; this gateway is the only
//! writer apart from the transport's expiry teardown.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use taskdesk_core::errors::{ApiError, ApiResult};
use taskdesk_core::models::UserProfile;
use tracing::info;

use crate::api::ApiTransport;
use crate::context::ClientContext;
use crate::notices::NoticeBus;
use crate::session::{Session, SessionStore};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    user: UserProfile,
}

/// Gateway for the console auth endpoints
#[derive(Debug, Clone)]
pub struct AuthGateway {
    api: ApiTransport,
    session: SessionStore,
    notices: NoticeBus,
}

impl AuthGateway {
    /// Gateway wired to the context's transport, session store, and notice bus
    #[must_use]
    pub fn new(ctx: &ClientContext) -> Self {
        Self {
            api: ctx.api().clone(),
            session: ctx.session().clone(),
            notices: ctx.notices().clone(),
        }
    }

    /// Sign in and establish a session.
    ///
    /// On success the credential is persisted and every engine immediately
    /// operates as the returned user.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<UserProfile> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::validation("Email and password are required"));
        }

        let response: LoginResponse = self
            .api
            .post_public("/auth/login", &LoginRequest { email, password })
            .await?;

        info!(user.id = response.user.id, "signed in");
        self.session.establish(Session {
            token: response.access_token,
            user: response.user.clone(),
            established_at: Utc::now(),
        });
        self.notices
            .success(format!("Signed in as {}", response.user.label()));
        Ok(response.user)
    }

    /// Discard the session and its persisted credential.
    ///
    /// Purely client-side: the server keeps no revocation list, so the
    /// token simply stops being sent.
    pub fn logout(&self) {
        if let Some(user) = self.session.user() {
            info!(user.id = user.id, "signed out");
        }
        self.session.clear();
        self.notices.info("Signed out");
    }

    /// Re-resolve the signed-in user's profile.
    ///
    /// Refreshes the session store's copy when the server reports a
    /// changed display name or email.
    pub async fn profile(&self) -> ApiResult<UserProfile> {
        let user: UserProfile = self.api.get("/auth/me").await?;
        if let Some(current) = self.session.current() {
            if current.user != user {
                self.session.establish(Session {
                    token: current.token.clone(),
                    user: user.clone(),
                    established_at: current.established_at,
                });
            }
        }
        Ok(user)
    }
}
