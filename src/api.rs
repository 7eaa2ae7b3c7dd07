// ABOUTME: Shared HTTP transport for the console API with bearer injection
// ABOUTME: Classifies non-2xx responses into the error taxonomy and handles expiry teardown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! JSON/HTTP transport shared by every engine.
//!
//! One pooled `reqwest` client serves all operations. The bearer credential
//! is read from the session store exactly once per request, at the start;
//! a 401 on an authenticated request means the server rejected that
//! credential, so the transport clears the session store before surfacing
//! `Auth { expired: true }` to the caller.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, ClientBuilder, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use taskdesk_core::constants::service;
use taskdesk_core::errors::{ApiError, ApiResult};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::session::SessionStore;

/// Shared transport for console API calls
#[derive(Debug, Clone)]
pub struct ApiTransport {
    http: Client,
    base: String,
    session: SessionStore,
}

impl ApiTransport {
    /// Transport over a pooled client configured from `config`
    #[must_use]
    pub fn new(config: &ClientConfig, session: SessionStore) -> Self {
        let http = ClientBuilder::new()
            .timeout(config.http_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!(
                "{}/{}",
                service::SERVICE_NAME,
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base: config.api_url.as_str().trim_end_matches('/').to_owned(),
            session,
        }
    }

    /// Authenticated GET returning a decoded JSON body
    pub async fn get<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .send_request::<()>(Method::GET, path, &[], None, true)
            .await?;
        decode(response).await
    }

    /// Authenticated GET with query parameters
    pub async fn get_with_query<T>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .send_request::<()>(Method::GET, path, query, None, true)
            .await?;
        decode(response).await
    }

    /// Authenticated POST with a JSON body, returning a decoded JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send_request(Method::POST, path, &[], Some(body), true)
            .await?;
        decode(response).await
    }

    /// Unauthenticated POST, used only for sign-in
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send_request(Method::POST, path, &[], Some(body), false)
            .await?;
        decode(response).await
    }

    /// Authenticated PUT for endpoints that answer with no body (204)
    pub async fn put_empty(&self, path: &str) -> ApiResult<()> {
        self.send_request::<()>(Method::PUT, path, &[], None, true)
            .await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    async fn send_request<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        authenticated: bool,
    ) -> ApiResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let request_id = Uuid::new_v4();
        let url = self.endpoint(path);

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if authenticated {
            // Read the credential once; the operation sees one consistent value
            let session = self
                .session
                .current()
                .ok_or_else(|| ApiError::auth("Not signed in"))?;
            request = request.header(AUTHORIZATION, format!("Bearer {}", session.token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(
            request.id = %request_id,
            http.method = %method,
            http.path = path,
            "console API request"
        );

        let response = request.send().await.map_err(|e| {
            let detail = if e.is_timeout() {
                format!("Request to {path} timed out")
            } else if e.is_connect() {
                "Failed to connect to the console API".to_owned()
            } else {
                format!("Request to {path} failed")
            };
            ApiError::transport_from(detail, e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(
                request.id = %request_id,
                http.status = status.as_u16(),
                "console API response"
            );
            return Ok(response);
        }

        let body_bytes = response.bytes().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &body_bytes);
        if authenticated && err.requires_logout() {
            warn!(
                request.id = %request_id,
                "credential rejected by the server, signing out"
            );
            self.session.clear();
        }
        debug!(
            request.id = %request_id,
            http.status = status.as_u16(),
            error = %err,
            "console API error"
        );
        Err(err)
    }
}

async fn decode<T>(response: Response) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    response
        .json()
        .await
        .map_err(|e| ApiError::transport_from("Failed to decode console API response", e))
}
