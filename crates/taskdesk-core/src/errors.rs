// ABOUTME: Error taxonomy for the TaskDesk client engine
// ABOUTME: Classifies HTTP responses and client-side guards into five stable classes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

//! Unified client error handling.
//!
//! Every fallible engine operation returns [`ApiResult`]. The five [`ApiError`]
//! classes are the complete vocabulary callers dispatch on; the `detail` string
//! inside each class is the server's (or guard's) human-readable message and is
//! surfaced to the user verbatim.
//!
//! Classification of a non-2xx response:
//!
//! | Status    | Variant                          |
//! |-----------|----------------------------------|
//! | 400, 422  | `Validation`                     |
//! | 401       | `Auth { expired: true }`         |
//! | 403       | `Auth { expired: false }`        |
//! | 404       | `NotFound`                       |
//! | 409       | `InvalidState`                   |
//! | other     | `Transport`                      |
//!
//! The response body is expected to be JSON with a `detail` field; when it is
//! not, the message falls back to `HTTP <status>`. That fallback is the one
//! sanctioned silent swallow in the crate.

use std::error::Error;

use serde::Deserialize;

/// Result alias used by every engine operation
pub type ApiResult<T> = Result<T, ApiError>;

/// Wire shape of a non-2xx response body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Client error taxonomy for console API operations
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing input, rejected by a client-side guard or by the
    /// server with 400/422. Retrying the identical call cannot succeed.
    #[error("{detail}")]
    Validation {
        /// Human-readable reason, surfaced verbatim
        detail: String,
    },

    /// Missing, expired, or insufficient credential
    #[error("{detail}")]
    Auth {
        /// Human-readable reason, surfaced verbatim
        detail: String,
        /// `true` when the credential itself is gone (HTTP 401, triggers
        /// session teardown); `false` for a permission refusal (HTTP 403
        /// or a client-side caller guard)
        expired: bool,
    },

    /// Operation is illegal in the record's current lifecycle state, caught
    /// by a client-side guard or by the server with 409
    #[error("{detail}")]
    InvalidState {
        /// Human-readable reason, surfaced verbatim
        detail: String,
    },

    /// Record absent or not visible to the caller (HTTP 404)
    #[error("{detail}")]
    NotFound {
        /// Human-readable reason, surfaced verbatim
        detail: String,
    },

    /// Connection, timeout, or body-decode failure, plus any status the
    /// table above does not classify. The only class worth retrying.
    #[error("{detail}")]
    Transport {
        /// Human-readable description of the failure
        detail: String,
        /// Underlying I/O or decode error when one exists
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
}

impl ApiError {
    /// Validation failure from a client-side guard
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    /// Permission failure that leaves the session intact
    pub fn auth(detail: impl Into<String>) -> Self {
        Self::Auth {
            detail: detail.into(),
            expired: false,
        }
    }

    /// Credential-gone failure; the session store tears down on this
    pub fn session_expired(detail: impl Into<String>) -> Self {
        Self::Auth {
            detail: detail.into(),
            expired: true,
        }
    }

    /// Lifecycle-state failure from a client-side guard
    pub fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState {
            detail: detail.into(),
        }
    }

    /// Missing-record failure
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    /// Transport failure with no underlying error to chain
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
            source: None,
        }
    }

    /// Transport failure wrapping the underlying error
    pub fn transport_from(
        detail: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            detail: detail.into(),
            source: Some(source.into()),
        }
    }

    /// Classify a non-2xx response into the taxonomy.
    ///
    /// Decodes the JSON `detail` body; non-JSON bodies (HTML error pages,
    /// empty bodies, proxies) fall back to `HTTP <status>` as the message.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .map_or_else(|_| format!("HTTP {status}"), |b| b.detail);
        match status {
            400 | 422 => Self::Validation { detail },
            401 => Self::Auth {
                detail,
                expired: true,
            },
            403 => Self::Auth {
                detail,
                expired: false,
            },
            404 => Self::NotFound { detail },
            409 => Self::InvalidState { detail },
            _ => Self::Transport {
                detail,
                source: None,
            },
        }
    }

    /// The human-readable message surfaced to the user
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Validation { detail }
            | Self::Auth { detail, .. }
            | Self::InvalidState { detail }
            | Self::NotFound { detail }
            | Self::Transport { detail, .. } => detail,
        }
    }

    /// Whether retrying the identical call can possibly succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Whether this failure invalidates the current session
    #[must_use]
    pub const fn requires_logout(&self) -> bool {
        matches!(self, Self::Auth { expired: true, .. })
    }
}
