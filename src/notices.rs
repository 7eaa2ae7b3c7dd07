// ABOUTME: Process-wide transient notice bus for user-facing toasts
// ABOUTME: Broadcast channel decouples engine publishers from display subscribers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! Transient user-facing notices.
//!
//! Engines and the CLI publish short-lived notices ("Assignment accepted",
//! "Signed out") without knowing who renders them; any number of subscribers
//! receive each notice published after they subscribed. Notices are advisory
//! and never persisted: a slow subscriber that lags past the channel capacity
//! loses the oldest entries, which is the intended toast behavior.

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::Serialize;
use taskdesk_core::constants::notices::NOTICE_CHANNEL_CAPACITY;
use tokio::sync::broadcast;
use tracing::trace;

/// Severity of a transient notice
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Neutral information
    Info,
    /// A requested operation completed
    Success,
    /// Something degraded but not failed
    Warning,
    /// A requested operation failed
    Error,
}

impl NoticeLevel {
    /// Display string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl Display for NoticeLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// One transient user-facing notice
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    /// Severity used to pick the rendering
    pub level: NoticeLevel,
    /// Human-readable text shown as-is
    pub text: String,
    /// When the notice was raised
    pub raised_at: DateTime<Utc>,
}

/// Broadcast bus carrying transient notices to whoever is listening
#[derive(Debug, Clone)]
pub struct NoticeBus {
    tx: broadcast::Sender<Notice>,
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(NOTICE_CHANNEL_CAPACITY)
    }
}

impl NoticeBus {
    /// Bus with an explicit channel capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Receive notices published from this point on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    /// Publish a notice; a bus with no subscribers drops it silently
    pub fn publish(&self, level: NoticeLevel, text: impl Into<String>) {
        let notice = Notice {
            level,
            text: text.into(),
            raised_at: Utc::now(),
        };
        if self.tx.send(notice).is_err() {
            trace!("notice dropped, no subscribers");
        }
    }

    /// Publish an informational notice
    pub fn info(&self, text: impl Into<String>) {
        self.publish(NoticeLevel::Info, text);
    }

    /// Publish a success notice
    pub fn success(&self, text: impl Into<String>) {
        self.publish(NoticeLevel::Success, text);
    }

    /// Publish a warning notice
    pub fn warning(&self, text: impl Into<String>) {
        self.publish(NoticeLevel::Warning, text);
    }

    /// Publish an error notice
    pub fn error(&self, text: impl Into<String>) {
        self.publish(NoticeLevel::Error, text);
    }
}
