// ABOUTME: Conversation thread attached to an assignment under discussion
// ABOUTME: Messages are immutable once sent; display order is sent_at then id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

// ============================================================================
// Enums
// ============================================================================

/// Lifecycle status of a conversation
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    /// Open for messages and call scheduling
    #[default]
    Active,
    /// Closed; the transcript is read-only
    Completed,
}

impl Display for ConversationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for ConversationStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ApiError::validation(format!(
                "Invalid conversation status: {s}"
            ))),
        }
    }
}

impl ConversationStatus {
    /// Wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Whether the conversation still accepts messages
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Kind of an entry in a conversation transcript
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Ordinary participant-authored message
    #[default]
    Text,
    /// System entry recording that a call was scheduled
    CallScheduled,
    /// System entry recording that a call took place
    CallCompleted,
    /// Other engine-generated entry
    System,
}

impl Display for MessageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Text => write!(f, "text"),
            Self::CallScheduled => write!(f, "call_scheduled"),
            Self::CallCompleted => write!(f, "call_completed"),
            Self::System => write!(f, "system"),
        }
    }
}

impl FromStr for MessageType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "call_scheduled" => Ok(Self::CallScheduled),
            "call_completed" => Ok(Self::CallCompleted),
            "system" => Ok(Self::System),
            _ => Err(ApiError::validation(format!("Invalid message type: {s}"))),
        }
    }
}

impl MessageType {
    /// Wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::CallScheduled => "call_scheduled",
            Self::CallCompleted => "call_completed",
            Self::System => "system",
        }
    }

    /// Whether this entry records a call lifecycle event
    #[must_use]
    pub const fn is_call_event(&self) -> bool {
        matches!(self, Self::CallScheduled | Self::CallCompleted)
    }
}

// ============================================================================
// Records
// ============================================================================

/// One immutable entry in a conversation transcript.
///
/// System-typed entries are appended by the server as side effects of call
/// scheduling and completion; participants never author them directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned message id
    pub id: i64,
    /// User id of the author; server-generated entries use the reserved id 0
    pub sender: i64,
    /// Message body
    pub content: String,
    /// Transcript entry kind
    pub message_type: MessageType,
    /// When the server accepted the message
    pub sent_at: DateTime<Utc>,
    /// When the counterparty read it, if they have
    pub read_at: Option<DateTime<Utc>>,
    /// Redundant flag the server sets for non-participant entries
    pub is_system_message: bool,
}

/// Message thread attached 1:1 to an assignment under discussion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Assignment this thread belongs to
    pub assignment_id: i64,
    /// Lifecycle status
    pub status: ConversationStatus,
    /// Transcript entries; call [`Conversation::normalize_order`] after fetch
    pub messages: Vec<Message>,
    /// User who closed the conversation, once completed
    pub completed_by: Option<i64>,
    /// When the conversation was closed, once completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl Conversation {
    /// Whether the conversation still accepts messages
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Sort the transcript into display order: `sent_at` ascending, ties
    /// broken by id ascending. Server order is not trusted.
    pub fn normalize_order(&mut self) {
        self.messages.sort_by_key(|m| (m.sent_at, m.id));
    }
}
