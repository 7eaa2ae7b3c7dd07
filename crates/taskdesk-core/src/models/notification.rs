// ABOUTME: Task notification records produced by server-side fan-out
// ABOUTME: Read-only on the client apart from the idempotent mark-read flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Workflow event a notification announces.
///
/// The server grows new kinds without coordinating releases; anything this
/// client does not recognize lands on `Unknown` instead of failing the whole
/// feed decode.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A task was assigned to the recipient
    AssignmentReceived,
    /// The assignee accepted
    AssignmentAccepted,
    /// The assignee rejected
    AssignmentRejected,
    /// The assignee asked to discuss
    DiscussionRequested,
    /// A new message landed in a discussion
    NewMessage,
    /// A call was scheduled in a discussion
    CallScheduled,
    /// A scheduled call was marked held
    CallCompleted,
    /// A discussion was closed
    DiscussionCompleted,
    /// Kind this client version does not recognize
    #[serde(other)]
    Unknown,
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl NotificationKind {
    /// Wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AssignmentReceived => "assignment_received",
            Self::AssignmentAccepted => "assignment_accepted",
            Self::AssignmentRejected => "assignment_rejected",
            Self::DiscussionRequested => "discussion_requested",
            Self::NewMessage => "new_message",
            Self::CallScheduled => "call_scheduled",
            Self::CallCompleted => "call_completed",
            Self::DiscussionCompleted => "discussion_completed",
            Self::Unknown => "unknown",
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// One fan-out notification delivered to the current user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskNotification {
    /// Server-assigned notification id
    pub id: i64,
    /// Workflow event being announced
    pub notification_type: NotificationKind,
    /// Short headline
    pub title: String,
    /// Longer human-readable body
    pub message: String,
    /// Assignment the event belongs to, when there is one
    pub assignment_id: Option<i64>,
    /// Whether the recipient has marked it read
    pub is_read: bool,
    /// When the server produced it
    pub created_at: DateTime<Utc>,
}

/// Point-in-time workload aggregate for the current user.
///
/// Server-derived and eventually consistent; counts may lag the detail
/// lists by up to one poll interval, so consumers must not assert
/// cross-equality between this and the lists.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AssignmentSummary {
    /// Assignments waiting on the user's response
    pub pending_assignments: u32,
    /// Discussions the user participates in that are still open
    pub active_discussions: u32,
    /// Scheduled calls not yet marked held
    pub pending_calls: u32,
    /// All assignments ever assigned to the user, terminal included
    pub total_assigned_to_me: u32,
}

impl AssignmentSummary {
    /// Whether anything is waiting on the user right now
    #[must_use]
    pub const fn has_open_work(&self) -> bool {
        self.pending_assignments > 0 || self.active_discussions > 0 || self.pending_calls > 0
    }
}

/// Filter for the notification feed listing
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationQuery {
    /// Keep only unread notifications
    pub unread_only: bool,
    /// Cap the number of records returned, newest first
    pub limit: Option<u32>,
}
