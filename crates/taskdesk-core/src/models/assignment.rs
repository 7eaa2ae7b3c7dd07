// ABOUTME: Assignment record binding a task to an assignee, plus its status machine
// ABOUTME: Status transitions are encoded as pure functions so legality is unit-testable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

use super::task::TaskRef;

// ============================================================================
// Enums
// ============================================================================

/// Lifecycle status of an assignment.
///
/// Transitions only move forward: `pending_acceptance` is the single entry
/// point, `accepted` / `rejected` / `discussion_completed` are terminal, and
/// `discussion_requested` collapses into `discussion_active` as soon as the
/// server has created the conversation.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Waiting on the assignee's response
    #[default]
    PendingAcceptance,
    /// Assignee accepted; terminal
    Accepted,
    /// Assignee rejected with a reason; terminal
    Rejected,
    /// Assignee asked to discuss; conversation being created
    DiscussionRequested,
    /// Conversation is open for messages and calls
    DiscussionActive,
    /// Conversation closed; terminal
    DiscussionCompleted,
}

impl Display for AssignmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::PendingAcceptance => write!(f, "pending_acceptance"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
            Self::DiscussionRequested => write!(f, "discussion_requested"),
            Self::DiscussionActive => write!(f, "discussion_active"),
            Self::DiscussionCompleted => write!(f, "discussion_completed"),
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending_acceptance" => Ok(Self::PendingAcceptance),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "discussion_requested" => Ok(Self::DiscussionRequested),
            "discussion_active" => Ok(Self::DiscussionActive),
            "discussion_completed" => Ok(Self::DiscussionCompleted),
            _ => Err(ApiError::validation(format!(
                "Invalid assignment status: {s}"
            ))),
        }
    }
}

impl AssignmentStatus {
    /// Wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingAcceptance => "pending_acceptance",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::DiscussionRequested => "discussion_requested",
            Self::DiscussionActive => "discussion_active",
            Self::DiscussionCompleted => "discussion_completed",
        }
    }

    /// Whether the assignee may still accept, reject, or request discussion
    #[must_use]
    pub const fn can_respond(&self) -> bool {
        matches!(self, Self::PendingAcceptance)
    }

    /// Whether this status ends the lifecycle
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Accepted | Self::Rejected | Self::DiscussionCompleted
        )
    }

    /// Whether the assignment is waiting on the assignee
    #[must_use]
    pub const fn awaiting_response(&self) -> bool {
        matches!(self, Self::PendingAcceptance)
    }

    /// Whether a conversation exists for this assignment
    #[must_use]
    pub const fn in_discussion(&self) -> bool {
        matches!(
            self,
            Self::DiscussionRequested | Self::DiscussionActive | Self::DiscussionCompleted
        )
    }
}

/// Assignee response verb sent to the respond endpoint
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentAction {
    /// Take the task as assigned
    Accept,
    /// Decline the task; requires a reason
    Reject,
    /// Open a conversation before committing
    Discuss,
}

impl Display for AssignmentAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Reject => write!(f, "reject"),
            Self::Discuss => write!(f, "discuss"),
        }
    }
}

impl FromStr for AssignmentAction {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            "discuss" => Ok(Self::Discuss),
            _ => Err(ApiError::validation(format!(
                "Invalid assignment action: {s}"
            ))),
        }
    }
}

impl AssignmentAction {
    /// Wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Discuss => "discuss",
        }
    }

    /// Status the assignment settles into once the server applies this action.
    ///
    /// `Discuss` passes through `discussion_requested` server-side but is
    /// observable as `discussion_active` once the conversation exists.
    #[must_use]
    pub const fn target_status(&self) -> AssignmentStatus {
        match self {
            Self::Accept => AssignmentStatus::Accepted,
            Self::Reject => AssignmentStatus::Rejected,
            Self::Discuss => AssignmentStatus::DiscussionActive,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// A task bound to an assignee by an assigner.
///
/// Assignments are never deleted; terminal records stay queryable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// Server-assigned assignment id
    pub id: i64,
    /// The task being assigned
    pub task: TaskRef,
    /// User id of the assignee
    pub assigned_to: i64,
    /// User id of the assigner
    pub assigned_by: i64,
    /// Optional note from the assigner shown at triage time
    pub assignment_message: Option<String>,
    /// When the assignment was created
    pub assigned_at: DateTime<Utc>,
    /// Current lifecycle status
    pub status: AssignmentStatus,
    /// When the assignee responded, for accepted/rejected records
    pub response_at: Option<DateTime<Utc>>,
    /// Reason the assignee gave, for rejected records
    pub rejection_reason: Option<String>,
}

/// Request payload for creating an assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssignment {
    /// Task to assign
    pub task_id: i64,
    /// User the task goes to
    pub assigned_to: i64,
    /// Optional note shown to the assignee at triage time
    pub message: Option<String>,
}

/// Filter for the caller's own assignment listing
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentFilter {
    /// Keep only assignments in this status
    pub status: Option<AssignmentStatus>,
    /// `true` lists assignments the caller created, `false` assignments
    /// the caller received
    pub assigned_by_me: bool,
}
