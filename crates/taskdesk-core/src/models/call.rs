// ABOUTME: Scheduled synchronous call attached to an assignment discussion
// ABOUTME: Lifecycle events ride the conversation transcript as system messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A synchronous call agreed inside an assignment discussion.
///
/// Calls can only be created while the owning conversation is active; the
/// server appends `call_scheduled` / `call_completed` system messages to the
/// transcript so the timeline stays linear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledCall {
    /// Server-assigned call id
    pub id: i64,
    /// Assignment whose discussion produced this call
    pub assignment_id: i64,
    /// Agreed start time; strictly in the future at scheduling time
    pub scheduled_time: DateTime<Utc>,
    /// Free-form agenda notes
    pub notes: Option<String>,
    /// Whether the call has been marked held
    pub completed: bool,
}

impl ScheduledCall {
    /// Whether the call is still waiting to happen
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.completed
    }
}
