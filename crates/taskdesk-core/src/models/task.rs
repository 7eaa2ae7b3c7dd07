// ABOUTME: Task reference consumed from the external task system
// ABOUTME: Read-only slice carried inside assignments for display and triage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The slice of an external task record the workflow engine consumes.
///
/// Tasks are owned by the wider console; the workflow engine never creates
/// or mutates them, it only binds them to assignees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRef {
    /// Server-assigned task id
    pub id: i64,
    /// Short human-readable title
    pub title: String,
    /// Free-form description when the author provided one
    pub description: Option<String>,
    /// Eisenhower urgency flag
    pub is_urgent: bool,
    /// Eisenhower importance flag
    pub is_important: bool,
    /// Hard deadline when the task has one
    pub deadline: Option<DateTime<Utc>>,
}

impl TaskRef {
    /// Urgent-and-important tasks triage ahead of everything else
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        self.is_urgent && self.is_important
    }
}
