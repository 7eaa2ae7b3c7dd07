// ABOUTME: Task-workflow domain models for the TaskDesk client engine
// ABOUTME: Re-exports assignments, conversations, calls, notifications, and users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

//! # Data Models
//!
//! Wire-faithful domain types for the task-assignment workflow. Every record
//! here is the client's view of server state: identifiers are server-assigned
//! `i64`s, timestamps are RFC 3339 `DateTime<Utc>`, and enums travel as
//! `snake_case` strings.
//!
//! ## Core Models
//!
//! - `Assignment`: a task bound to an assignee, with its status machine
//! - `Conversation` / `Message`: the per-assignment discussion transcript
//! - `ScheduledCall`: synchronous calls agreed inside a discussion
//! - `TaskNotification` / `AssignmentSummary`: fan-out readout
//! - `UserProfile`: resolved identity held by the session store

// Domain modules
mod assignment;
mod call;
mod conversation;
mod notification;
mod task;
mod user;

// Re-export all public types for convenience
// Assignment domain
pub use assignment::{
    Assignment, AssignmentAction, AssignmentFilter, AssignmentStatus, NewAssignment,
};

// Conversation domain
pub use conversation::{Conversation, ConversationStatus, Message, MessageType};

// Call scheduling domain
pub use call::ScheduledCall;

// Notification domain
pub use notification::{AssignmentSummary, NotificationKind, NotificationQuery, TaskNotification};

// Task and user references
pub use task::TaskRef;
pub use user::UserProfile;
