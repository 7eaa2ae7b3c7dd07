// ABOUTME: Task-workflow engines over the console's task-management endpoints
// ABOUTME: Directory, response state machine, conversations, calls, and notifications
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! # Task Workflow Engines
//!
//! One engine per concern, all constructed from a [`crate::context::ClientContext`]:
//!
//! - [`AssignmentDirectory`]: create, list, and fetch assignments
//! - [`ResponseEngine`]: the accept/reject/discuss state machine
//! - [`ConversationEngine`]: per-assignment discussion transcripts
//! - [`CallScheduler`]: synchronous calls inside a discussion
//! - [`NotificationFeed`]: fan-out readout and the workload summary
//!
//! Engines guard what they can locally (caller identity, lifecycle state,
//! blank input) before any network traffic, then let the server re-enforce
//! the same rules; a 409 from a stale local record surfaces as
//! `ApiError::InvalidState` exactly like a client-side guard would.

/// Assignment directory: create, list-pending, list-mine, fetch-one
pub mod assignments;

/// Call scheduling inside an active discussion
pub mod calls;

/// Conversation transcripts, messages, and completion
pub mod conversations;

/// Notification feed readout and workload summary
pub mod notifications;

/// Assignment response state machine
pub mod respond;

pub use assignments::AssignmentDirectory;
pub use calls::CallScheduler;
pub use conversations::ConversationEngine;
pub use notifications::NotificationFeed;
pub use respond::{AssignmentResponse, ResponseEngine};
