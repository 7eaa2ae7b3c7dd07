// ABOUTME: Assignment response engine implementing the accept/reject/discuss state machine
// ABOUTME: Client-side legality guards run before any network traffic
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! The assignee's one-shot decision on a pending assignment.
//!
//! Guards run in a fixed order before the request is sent: caller identity,
//! lifecycle state, then input shape. The server re-enforces all three, so
//! a stale local record loses the race cleanly: its 409 comes back as the
//! same `ApiError::InvalidState` a local guard would have produced.
//! Double submission is therefore rejected, never deduplicated.

use serde::Serialize;
use taskdesk_core::errors::{ApiError, ApiResult};
use taskdesk_core::models::{Assignment, AssignmentAction};
use tracing::info;

use crate::api::ApiTransport;
use crate::context::ClientContext;
use crate::session::SessionStore;

/// The assignee's decision on a pending assignment
#[derive(Debug, Clone)]
pub enum AssignmentResponse {
    /// Take the task as assigned
    Accept,
    /// Decline the task with a mandatory reason
    Reject {
        /// Why the task is being declined; must not be blank
        reason: String,
    },
    /// Open a conversation before committing
    Discuss {
        /// Optional first message seeding the conversation
        opening_message: Option<String>,
    },
}

impl AssignmentResponse {
    /// Wire verb for this decision
    #[must_use]
    pub const fn action(&self) -> AssignmentAction {
        match self {
            Self::Accept => AssignmentAction::Accept,
            Self::Reject { .. } => AssignmentAction::Reject,
            Self::Discuss { .. } => AssignmentAction::Discuss,
        }
    }
}

#[derive(Debug, Serialize)]
struct RespondRequest<'a> {
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<&'a str>,
}

/// Engine recording the assignee's response to an assignment
#[derive(Debug, Clone)]
pub struct ResponseEngine {
    api: ApiTransport,
    session: SessionStore,
}

impl ResponseEngine {
    /// Engine wired to the context's transport and session store
    #[must_use]
    pub fn new(ctx: &ClientContext) -> Self {
        Self {
            api: ctx.api().clone(),
            session: ctx.session().clone(),
        }
    }

    /// Record the assignee's decision and return the updated assignment.
    ///
    /// Accept and reject are terminal; discuss settles the assignment into
    /// `discussion_active` with a server-created conversation attached,
    /// seeded with `opening_message` when one was given.
    pub async fn respond(
        &self,
        assignment: &Assignment,
        response: AssignmentResponse,
    ) -> ApiResult<Assignment> {
        let session = self
            .session
            .current()
            .ok_or_else(|| ApiError::auth("Not signed in"))?;
        if session.user.id != assignment.assigned_to {
            return Err(ApiError::auth(
                "Only the assignee may respond to an assignment",
            ));
        }
        if !assignment.status.can_respond() {
            return Err(ApiError::invalid_state(format!(
                "Assignment is {}, only pending assignments accept a response",
                assignment.status
            )));
        }
        if let AssignmentResponse::Reject { reason } = &response {
            if reason.trim().is_empty() {
                return Err(ApiError::validation("A rejection reason is required"));
            }
        }

        let action = response.action();
        let body = match &response {
            AssignmentResponse::Accept => RespondRequest {
                action: action.as_str(),
                message: None,
                rejection_reason: None,
            },
            AssignmentResponse::Reject { reason } => RespondRequest {
                action: action.as_str(),
                message: None,
                rejection_reason: Some(reason),
            },
            AssignmentResponse::Discuss { opening_message } => RespondRequest {
                action: action.as_str(),
                message: opening_message.as_deref(),
                rejection_reason: None,
            },
        };

        let updated: Assignment = self
            .api
            .post(
                &format!("/task-management/assignments/{}/respond", assignment.id),
                &body,
            )
            .await?;
        info!(
            assignment.id = updated.id,
            action = action.as_str(),
            status = %updated.status,
            "assignment response recorded"
        );
        Ok(updated)
    }
}
