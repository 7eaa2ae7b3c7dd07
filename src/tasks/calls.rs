// ABOUTME: Call scheduling inside active discussions
// ABOUTME: Books a future call on a conversation and marks the latest one done
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! Scheduled calls layered on top of conversations.
//!
//! A call can only be booked while the discussion is active, and the server
//! drops a system message into the transcript for both schedule and
//! completion so the thread records the whole arrangement.

use chrono::{DateTime, Utc};
use serde::Serialize;
use taskdesk_core::errors::{ApiError, ApiResult};
use taskdesk_core::models::{Conversation, ScheduledCall};
use tracing::info;

use crate::api::ApiTransport;
use crate::context::ClientContext;

#[derive(Debug, Serialize)]
struct ScheduleCallRequest<'a> {
    scheduled_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CompleteCallRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

/// Engine for booking and completing discussion calls
#[derive(Debug, Clone)]
pub struct CallScheduler {
    api: ApiTransport,
}

impl CallScheduler {
    /// Engine wired to the context's transport
    #[must_use]
    pub fn new(ctx: &ClientContext) -> Self {
        Self {
            api: ctx.api().clone(),
        }
    }

    /// Book a call on an active conversation at a future time.
    ///
    /// The server appends a `call_scheduled` system message to the
    /// transcript as a side effect.
    pub async fn schedule(
        &self,
        conversation: &Conversation,
        scheduled_time: DateTime<Utc>,
        notes: Option<&str>,
    ) -> ApiResult<ScheduledCall> {
        if !conversation.is_active() {
            return Err(ApiError::invalid_state(
                "Calls can only be scheduled while the discussion is active",
            ));
        }
        if scheduled_time <= Utc::now() {
            return Err(ApiError::validation("Call time must be in the future"));
        }

        let call: ScheduledCall = self
            .api
            .post(
                &format!(
                    "/task-management/assignments/{}/schedule-call",
                    conversation.assignment_id
                ),
                &ScheduleCallRequest {
                    scheduled_time,
                    notes,
                },
            )
            .await?;
        info!(
            assignment.id = call.assignment_id,
            call.id = call.id,
            "call scheduled"
        );
        Ok(call)
    }

    /// Mark the most recent pending call on the assignment as held.
    ///
    /// Fails with `ApiError::NotFound` when no call is pending. Completing
    /// a call leaves the conversation active; the server appends a
    /// `call_completed` system message.
    pub async fn complete_latest(
        &self,
        assignment_id: i64,
        notes: Option<&str>,
    ) -> ApiResult<ScheduledCall> {
        let call: ScheduledCall = self
            .api
            .post(
                &format!("/task-management/assignments/{assignment_id}/complete-call"),
                &CompleteCallRequest { notes },
            )
            .await?;
        info!(
            assignment.id = call.assignment_id,
            call.id = call.id,
            "call completed"
        );
        Ok(call)
    }
}
