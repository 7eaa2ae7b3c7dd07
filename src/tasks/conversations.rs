// ABOUTME: Conversation engine for per-assignment discussion transcripts
// ABOUTME: Fetch in display order, send text messages, and complete the thread
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! Discussion threads attached to assignments.
//!
//! A conversation exists once an assignee requests discussion and stays
//! writable until either participant completes it. The engine enforces the
//! read-only-after-completion rule locally and re-sorts fetched transcripts
//! into display order; participant visibility is the server's call.

use serde::Serialize;
use taskdesk_core::errors::{ApiError, ApiResult};
use taskdesk_core::models::{Conversation, Message, MessageType};
use tracing::{debug, info};

use crate::api::ApiTransport;
use crate::context::ClientContext;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    content: &'a str,
    message_type: &'static str,
}

#[derive(Debug, Serialize)]
struct CompleteRequest<'a> {
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_message: Option<&'a str>,
}

/// Engine over a conversation transcript
#[derive(Debug, Clone)]
pub struct ConversationEngine {
    api: ApiTransport,
}

impl ConversationEngine {
    /// Engine wired to the context's transport
    #[must_use]
    pub fn new(ctx: &ClientContext) -> Self {
        Self {
            api: ctx.api().clone(),
        }
    }

    /// Fetch the conversation for an assignment, transcript in display order.
    ///
    /// Only the two assignment parties can see it; everyone else gets
    /// `ApiError::Auth` from the server.
    pub async fn conversation(&self, assignment_id: i64) -> ApiResult<Conversation> {
        let mut conversation: Conversation = self
            .api
            .get(&format!("/task-management/conversations/{assignment_id}"))
            .await?;
        conversation.normalize_order();
        Ok(conversation)
    }

    /// Append a text message to an active conversation.
    ///
    /// There is no idempotency key: resubmitting after a timeout may
    /// duplicate the message, so callers surface the failure instead of
    /// retrying blindly.
    pub async fn send_message(
        &self,
        conversation: &Conversation,
        content: &str,
    ) -> ApiResult<Message> {
        if !conversation.is_active() {
            return Err(ApiError::invalid_state(
                "Conversation is completed and read-only",
            ));
        }
        if content.trim().is_empty() {
            return Err(ApiError::validation("Message content is required"));
        }

        let message: Message = self
            .api
            .post(
                &format!(
                    "/task-management/conversations/{}/messages",
                    conversation.assignment_id
                ),
                &SendMessageRequest {
                    content,
                    message_type: MessageType::Text.as_str(),
                },
            )
            .await?;
        debug!(
            assignment.id = conversation.assignment_id,
            message.id = message.id,
            "message sent"
        );
        Ok(message)
    }

    /// Close the conversation, optionally appending a final text message
    /// first.
    ///
    /// Completion transitions the owning assignment to
    /// `discussion_completed`; every later `send_message` fails with
    /// `ApiError::InvalidState`.
    pub async fn complete(
        &self,
        conversation: &Conversation,
        final_message: Option<&str>,
    ) -> ApiResult<Conversation> {
        if !conversation.is_active() {
            return Err(ApiError::invalid_state("Conversation is already completed"));
        }
        if let Some(text) = final_message {
            if text.trim().is_empty() {
                return Err(ApiError::validation("Final message cannot be blank"));
            }
        }

        let mut updated: Conversation = self
            .api
            .post(
                &format!(
                    "/task-management/conversations/{}/complete",
                    conversation.assignment_id
                ),
                &CompleteRequest {
                    action: "complete",
                    final_message,
                },
            )
            .await?;
        updated.normalize_order();
        info!(
            assignment.id = updated.assignment_id,
            "conversation completed"
        );
        Ok(updated)
    }
}
