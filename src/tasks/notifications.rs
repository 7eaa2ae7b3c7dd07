// ABOUTME: Notification feed readout, read-marking, and workload summary
// ABOUTME: Event-driven activity stream surfaced per signed-in user
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! Per-user notification feed and workload counters.
//!
//! The feed is append-only on the server; the client reads it newest-first,
//! marks entries read (idempotently), and pulls the summary counters used
//! for dashboard badges.

use taskdesk_core::errors::ApiResult;
use taskdesk_core::models::{AssignmentSummary, NotificationQuery, TaskNotification};
use tracing::debug;

use crate::api::ApiTransport;
use crate::context::ClientContext;

/// Engine over the signed-in user's notification feed
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    api: ApiTransport,
}

impl NotificationFeed {
    /// Engine wired to the context's transport
    #[must_use]
    pub fn new(ctx: &ClientContext) -> Self {
        Self {
            api: ctx.api().clone(),
        }
    }

    /// Fetch notifications for the signed-in user, newest first.
    pub async fn list(&self, query: &NotificationQuery) -> ApiResult<Vec<TaskNotification>> {
        let mut params = vec![("unread_only", query.unread_only.to_string())];
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        let mut notifications: Vec<TaskNotification> = self
            .api
            .get_with_query("/task-management/notifications", &params)
            .await?;
        // Server order is already newest-first; re-sorting keeps the
        // display contract independent of it.
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    /// Mark one notification as read.
    ///
    /// Safe to repeat: marking an already-read notification succeeds
    /// without changing anything.
    pub async fn mark_read(&self, notification_id: i64) -> ApiResult<()> {
        self.api
            .put_empty(&format!(
                "/task-management/notifications/{notification_id}/read"
            ))
            .await?;
        debug!(notification.id = notification_id, "notification marked read");
        Ok(())
    }

    /// Fetch the live workload counters for the signed-in user.
    pub async fn summary(&self) -> ApiResult<AssignmentSummary> {
        self.api.get("/task-management/summary").await
    }
}
