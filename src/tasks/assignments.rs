// ABOUTME: Assignment directory over the console's assignment endpoints
// ABOUTME: Create, list-pending, list-mine with filters, and fetch-one
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! Assignment creation and lookup.
//!
//! Listing order is a client-side contract: triage views show newest first,
//! so the directory re-sorts by `assigned_at` instead of trusting whatever
//! order the server returned.

use taskdesk_core::errors::{ApiError, ApiResult};
use taskdesk_core::models::{Assignment, AssignmentFilter, NewAssignment};
use tracing::info;

use crate::api::ApiTransport;
use crate::context::ClientContext;

/// Directory of assignments visible to the current user
#[derive(Debug, Clone)]
pub struct AssignmentDirectory {
    api: ApiTransport,
}

impl AssignmentDirectory {
    /// Directory wired to the context's transport
    #[must_use]
    pub fn new(ctx: &ClientContext) -> Self {
        Self {
            api: ctx.api().clone(),
        }
    }

    /// Assign a task to a user.
    ///
    /// The server decides whether the caller may assign this particular
    /// task; a refusal surfaces as `ApiError::Auth`.
    pub async fn create(&self, req: &NewAssignment) -> ApiResult<Assignment> {
        if req.task_id <= 0 {
            return Err(ApiError::validation("A task to assign is required"));
        }
        if req.assigned_to <= 0 {
            return Err(ApiError::validation("An assignee is required"));
        }

        let assignment: Assignment = self.api.post("/task-management/assign", req).await?;
        info!(
            assignment.id = assignment.id,
            assignee = assignment.assigned_to,
            "assignment created"
        );
        Ok(assignment)
    }

    /// Assignments waiting on the caller's response, newest first
    pub async fn list_pending(&self) -> ApiResult<Vec<Assignment>> {
        let mut pending: Vec<Assignment> = self
            .api
            .get("/task-management/assignments/pending")
            .await?;
        pending.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at));
        Ok(pending)
    }

    /// Assignments the caller received, or created when
    /// `filter.assigned_by_me` is set, optionally narrowed to one status
    pub async fn list_mine(&self, filter: &AssignmentFilter) -> ApiResult<Vec<Assignment>> {
        let mut query: Vec<(&str, String)> =
            vec![("assigned_by_me", filter.assigned_by_me.to_string())];
        if let Some(status) = filter.status {
            query.push(("status_filter", status.as_str().to_owned()));
        }
        self.api
            .get_with_query("/task-management/my-assignments", &query)
            .await
    }

    /// Fetch one assignment.
    ///
    /// Records that exist but belong to other users surface as
    /// `ApiError::NotFound`, indistinguishable from absence.
    pub async fn get(&self, id: i64) -> ApiResult<Assignment> {
        self.api
            .get(&format!("/task-management/assignments/{id}"))
            .await
    }
}
