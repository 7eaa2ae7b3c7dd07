// ABOUTME: Assignment commands for taskdesk-cli
// ABOUTME: Handles pending, assign, show, and respond operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

use taskdesk::context::ClientContext;
use taskdesk::models::NewAssignment;
use taskdesk::tasks::AssignmentResponse;

use crate::helpers::display::{display_assignment, display_assignment_row};

/// List assignments awaiting the signed-in user's response
pub async fn pending(ctx: &ClientContext) -> anyhow::Result<()> {
    let pending = ctx.assignments().list_pending().await?;
    if pending.is_empty() {
        println!("No assignments awaiting your response");
        return Ok(());
    }

    println!("{} assignment(s) awaiting your response:", pending.len());
    for assignment in &pending {
        display_assignment_row(assignment);
    }
    Ok(())
}

/// Create an assignment for a task and target user
pub async fn assign(
    ctx: &ClientContext,
    task_id: i64,
    assigned_to: i64,
    message: Option<String>,
) -> anyhow::Result<()> {
    let request = NewAssignment {
        task_id,
        assigned_to,
        message,
    };
    let assignment = ctx.assignments().create(&request).await?;

    println!(
        "Assigned task '{}' to user {}",
        assignment.task.title, assignment.assigned_to
    );
    display_assignment(&assignment);
    Ok(())
}

/// Show one assignment in full
pub async fn show(ctx: &ClientContext, assignment_id: i64) -> anyhow::Result<()> {
    let assignment = ctx.assignments().get(assignment_id).await?;
    display_assignment(&assignment);
    Ok(())
}

/// Respond to a pending assignment with accept, reject, or discuss
pub async fn respond(
    ctx: &ClientContext,
    assignment_id: i64,
    response: AssignmentResponse,
) -> anyhow::Result<()> {
    let assignment = ctx.assignments().get(assignment_id).await?;
    let updated = ctx.responses().respond(&assignment, response).await?;

    println!("Assignment {} is now {}", updated.id, updated.status);
    if updated.status.in_discussion() {
        println!("Use 'taskdesk-cli chat show {}' to follow the discussion", updated.id);
    }
    Ok(())
}
