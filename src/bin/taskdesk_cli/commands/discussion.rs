// ABOUTME: Discussion and call commands for taskdesk-cli
// ABOUTME: Handles chat show/send/complete and call schedule/done operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use taskdesk::context::ClientContext;

use crate::helpers::display::display_conversation;

/// Print the conversation transcript for an assignment
pub async fn show(ctx: &ClientContext, assignment_id: i64) -> anyhow::Result<()> {
    let conversation = ctx.conversations().conversation(assignment_id).await?;
    display_conversation(&conversation);
    Ok(())
}

/// Send a text message to an active conversation
pub async fn send(ctx: &ClientContext, assignment_id: i64, content: &str) -> anyhow::Result<()> {
    let conversation = ctx.conversations().conversation(assignment_id).await?;
    let message = ctx.conversations().send_message(&conversation, content).await?;
    println!(
        "Sent message {} at {}",
        message.id,
        message.sent_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

/// Complete a conversation, optionally with a final message
pub async fn complete(
    ctx: &ClientContext,
    assignment_id: i64,
    final_message: Option<&str>,
) -> anyhow::Result<()> {
    let conversation = ctx.conversations().conversation(assignment_id).await?;
    let completed = ctx
        .conversations()
        .complete(&conversation, final_message)
        .await?;
    println!("Discussion on assignment {} completed", completed.assignment_id);
    Ok(())
}

/// Schedule a call on an active discussion
pub async fn schedule_call(
    ctx: &ClientContext,
    assignment_id: i64,
    scheduled_time: &str,
    notes: Option<&str>,
) -> anyhow::Result<()> {
    let at: DateTime<Utc> = scheduled_time
        .parse()
        .with_context(|| format!("Invalid call time '{scheduled_time}', expected RFC 3339"))?;

    let conversation = ctx.conversations().conversation(assignment_id).await?;
    let call = ctx.calls().schedule(&conversation, at, notes).await?;

    println!(
        "Call {} scheduled for {}",
        call.id,
        call.scheduled_time.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

/// Mark the latest pending call on an assignment as held
pub async fn complete_call(
    ctx: &ClientContext,
    assignment_id: i64,
    notes: Option<&str>,
) -> anyhow::Result<()> {
    let call = ctx.calls().complete_latest(assignment_id, notes).await?;
    println!("Call {} marked as held", call.id);
    Ok(())
}
