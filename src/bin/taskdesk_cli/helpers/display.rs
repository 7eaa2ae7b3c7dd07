// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors
// ABOUTME: Output formatting helpers for taskdesk-cli
// ABOUTME: Provides consistent display functions for assignments, transcripts, and feeds

use taskdesk::models::{Assignment, AssignmentSummary, Conversation, Message, TaskNotification};
use taskdesk::poller::RefreshSnapshot;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Display a full assignment block
pub fn display_assignment(assignment: &Assignment) {
    println!("Assignment #{}  [{}]", assignment.id, assignment.status);
    println!(
        "   Task: {} (task {})",
        assignment.task.title, assignment.task.id
    );

    let priority = match (assignment.task.is_urgent, assignment.task.is_important) {
        (true, true) => Some("urgent and important"),
        (true, false) => Some("urgent"),
        (false, true) => Some("important"),
        (false, false) => None,
    };
    if let Some(priority) = priority {
        println!("   Priority: {priority}");
    }
    if let Some(deadline) = assignment.task.deadline {
        println!("   Deadline: {}", deadline.format(TIME_FORMAT));
    }

    println!(
        "   Assigned: by user {} to user {} at {}",
        assignment.assigned_by,
        assignment.assigned_to,
        assignment.assigned_at.format(TIME_FORMAT)
    );
    if let Some(message) = &assignment.assignment_message {
        println!("   Message: {message}");
    }
    if let Some(response_at) = assignment.response_at {
        println!("   Responded: {}", response_at.format(TIME_FORMAT));
    }
    if let Some(reason) = &assignment.rejection_reason {
        println!("   Rejection reason: {reason}");
    }
}

/// Display a one-line assignment summary for lists
pub fn display_assignment_row(assignment: &Assignment) {
    let critical = if assignment.task.is_critical() {
        "  (!)"
    } else {
        ""
    };
    println!(
        "   #{} {} <- user {} [{}]{critical}",
        assignment.id, assignment.task.title, assignment.assigned_by, assignment.status
    );
}

/// Display a conversation header and its transcript in display order
pub fn display_conversation(conversation: &Conversation) {
    println!(
        "Conversation on assignment {} [{}]",
        conversation.assignment_id, conversation.status
    );
    if let Some(completed_at) = conversation.completed_at {
        println!("   Completed: {}", completed_at.format(TIME_FORMAT));
    }
    if conversation.messages.is_empty() {
        println!("   (no messages yet)");
        return;
    }
    for message in &conversation.messages {
        display_message(message);
    }
}

fn display_message(message: &Message) {
    let sender = if message.is_system_message {
        "system".to_string()
    } else {
        format!("user {}", message.sender)
    };
    println!(
        "   [{}] {}: {}",
        message.sent_at.format(TIME_FORMAT),
        sender,
        message.content
    );
}

/// Display a one-line notification entry
pub fn display_notification_row(notification: &TaskNotification) {
    let marker = if notification.is_read { " " } else { "*" };
    println!(
        " {marker} #{} [{}] {}: {}",
        notification.id,
        notification.created_at.format(TIME_FORMAT),
        notification.title,
        notification.message
    );
}

/// Display the workload summary counters
pub fn display_summary(summary: &AssignmentSummary) {
    println!(
        "Workload: {} pending, {} active discussion(s), {} pending call(s), {} assigned to you",
        summary.pending_assignments,
        summary.active_discussions,
        summary.pending_calls,
        summary.total_assigned_to_me
    );
}

/// Display one polling snapshot in watch mode
pub fn display_snapshot(snapshot: &RefreshSnapshot) {
    let Some(refreshed_at) = snapshot.refreshed_at else {
        return;
    };

    println!(
        "\nRefresh {} at {}",
        snapshot.generation,
        refreshed_at.format("%H:%M:%S")
    );
    if let Some(summary) = snapshot.summary {
        display_summary(&summary);
    }

    let unread = snapshot
        .notifications
        .iter()
        .filter(|n| !n.is_read)
        .count();
    if unread > 0 {
        println!("{unread} unread notification(s)");
    }
    for assignment in &snapshot.pending {
        display_assignment_row(assignment);
    }
}
