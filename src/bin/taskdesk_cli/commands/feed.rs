// ABOUTME: Notification feed and live watch commands for taskdesk-cli
// ABOUTME: Handles listing, read-marking, the workload summary, and watch mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

use taskdesk::context::ClientContext;
use taskdesk::models::NotificationQuery;
use taskdesk::poller::PollCoordinator;

use crate::helpers::display::{display_notification_row, display_snapshot, display_summary};

/// List notifications, or mark one read when `--mark-read` is given
pub async fn notifications(
    ctx: &ClientContext,
    unread_only: bool,
    limit: Option<u32>,
    mark_read: Option<i64>,
) -> anyhow::Result<()> {
    if let Some(notification_id) = mark_read {
        ctx.notifications().mark_read(notification_id).await?;
        println!("Notification {notification_id} marked read");
        return Ok(());
    }

    let query = NotificationQuery { unread_only, limit };
    let feed = ctx.notifications().list(&query).await?;
    if feed.is_empty() {
        println!("No notifications");
    } else {
        for notification in &feed {
            display_notification_row(notification);
        }
    }

    let summary = ctx.notifications().summary().await?;
    display_summary(&summary);
    Ok(())
}

/// Follow workload changes until interrupted.
///
/// Spawns the polling coordinator, prints each published snapshot and any
/// notices raised by the engines, and stops cleanly on Ctrl-C.
pub async fn watch(ctx: &ClientContext) -> anyhow::Result<()> {
    if !ctx.session().is_authenticated() {
        anyhow::bail!("Not signed in, run 'taskdesk-cli login' first");
    }

    let poller = PollCoordinator::spawn(ctx);
    let mut snapshots = poller.subscribe();
    let mut notices = ctx.notices().subscribe();

    println!("Watching for changes (Ctrl-C to stop)");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                display_snapshot(&snapshot);
            }
            notice = notices.recv() => {
                if let Ok(notice) = notice {
                    println!("[{}] {}", notice.level, notice.text);
                }
            }
        }
    }

    poller.stop().await;
    println!("Stopped");
    Ok(())
}
