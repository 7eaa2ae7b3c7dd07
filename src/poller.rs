// ABOUTME: Background refresh loop publishing workload snapshots over a watch channel
// ABOUTME: Fixed-interval polling with immediate first tick and graceful shutdown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! Periodic refresh of the signed-in user's workload.
//!
//! The coordinator owns one background task that polls the summary,
//! notification feed, and pending-assignment list on a fixed interval and
//! publishes each complete result as an immutable snapshot. Consumers hold
//! a [`tokio::sync::watch`] receiver and always observe the latest
//! generation; a failed refresh leaves the previous snapshot in place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use taskdesk_core::constants::polling::REFRESH_NOTIFICATION_LIMIT;
use taskdesk_core::errors::ApiResult;
use taskdesk_core::models::{
    Assignment, AssignmentSummary, NotificationQuery, TaskNotification,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::context::ClientContext;

/// One complete refresh result.
///
/// `generation` increments only on successful refreshes, so consumers can
/// tell "new data" apart from "spurious wakeup" without comparing payloads.
#[derive(Debug, Clone, Default)]
pub struct RefreshSnapshot {
    /// Monotonic counter of successful refreshes since spawn
    pub generation: u64,
    /// When the refresh that produced this snapshot finished
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Workload counters, absent until the first successful refresh
    pub summary: Option<AssignmentSummary>,
    /// Notification feed, newest first
    pub notifications: Vec<TaskNotification>,
    /// Assignments awaiting the user's response, newest first
    pub pending: Vec<Assignment>,
}

/// Handle to the background refresh task
#[derive(Debug)]
pub struct PollCoordinator {
    state: watch::Receiver<Arc<RefreshSnapshot>>,
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl PollCoordinator {
    /// Spawn the refresh loop on the current runtime.
    ///
    /// The first refresh starts immediately; subsequent ones follow the
    /// configured poll interval. Ticks missed while a slow refresh is in
    /// flight are coalesced rather than burst.
    #[must_use]
    pub fn spawn(ctx: &ClientContext) -> Self {
        let (state_tx, state_rx) = watch::channel(Arc::new(RefreshSnapshot::default()));
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let poll_interval = ctx.config().poll_interval;
        let ctx = ctx.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut generation: u64 = 0;

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {}
                }

                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    refreshed = refresh(&ctx) => match refreshed {
                        Ok((summary, notifications, pending)) => {
                            generation += 1;
                            let snapshot = RefreshSnapshot {
                                generation,
                                refreshed_at: Some(Utc::now()),
                                summary: Some(summary),
                                notifications,
                                pending,
                            };
                            debug!(
                                refresh.generation = generation,
                                pending.count = snapshot.pending.len(),
                                "workload refreshed"
                            );
                            state_tx.send_replace(Arc::new(snapshot));
                        }
                        Err(err) => {
                            warn!(error = %err, "workload refresh failed, keeping previous snapshot");
                        }
                    },
                }
            }
            debug!("refresh loop stopped");
        });

        Self {
            state: state_rx,
            shutdown: shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<RefreshSnapshot> {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every newly published snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<RefreshSnapshot>> {
        self.state.clone()
    }

    /// Stop the loop and wait for the background task to finish.
    ///
    /// A refresh already in flight is abandoned; nothing further is
    /// published after this returns.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for PollCoordinator {
    fn drop(&mut self) {
        // Signal the task so a dropped coordinator does not poll forever
        let _ = self.shutdown.send(true);
    }
}

/// One refresh pass. Any failing fetch abandons the whole pass so a
/// snapshot is never published half-updated.
async fn refresh(
    ctx: &ClientContext,
) -> ApiResult<(AssignmentSummary, Vec<TaskNotification>, Vec<Assignment>)> {
    let summary = ctx.notifications().summary().await?;
    let notifications = ctx
        .notifications()
        .list(&NotificationQuery {
            unread_only: false,
            limit: Some(REFRESH_NOTIFICATION_LIMIT),
        })
        .await?;
    let pending = ctx.assignments().list_pending().await?;
    Ok((summary, notifications, pending))
}
