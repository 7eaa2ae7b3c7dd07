// ABOUTME: Main library entry point for the TaskDesk admin console client
// ABOUTME: Task assignment, discussion, call scheduling, and notification engines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

#![deny(unsafe_code)]

//! # TaskDesk Client
//!
//! Client-side workflow engine for the TaskDesk admin console. It signs a
//! user in, keeps their credential across restarts, and drives the
//! assignment lifecycle end to end: creating assignments, responding to
//! them, holding discussions, scheduling calls, and reading the
//! notification feed.
//!
//! ## Features
//!
//! - **Persistent sessions**: Bearer credential survives restarts via an
//!   on-disk credential file
//! - **State guards**: Illegal transitions are rejected locally with the
//!   same taxonomy the server uses, so stale-record races and local
//!   mistakes are indistinguishable to callers
//! - **Background refresh**: A polling coordinator publishes immutable
//!   workload snapshots over a watch channel
//! - **Structured tracing**: Every request and transition is logged with
//!   typed fields
//!
//! ## Architecture
//!
//! Everything hangs off [`context::ClientContext`], an explicit dependency
//! container. Engines are built from the context and share its session
//! store and HTTP transport:
//! - **Transport**: [`api::ApiTransport`] injects the bearer credential and
//!   maps HTTP failures into [`errors::ApiError`]
//! - **Engines**: [`tasks`] holds one engine per workflow area
//! - **Session**: [`session::SessionStore`] owns the signed-in state and
//!   broadcasts changes
//! - **Poller**: [`poller::PollCoordinator`] refreshes the workload on an
//!   interval
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use taskdesk::config::ClientConfig;
//! use taskdesk::context::ClientContext;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let ctx = ClientContext::new(config);
//!
//!     let user = ctx.auth().login("lead@example.com", "secret").await?;
//!     println!("Signed in as {}", user.label());
//!
//!     let pending = ctx.assignments().list_pending().await?;
//!     println!("{} assignments awaiting a response", pending.len());
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the CLI binary (src/bin/) and integration
// tests (tests/). They must remain `pub` for external consumers.

/// HTTP transport with credential injection and error decoding
pub mod api;

/// Sign-in, sign-out, and profile refresh
pub mod auth;

/// Client configuration loaded from the environment
pub mod config;

/// Dependency container wiring configuration, session, and engines
pub mod context;

/// Structured logging initialization
pub mod logging;

/// Broadcast bus for user-facing notices
pub mod notices;

/// Background workload refresh loop
pub mod poller;

/// Persisted sign-in state
pub mod session;

/// Assignment, conversation, call, and notification engines
pub mod tasks;

/// Shared constants (service identity, transport defaults, polling)
pub use taskdesk_core::constants;

/// Error taxonomy shared across the client
pub use taskdesk_core::errors;

/// Domain models for tasks, assignments, conversations, calls, and
/// notifications
pub use taskdesk_core::models;
