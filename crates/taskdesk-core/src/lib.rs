// ABOUTME: Core types for the TaskDesk client engine
// ABOUTME: Foundation crate with the error taxonomy and task-workflow domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

#![deny(unsafe_code)]

//! # TaskDesk Core
//!
//! Foundation crate providing shared types for the TaskDesk client engine.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace, and performs no I/O: everything
//! here is a plain type, a pure function, or a constant.
//!
//! ## Modules
//!
//! - **errors**: client error taxonomy (`ApiError`) and HTTP response classification
//! - **constants**: client-wide defaults organized by domain
//! - **models**: task-workflow domain models (assignments, conversations, calls, notifications)

/// Client error taxonomy with HTTP response classification
pub mod errors;

/// Client-wide default values organized by domain
pub mod constants;

/// Task-workflow domain models (`Assignment`, `Conversation`, `ScheduledCall`, `TaskNotification`)
pub mod models;
