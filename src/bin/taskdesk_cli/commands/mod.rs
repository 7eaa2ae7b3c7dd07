// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors
// ABOUTME: Re-exports command modules for taskdesk-cli
// ABOUTME: Provides access to auth, assignment, discussion, and feed commands

pub mod assignments;
pub mod auth;
pub mod discussion;
pub mod feed;
