// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors
// ABOUTME: Re-exports helper modules for taskdesk-cli
// ABOUTME: Provides access to display formatting utilities

pub mod display;
