// ABOUTME: Client-wide constants for transport, polling, and notice delivery
// ABOUTME: Single source of defaults shared by the engines and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

/// Service identity strings
pub mod service {
    /// Canonical service name used in logs and the HTTP user agent
    pub const SERVICE_NAME: &str = "taskdesk";
}

/// HTTP transport defaults
pub mod transport {
    /// Default end-to-end request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default TCP connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Default base URL of the console API
    pub const DEFAULT_API_URL: &str = "http://localhost:8000";
}

/// Polling coordinator defaults
pub mod polling {
    /// Default refresh cadence in seconds
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

    /// Notifications fetched per refresh tick
    pub const REFRESH_NOTIFICATION_LIMIT: u32 = 50;
}

/// Notice bus defaults
pub mod notices {
    /// Broadcast channel capacity for transient notices; slow subscribers
    /// that lag past this many messages lose the oldest ones
    pub const NOTICE_CHANNEL_CAPACITY: usize = 64;
}
