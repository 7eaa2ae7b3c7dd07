// ABOUTME: Resolved identity of a signed-in console user
// ABOUTME: Held by the session store and attached to login responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors

use serde::{Deserialize, Serialize};

/// Identity of a console user as resolved by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-assigned user id
    pub id: i64,
    /// Sign-in email address
    pub email: String,
    /// Preferred display name when the user set one
    pub display_name: Option<String>,
}

impl UserProfile {
    /// Name shown in transcripts and notices, falling back to the email
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}
