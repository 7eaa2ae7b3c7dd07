// ABOUTME: Environment-driven client configuration for the TaskDesk engines
// ABOUTME: Base URL, timeouts, poll cadence, and credential file location
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors

//! Client configuration loaded from environment variables.
//!
//! Configuration is environment-only; there is no config file. Every knob has
//! a default, so `TASKDESK_API_URL` is the only variable a deployment
//! normally sets.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use taskdesk_core::constants::{polling, transport};
use url::Url;

/// Client configuration for the engines and the CLI
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the console API
    pub api_url: Url,
    /// Refresh cadence of the polling coordinator; must be non-zero
    pub poll_interval: Duration,
    /// End-to-end HTTP request timeout
    pub http_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Explicit credential file location; `None` uses the platform default
    pub credentials_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the API base URL
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            poll_interval: Duration::from_secs(polling::DEFAULT_POLL_INTERVAL_SECS),
            http_timeout: Duration::from_secs(transport::DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(transport::DEFAULT_CONNECT_TIMEOUT_SECS),
            credentials_path: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set to an unparseable value
    pub fn from_env() -> Result<Self> {
        let api_url = Url::parse(&env_var_or("TASKDESK_API_URL", transport::DEFAULT_API_URL))
            .context("Invalid TASKDESK_API_URL value")?;

        let poll_secs: u64 = env_var_or(
            "TASKDESK_POLL_INTERVAL_SECS",
            &polling::DEFAULT_POLL_INTERVAL_SECS.to_string(),
        )
        .parse()
        .context("Invalid TASKDESK_POLL_INTERVAL_SECS value")?;
        anyhow::ensure!(
            poll_secs > 0,
            "TASKDESK_POLL_INTERVAL_SECS must be positive"
        );

        let http_timeout_secs: u64 = env_var_or(
            "TASKDESK_HTTP_TIMEOUT_SECS",
            &transport::DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .context("Invalid TASKDESK_HTTP_TIMEOUT_SECS value")?;

        let connect_timeout_secs: u64 = env_var_or(
            "TASKDESK_CONNECT_TIMEOUT_SECS",
            &transport::DEFAULT_CONNECT_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .context("Invalid TASKDESK_CONNECT_TIMEOUT_SECS value")?;

        Ok(Self {
            api_url,
            poll_interval: Duration::from_secs(poll_secs),
            http_timeout: Duration::from_secs(http_timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            credentials_path: env::var("TASKDESK_CREDENTIALS_PATH").ok().map(PathBuf::from),
        })
    }

    /// Resolved on-disk location of the persisted credential
    #[must_use]
    pub fn credentials_file(&self) -> PathBuf {
        self.credentials_path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("taskdesk")
                .join("credentials.json")
        })
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
