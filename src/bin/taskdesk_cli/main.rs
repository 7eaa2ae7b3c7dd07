// ABOUTME: TaskDesk CLI - command-line client for the console task-management module
// ABOUTME: Drives assignments, discussions, calls, and the notification feed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TaskDesk Contributors
//!
//! Usage:
//! ```bash
//! # Sign in (credential persists across invocations)
//! taskdesk-cli login --email lead@example.com --password yourpassword
//!
//! # Assign task 42 to user 7
//! taskdesk-cli assign --task 42 --to 7 --message "Needs review by Friday"
//!
//! # Respond to assignment 13
//! taskdesk-cli respond 13 accept
//! taskdesk-cli respond 13 reject --reason "No capacity this sprint"
//! taskdesk-cli respond 13 discuss --message "Can we talk scope first?"
//!
//! # Read and drive a discussion
//! taskdesk-cli chat show 13
//! taskdesk-cli chat send 13 "Draft attached to the task"
//! taskdesk-cli chat complete 13 --message "Agreed, closing"
//!
//! # Calls inside an active discussion
//! taskdesk-cli call schedule 13 --at 2025-07-01T15:00:00Z --notes "Scope review"
//! taskdesk-cli call done 13
//!
//! # Notifications and live watching
//! taskdesk-cli notifications --unread-only
//! taskdesk-cli watch
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use taskdesk::config::ClientConfig;
use taskdesk::context::ClientContext;
use taskdesk::logging::LoggingConfig;
use taskdesk::tasks::AssignmentResponse;

#[derive(Parser)]
#[command(
    name = "taskdesk-cli",
    about = "TaskDesk console task-management client",
    long_about = "Command-line client for the TaskDesk console's task-management module: assign tasks, respond to assignments, hold discussions, schedule calls, and follow notifications."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL override
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Sign in and persist the credential
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Sign out and discard the persisted credential
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List assignments awaiting your response
    Pending,

    /// Assign a task to a user
    Assign {
        /// Task id to assign
        #[arg(long = "task")]
        task_id: i64,

        /// Assignee user id
        #[arg(long = "to")]
        assigned_to: i64,

        /// Message shown with the assignment
        #[arg(long)]
        message: Option<String>,
    },

    /// Show one assignment
    Show {
        /// Assignment id
        assignment_id: i64,
    },

    /// Respond to a pending assignment
    Respond {
        /// Assignment id
        assignment_id: i64,

        #[command(subcommand)]
        action: RespondCommand,
    },

    /// Discussion thread commands
    Chat {
        #[command(subcommand)]
        action: ChatCommand,
    },

    /// Call scheduling commands
    Call {
        #[command(subcommand)]
        action: CallCommand,
    },

    /// Show the notification feed
    Notifications {
        /// Only unread entries
        #[arg(long)]
        unread_only: bool,

        /// Maximum number of entries
        #[arg(long)]
        limit: Option<u32>,

        /// Mark this notification read instead of listing
        #[arg(long)]
        mark_read: Option<i64>,
    },

    /// Follow workload changes until interrupted
    Watch,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum RespondCommand {
    /// Accept the assignment
    Accept,

    /// Reject the assignment
    Reject {
        /// Why the assignment is rejected (required)
        #[arg(long)]
        reason: String,
    },

    /// Open a discussion instead of deciding now
    Discuss {
        /// Opening message for the discussion
        #[arg(long)]
        message: Option<String>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ChatCommand {
    /// Print the conversation transcript
    Show {
        /// Assignment id the conversation belongs to
        assignment_id: i64,
    },

    /// Send a message
    Send {
        /// Assignment id the conversation belongs to
        assignment_id: i64,

        /// Message text
        content: String,
    },

    /// Complete the conversation
    Complete {
        /// Assignment id the conversation belongs to
        assignment_id: i64,

        /// Final message appended before completion
        #[arg(long)]
        message: Option<String>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum CallCommand {
    /// Schedule a call on an active discussion
    Schedule {
        /// Assignment id the conversation belongs to
        assignment_id: i64,

        /// Call time, RFC 3339 (e.g. 2025-07-01T15:00:00Z)
        #[arg(long = "at")]
        scheduled_time: String,

        /// Agenda notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Mark the latest pending call as held
    Done {
        /// Assignment id the call belongs to
        assignment_id: i64,

        /// Outcome notes
        #[arg(long)]
        notes: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    // Load configuration
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.parse()?;
    }
    let ctx = ClientContext::new(config);

    // Execute command
    match cli.command {
        Command::Login { email, password } => commands::auth::login(&ctx, &email, &password).await,
        Command::Logout => commands::auth::logout(&ctx),
        Command::Whoami => commands::auth::whoami(&ctx).await,
        Command::Pending => commands::assignments::pending(&ctx).await,
        Command::Assign {
            task_id,
            assigned_to,
            message,
        } => commands::assignments::assign(&ctx, task_id, assigned_to, message).await,
        Command::Show { assignment_id } => commands::assignments::show(&ctx, assignment_id).await,
        Command::Respond {
            assignment_id,
            action,
        } => {
            let response = match action {
                RespondCommand::Accept => AssignmentResponse::Accept,
                RespondCommand::Reject { reason } => AssignmentResponse::Reject { reason },
                RespondCommand::Discuss { message } => AssignmentResponse::Discuss {
                    opening_message: message,
                },
            };
            commands::assignments::respond(&ctx, assignment_id, response).await
        }
        Command::Chat { action } => match action {
            ChatCommand::Show { assignment_id } => {
                commands::discussion::show(&ctx, assignment_id).await
            }
            ChatCommand::Send {
                assignment_id,
                content,
            } => commands::discussion::send(&ctx, assignment_id, &content).await,
            ChatCommand::Complete {
                assignment_id,
                message,
            } => commands::discussion::complete(&ctx, assignment_id, message.as_deref()).await,
        },
        Command::Call { action } => match action {
            CallCommand::Schedule {
                assignment_id,
                scheduled_time,
                notes,
            } => {
                commands::discussion::schedule_call(
                    &ctx,
                    assignment_id,
                    &scheduled_time,
                    notes.as_deref(),
                )
                .await
            }
            CallCommand::Done {
                assignment_id,
                notes,
            } => commands::discussion::complete_call(&ctx, assignment_id, notes.as_deref()).await,
        },
        Command::Notifications {
            unread_only,
            limit,
            mark_read,
        } => commands::feed::notifications(&ctx, unread_only, limit, mark_read).await,
        Command::Watch => commands::feed::watch(&ctx).await,
    }
}
