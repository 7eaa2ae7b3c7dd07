// ABOUTME: Shared test utilities and an in-process fake console for integration tests
// ABOUTME: Provides a stateful task-management API double plus context builders
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 TaskDesk Contributors
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::too_many_lines,
    clippy::uninlined_format_args
)]
//! Shared test utilities for the TaskDesk client.
//!
//! The heart of this module is [`FakeConsole`], a wiremock-backed stand-in
//! for the console's task-management API. It keeps real server-side state
//! behind a mutex so multi-step workflows (assign, respond, discuss,
//! complete) behave like the production server. Responses are built from
//! handwritten JSON so the client's wire decoding is exercised against
//! literal field names, not round-tripped through the crate's own
//! serializers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Once};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use taskdesk::config::ClientConfig;
use taskdesk::context::ClientContext;
use taskdesk::models::UserProfile;
use tempfile::TempDir;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ── Fake console state ──────────────────────────────────────────────────

pub struct FakeUser {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

pub struct FakeTask {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_urgent: bool,
    pub is_important: bool,
    pub deadline: Option<String>,
}

pub struct FakeAssignment {
    pub id: i64,
    pub task_id: i64,
    pub assigned_to: i64,
    pub assigned_by: i64,
    pub message: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub status: String,
    pub response_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

pub struct FakeMessage {
    pub id: i64,
    pub sender: i64,
    pub content: String,
    pub message_type: String,
    pub sent_at: DateTime<Utc>,
    pub is_system: bool,
}

pub struct FakeConversation {
    pub assignment_id: i64,
    pub status: String,
    pub messages: Vec<FakeMessage>,
    pub completed_by: Option<i64>,
    pub completed_at: Option<DateTime<Utc>>,
}

pub struct FakeCall {
    pub id: i64,
    pub assignment_id: i64,
    pub scheduled_time: String,
    pub notes: Option<String>,
    pub completed: bool,
}

pub struct FakeNotification {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub assignment_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Server-side state of the fake console.
///
/// Tests may reach in through [`FakeConsole::state`] to reorder transcripts
/// or inject records the client API cannot produce.
pub struct ConsoleState {
    pub users: Vec<FakeUser>,
    pub tasks: Vec<FakeTask>,
    pub assignments: Vec<FakeAssignment>,
    pub conversations: Vec<FakeConversation>,
    pub calls: Vec<FakeCall>,
    pub notifications: Vec<FakeNotification>,
    /// When set, every authenticated request fails like an expired token
    pub tokens_revoked: bool,
    /// When set, every request fails with 503
    pub outage: bool,
    next_id: i64,
    clock_base: DateTime<Utc>,
    clock_seq: i64,
}

impl ConsoleState {
    fn seeded() -> Self {
        let clock_base = DateTime::parse_from_rfc3339("2025-06-01T08:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        Self {
            users: vec![
                FakeUser {
                    id: 1,
                    email: "lead@example.com".into(),
                    password: "lead-pass".into(),
                    display_name: Some("Ana Lead".into()),
                },
                FakeUser {
                    id: 2,
                    email: "dev@example.com".into(),
                    password: "dev-pass".into(),
                    display_name: Some("Sam Dev".into()),
                },
                FakeUser {
                    id: 3,
                    email: "other@example.com".into(),
                    password: "other-pass".into(),
                    display_name: None,
                },
            ],
            tasks: vec![
                FakeTask {
                    id: 41,
                    title: "Quarterly VAT filing".into(),
                    description: Some("Collect invoices and file before the deadline".into()),
                    is_urgent: true,
                    is_important: true,
                    deadline: Some("2025-06-30T17:00:00+00:00".into()),
                },
                FakeTask {
                    id: 42,
                    title: "Update fleet insurance sheet".into(),
                    description: None,
                    is_urgent: false,
                    is_important: false,
                    deadline: None,
                },
                FakeTask {
                    id: 43,
                    title: "Migrate contact exports".into(),
                    description: None,
                    is_urgent: true,
                    is_important: false,
                    deadline: None,
                },
            ],
            assignments: Vec::new(),
            conversations: Vec::new(),
            calls: Vec::new(),
            notifications: Vec::new(),
            tokens_revoked: false,
            outage: false,
            next_id: 100,
            clock_base,
            clock_seq: 0,
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Logical clock: every event gets a distinct, strictly increasing
    /// timestamp so ordering assertions can never tie by accident.
    fn next_instant(&mut self) -> DateTime<Utc> {
        let instant = self.clock_base + chrono::Duration::seconds(self.clock_seq);
        self.clock_seq += 1;
        instant
    }

    fn notify(
        &mut self,
        user_id: i64,
        kind: &str,
        title: &str,
        message: &str,
        assignment_id: Option<i64>,
    ) {
        let id = self.next_id();
        let created_at = self.next_instant();
        self.notifications.push(FakeNotification {
            id,
            user_id,
            kind: kind.into(),
            title: title.into(),
            message: message.into(),
            assignment_id,
            is_read: false,
            created_at,
        });
    }
}

// ── JSON emitters (handwritten wire shapes) ─────────────────────────────

fn user_json(user: &FakeUser) -> Value {
    json!({
        "id": user.id,
        "email": user.email,
        "display_name": user.display_name,
    })
}

fn assignment_json(state: &ConsoleState, assignment: &FakeAssignment) -> Value {
    let task = state
        .tasks
        .iter()
        .find(|t| t.id == assignment.task_id)
        .expect("assignment references a seeded task");
    json!({
        "id": assignment.id,
        "task": {
            "id": task.id,
            "title": task.title,
            "description": task.description,
            "is_urgent": task.is_urgent,
            "is_important": task.is_important,
            "deadline": task.deadline,
        },
        "assigned_to": assignment.assigned_to,
        "assigned_by": assignment.assigned_by,
        "assignment_message": assignment.message,
        "assigned_at": assignment.assigned_at.to_rfc3339(),
        "status": assignment.status,
        "response_at": assignment.response_at.map(|t| t.to_rfc3339()),
        "rejection_reason": assignment.rejection_reason,
    })
}

fn message_json(message: &FakeMessage) -> Value {
    json!({
        "id": message.id,
        "sender": message.sender,
        "content": message.content,
        "message_type": message.message_type,
        "sent_at": message.sent_at.to_rfc3339(),
        "read_at": null,
        "is_system_message": message.is_system,
    })
}

fn conversation_json(conversation: &FakeConversation) -> Value {
    json!({
        "assignment_id": conversation.assignment_id,
        "status": conversation.status,
        "messages": conversation.messages.iter().map(message_json).collect::<Vec<_>>(),
        "completed_by": conversation.completed_by,
        "completed_at": conversation.completed_at.map(|t| t.to_rfc3339()),
    })
}

fn call_json(call: &FakeCall) -> Value {
    json!({
        "id": call.id,
        "assignment_id": call.assignment_id,
        "scheduled_time": call.scheduled_time,
        "notes": call.notes,
        "completed": call.completed,
    })
}

fn notification_json(notification: &FakeNotification) -> Value {
    json!({
        "id": notification.id,
        "notification_type": notification.kind,
        "title": notification.title,
        "message": notification.message,
        "assignment_id": notification.assignment_id,
        "is_read": notification.is_read,
        "created_at": notification.created_at.to_rfc3339(),
    })
}

fn error(status: u16, detail: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "detail": detail }))
}

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

// ── Request routing ─────────────────────────────────────────────────────

const KNOWN_STATUSES: [&str; 6] = [
    "pending_acceptance",
    "accepted",
    "rejected",
    "discussion_requested",
    "discussion_active",
    "discussion_completed",
];

struct ConsoleResponder {
    state: Arc<Mutex<ConsoleState>>,
}

impl Respond for ConsoleResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        route(&mut state, request)
    }
}

fn bearer_user(state: &ConsoleState, request: &Request) -> Result<i64, ResponseTemplate> {
    if state.tokens_revoked {
        return Err(error(401, "Token has expired"));
    }
    let header = request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok());
    let Some(token) = header.and_then(|h| h.strip_prefix("Bearer ")) else {
        return Err(error(401, "Not authenticated"));
    };
    token
        .strip_prefix("token-user-")
        .and_then(|id| id.parse::<i64>().ok())
        .filter(|id| state.users.iter().any(|u| u.id == *id))
        .ok_or_else(|| error(401, "Could not validate credentials"))
}

fn body_value(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap_or(Value::Null)
}

fn query_map(request: &Request) -> HashMap<String, String> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn route(state: &mut ConsoleState, request: &Request) -> ResponseTemplate {
    if state.outage {
        return error(503, "Service unavailable");
    }

    let path = request.url.path().trim_start_matches('/').to_string();
    let segments: Vec<&str> = path.split('/').collect();
    let method = request.method.as_str();

    if method == "POST" && segments.as_slice() == ["auth", "login"] {
        return handle_login(state, &body_value(request));
    }

    let user_id = match bearer_user(state, request) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match (method, segments.as_slice()) {
        ("GET", ["auth", "me"]) => {
            let user = state.users.iter().find(|u| u.id == user_id).unwrap();
            ok(user_json(user))
        }
        ("POST", ["task-management", "assign"]) => {
            handle_assign(state, user_id, &body_value(request))
        }
        ("GET", ["task-management", "assignments", "pending"]) => {
            // Insertion order on purpose: display order is the client's concern
            let rows: Vec<Value> = state
                .assignments
                .iter()
                .filter(|a| a.assigned_to == user_id && a.status == "pending_acceptance")
                .map(|a| assignment_json(state, a))
                .collect();
            ok(Value::Array(rows))
        }
        ("GET", ["task-management", "assignments", id]) => {
            handle_get_assignment(state, user_id, id)
        }
        ("POST", ["task-management", "assignments", id, "respond"]) => {
            handle_respond(state, user_id, id, &body_value(request))
        }
        ("POST", ["task-management", "assignments", id, "schedule-call"]) => {
            handle_schedule_call(state, user_id, id, &body_value(request))
        }
        ("POST", ["task-management", "assignments", id, "complete-call"]) => {
            handle_complete_call(state, user_id, id, &body_value(request))
        }
        ("GET", ["task-management", "my-assignments"]) => {
            handle_my_assignments(state, user_id, &query_map(request))
        }
        ("GET", ["task-management", "conversations", id]) => {
            handle_get_conversation(state, user_id, id)
        }
        ("POST", ["task-management", "conversations", id, "messages"]) => {
            handle_send_message(state, user_id, id, &body_value(request))
        }
        ("POST", ["task-management", "conversations", id, "complete"]) => {
            handle_complete_conversation(state, user_id, id, &body_value(request))
        }
        ("GET", ["task-management", "notifications"]) => {
            handle_notifications(state, user_id, &query_map(request))
        }
        ("PUT", ["task-management", "notifications", id, "read"]) => {
            handle_mark_read(state, user_id, id)
        }
        ("GET", ["task-management", "summary"]) => handle_summary(state, user_id),
        _ => error(404, "Not found"),
    }
}

fn handle_login(state: &ConsoleState, body: &Value) -> ResponseTemplate {
    let email = body.get("email").and_then(Value::as_str).unwrap_or("");
    let password = body.get("password").and_then(Value::as_str).unwrap_or("");

    let Some(user) = state
        .users
        .iter()
        .find(|u| u.email == email && u.password == password)
    else {
        return error(401, "Incorrect email or password");
    };

    ok(json!({
        "access_token": format!("token-user-{}", user.id),
        "token_type": "bearer",
        "user": user_json(user),
    }))
}

fn handle_assign(state: &mut ConsoleState, user_id: i64, body: &Value) -> ResponseTemplate {
    let task_id = body.get("task_id").and_then(Value::as_i64).unwrap_or(0);
    let assigned_to = body.get("assigned_to").and_then(Value::as_i64).unwrap_or(0);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    let Some(task_title) = state
        .tasks
        .iter()
        .find(|t| t.id == task_id)
        .map(|t| t.title.clone())
    else {
        return error(404, "Task not found");
    };
    if !state.users.iter().any(|u| u.id == assigned_to) {
        return error(404, "User not found");
    }

    let id = state.next_id();
    let assigned_at = state.next_instant();
    state.assignments.push(FakeAssignment {
        id,
        task_id,
        assigned_to,
        assigned_by: user_id,
        message,
        assigned_at,
        status: "pending_acceptance".into(),
        response_at: None,
        rejection_reason: None,
    });
    state.notify(
        assigned_to,
        "assignment_received",
        "New task assignment",
        &format!("You have been assigned '{task_title}'"),
        Some(id),
    );

    let assignment = state.assignments.iter().find(|a| a.id == id).unwrap();
    ok(assignment_json(state, assignment))
}

fn visible_assignment_index(
    state: &ConsoleState,
    user_id: i64,
    raw_id: &str,
) -> Result<usize, ResponseTemplate> {
    let id: i64 = raw_id
        .parse()
        .map_err(|_| error(404, "Assignment not found"))?;
    state
        .assignments
        .iter()
        .position(|a| a.id == id && (a.assigned_to == user_id || a.assigned_by == user_id))
        .ok_or_else(|| error(404, "Assignment not found"))
}

fn handle_get_assignment(state: &ConsoleState, user_id: i64, raw_id: &str) -> ResponseTemplate {
    match visible_assignment_index(state, user_id, raw_id) {
        Ok(idx) => ok(assignment_json(state, &state.assignments[idx])),
        Err(response) => response,
    }
}

fn handle_respond(
    state: &mut ConsoleState,
    user_id: i64,
    raw_id: &str,
    body: &Value,
) -> ResponseTemplate {
    let idx = match visible_assignment_index(state, user_id, raw_id) {
        Ok(idx) => idx,
        Err(response) => return response,
    };
    if state.assignments[idx].assigned_to != user_id {
        return error(403, "Only the assignee may respond");
    }
    if state.assignments[idx].status != "pending_acceptance" {
        return error(409, "Assignment is not awaiting a response");
    }

    let action = body.get("action").and_then(Value::as_str).unwrap_or("");
    let assignment_id = state.assignments[idx].id;
    let assigned_by = state.assignments[idx].assigned_by;
    let response_at = state.next_instant();

    match action {
        "accept" => {
            state.assignments[idx].status = "accepted".into();
            state.assignments[idx].response_at = Some(response_at);
            state.notify(
                assigned_by,
                "assignment_accepted",
                "Assignment accepted",
                "Your assignment was accepted",
                Some(assignment_id),
            );
        }
        "reject" => {
            let reason = body
                .get("rejection_reason")
                .and_then(Value::as_str)
                .unwrap_or("");
            if reason.trim().is_empty() {
                return error(422, "Rejection reason is required");
            }
            state.assignments[idx].status = "rejected".into();
            state.assignments[idx].response_at = Some(response_at);
            state.assignments[idx].rejection_reason = Some(reason.to_owned());
            state.notify(
                assigned_by,
                "assignment_rejected",
                "Assignment rejected",
                "Your assignment was rejected",
                Some(assignment_id),
            );
        }
        "discuss" => {
            // The transient discussion_requested state is resolved
            // server-side; clients only ever observe discussion_active.
            state.assignments[idx].status = "discussion_active".into();
            state.assignments[idx].response_at = Some(response_at);
            let mut conversation = FakeConversation {
                assignment_id,
                status: "active".into(),
                messages: Vec::new(),
                completed_by: None,
                completed_at: None,
            };
            if let Some(opening) = body.get("message").and_then(Value::as_str) {
                if !opening.trim().is_empty() {
                    let message_id = state.next_id();
                    let sent_at = state.next_instant();
                    conversation.messages.push(FakeMessage {
                        id: message_id,
                        sender: user_id,
                        content: opening.to_owned(),
                        message_type: "text".into(),
                        sent_at,
                        is_system: false,
                    });
                }
            }
            state.conversations.push(conversation);
            state.notify(
                assigned_by,
                "discussion_requested",
                "Discussion requested",
                "The assignee would like to discuss the assignment",
                Some(assignment_id),
            );
        }
        _ => return error(422, "Unknown response action"),
    }

    ok(assignment_json(state, &state.assignments[idx]))
}

fn handle_my_assignments(
    state: &ConsoleState,
    user_id: i64,
    query: &HashMap<String, String>,
) -> ResponseTemplate {
    let assigned_by_me = query.get("assigned_by_me").map(String::as_str) == Some("true");
    let status_filter = query.get("status_filter").map(String::as_str);
    if let Some(status) = status_filter {
        if !KNOWN_STATUSES.contains(&status) {
            return error(422, "Invalid status filter");
        }
    }

    let rows: Vec<Value> = state
        .assignments
        .iter()
        .filter(|a| {
            if assigned_by_me {
                a.assigned_by == user_id
            } else {
                a.assigned_to == user_id
            }
        })
        .filter(|a| status_filter.is_none_or(|status| a.status == status))
        .map(|a| assignment_json(state, a))
        .collect();
    ok(Value::Array(rows))
}

fn conversation_access(
    state: &ConsoleState,
    user_id: i64,
    raw_id: &str,
) -> Result<usize, ResponseTemplate> {
    let assignment_id: i64 = raw_id
        .parse()
        .map_err(|_| error(404, "Conversation not found"))?;
    let Some(assignment) = state.assignments.iter().find(|a| a.id == assignment_id) else {
        return Err(error(404, "Conversation not found"));
    };
    if assignment.assigned_to != user_id && assignment.assigned_by != user_id {
        return Err(error(403, "Not a participant in this conversation"));
    }
    state
        .conversations
        .iter()
        .position(|c| c.assignment_id == assignment_id)
        .ok_or_else(|| error(404, "Conversation not found"))
}

fn handle_get_conversation(state: &ConsoleState, user_id: i64, raw_id: &str) -> ResponseTemplate {
    match conversation_access(state, user_id, raw_id) {
        Ok(idx) => ok(conversation_json(&state.conversations[idx])),
        Err(response) => response,
    }
}

fn handle_send_message(
    state: &mut ConsoleState,
    user_id: i64,
    raw_id: &str,
    body: &Value,
) -> ResponseTemplate {
    let idx = match conversation_access(state, user_id, raw_id) {
        Ok(idx) => idx,
        Err(response) => return response,
    };
    if state.conversations[idx].status == "completed" {
        return error(409, "Conversation is completed");
    }
    let content = body.get("content").and_then(Value::as_str).unwrap_or("");
    if content.trim().is_empty() {
        return error(422, "Message content is required");
    }
    let message_type = body
        .get("message_type")
        .and_then(Value::as_str)
        .unwrap_or("text")
        .to_owned();

    let assignment_id = state.conversations[idx].assignment_id;
    let message_id = state.next_id();
    let sent_at = state.next_instant();
    let message = FakeMessage {
        id: message_id,
        sender: user_id,
        content: content.to_owned(),
        message_type,
        sent_at,
        is_system: false,
    };
    let rendered = message_json(&message);
    state.conversations[idx].messages.push(message);

    let assignment = state
        .assignments
        .iter()
        .find(|a| a.id == assignment_id)
        .unwrap();
    let recipient = if assignment.assigned_to == user_id {
        assignment.assigned_by
    } else {
        assignment.assigned_to
    };
    state.notify(
        recipient,
        "new_message",
        "New message",
        content,
        Some(assignment_id),
    );

    ok(rendered)
}

fn handle_complete_conversation(
    state: &mut ConsoleState,
    user_id: i64,
    raw_id: &str,
    body: &Value,
) -> ResponseTemplate {
    let idx = match conversation_access(state, user_id, raw_id) {
        Ok(idx) => idx,
        Err(response) => return response,
    };
    if state.conversations[idx].status == "completed" {
        return error(409, "Conversation is completed");
    }

    let assignment_id = state.conversations[idx].assignment_id;
    if let Some(final_message) = body.get("final_message").and_then(Value::as_str) {
        if !final_message.trim().is_empty() {
            let message_id = state.next_id();
            let sent_at = state.next_instant();
            state.conversations[idx].messages.push(FakeMessage {
                id: message_id,
                sender: user_id,
                content: final_message.to_owned(),
                message_type: "text".into(),
                sent_at,
                is_system: false,
            });
        }
    }

    let completed_at = state.next_instant();
    state.conversations[idx].status = "completed".into();
    state.conversations[idx].completed_by = Some(user_id);
    state.conversations[idx].completed_at = Some(completed_at);

    let assignment_idx = state
        .assignments
        .iter()
        .position(|a| a.id == assignment_id)
        .unwrap();
    state.assignments[assignment_idx].status = "discussion_completed".into();
    let recipient = if state.assignments[assignment_idx].assigned_to == user_id {
        state.assignments[assignment_idx].assigned_by
    } else {
        state.assignments[assignment_idx].assigned_to
    };
    state.notify(
        recipient,
        "discussion_completed",
        "Discussion completed",
        "The discussion was completed",
        Some(assignment_id),
    );

    ok(conversation_json(&state.conversations[idx]))
}

fn handle_schedule_call(
    state: &mut ConsoleState,
    user_id: i64,
    raw_id: &str,
    body: &Value,
) -> ResponseTemplate {
    let idx = match visible_assignment_index(state, user_id, raw_id) {
        Ok(idx) => idx,
        Err(response) => return response,
    };
    let assignment_id = state.assignments[idx].id;
    let active_conversation = state
        .conversations
        .iter()
        .position(|c| c.assignment_id == assignment_id && c.status == "active");
    let Some(conversation_idx) = active_conversation else {
        return error(409, "Discussion is not active");
    };

    let Some(scheduled_time) = body
        .get("scheduled_time")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
    else {
        return error(422, "Call time is required");
    };
    let notes = body
        .get("notes")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    let call_id = state.next_id();
    state.calls.push(FakeCall {
        id: call_id,
        assignment_id,
        scheduled_time: scheduled_time.clone(),
        notes,
        completed: false,
    });

    let message_id = state.next_id();
    let sent_at = state.next_instant();
    state.conversations[conversation_idx]
        .messages
        .push(FakeMessage {
            id: message_id,
            sender: 0,
            content: format!("Call scheduled for {scheduled_time}"),
            message_type: "call_scheduled".into(),
            sent_at,
            is_system: true,
        });

    let recipient = if state.assignments[idx].assigned_to == user_id {
        state.assignments[idx].assigned_by
    } else {
        state.assignments[idx].assigned_to
    };
    state.notify(
        recipient,
        "call_scheduled",
        "Call scheduled",
        &format!("A call was scheduled for {scheduled_time}"),
        Some(assignment_id),
    );

    let call = state.calls.iter().find(|c| c.id == call_id).unwrap();
    ok(call_json(call))
}

fn handle_complete_call(
    state: &mut ConsoleState,
    user_id: i64,
    raw_id: &str,
    body: &Value,
) -> ResponseTemplate {
    let idx = match visible_assignment_index(state, user_id, raw_id) {
        Ok(idx) => idx,
        Err(response) => return response,
    };
    let assignment_id = state.assignments[idx].id;
    let Some(call_idx) = state
        .calls
        .iter()
        .rposition(|c| c.assignment_id == assignment_id && !c.completed)
    else {
        return error(404, "No pending call to complete");
    };

    state.calls[call_idx].completed = true;
    if let Some(notes) = body.get("notes").and_then(Value::as_str) {
        if !notes.trim().is_empty() {
            state.calls[call_idx].notes = Some(notes.to_owned());
        }
    }

    if let Some(conversation_idx) = state
        .conversations
        .iter()
        .position(|c| c.assignment_id == assignment_id)
    {
        let message_id = state.next_id();
        let sent_at = state.next_instant();
        state.conversations[conversation_idx]
            .messages
            .push(FakeMessage {
                id: message_id,
                sender: 0,
                content: "Call completed".into(),
                message_type: "call_completed".into(),
                sent_at,
                is_system: true,
            });
    }

    let recipient = if state.assignments[idx].assigned_to == user_id {
        state.assignments[idx].assigned_by
    } else {
        state.assignments[idx].assigned_to
    };
    state.notify(
        recipient,
        "call_completed",
        "Call completed",
        "The scheduled call was held",
        Some(assignment_id),
    );

    ok(call_json(&state.calls[call_idx]))
}

fn handle_notifications(
    state: &ConsoleState,
    user_id: i64,
    query: &HashMap<String, String>,
) -> ResponseTemplate {
    let unread_only = query.get("unread_only").map(String::as_str) == Some("true");
    let limit = query
        .get("limit")
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(usize::MAX);

    let mut rows: Vec<&FakeNotification> = state
        .notifications
        .iter()
        .filter(|n| n.user_id == user_id)
        .filter(|n| !unread_only || !n.is_read)
        .collect();
    // Newest first before the limit truncates, like the real feed
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows.truncate(limit);

    ok(Value::Array(
        rows.iter().map(|n| notification_json(n)).collect(),
    ))
}

fn handle_mark_read(state: &mut ConsoleState, user_id: i64, raw_id: &str) -> ResponseTemplate {
    let Ok(id) = raw_id.parse::<i64>() else {
        return error(404, "Notification not found");
    };
    let Some(notification) = state
        .notifications
        .iter_mut()
        .find(|n| n.id == id && n.user_id == user_id)
    else {
        return error(404, "Notification not found");
    };
    notification.is_read = true;
    ResponseTemplate::new(204)
}

fn handle_summary(state: &ConsoleState, user_id: i64) -> ResponseTemplate {
    let pending_assignments = state
        .assignments
        .iter()
        .filter(|a| a.assigned_to == user_id && a.status == "pending_acceptance")
        .count();
    let active_discussions = state
        .assignments
        .iter()
        .filter(|a| {
            (a.assigned_to == user_id || a.assigned_by == user_id)
                && a.status == "discussion_active"
        })
        .count();
    let pending_calls = state
        .calls
        .iter()
        .filter(|c| !c.completed)
        .filter(|c| {
            state.assignments.iter().any(|a| {
                a.id == c.assignment_id && (a.assigned_to == user_id || a.assigned_by == user_id)
            })
        })
        .count();
    let total_assigned_to_me = state
        .assignments
        .iter()
        .filter(|a| a.assigned_to == user_id)
        .count();

    ok(json!({
        "pending_assignments": pending_assignments,
        "active_discussions": active_discussions,
        "pending_calls": pending_calls,
        "total_assigned_to_me": total_assigned_to_me,
    }))
}

// ── Test harness ────────────────────────────────────────────────────────

/// Stateful wiremock double of the console's task-management API
pub struct FakeConsole {
    pub server: MockServer,
    state: Arc<Mutex<ConsoleState>>,
}

impl FakeConsole {
    pub async fn start() -> Self {
        init_test_logging();
        let server = MockServer::start().await;
        let state = Arc::new(Mutex::new(ConsoleState::seeded()));
        Mock::given(any())
            .respond_with(ConsoleResponder {
                state: Arc::clone(&state),
            })
            .mount(&server)
            .await;
        Self { server, state }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn state(&self) -> MutexGuard<'_, ConsoleState> {
        self.state.lock().unwrap()
    }

    /// Make every authenticated request fail like an expired token
    pub fn revoke_tokens(&self) {
        self.state().tokens_revoked = true;
    }

    pub fn set_outage(&self, outage: bool) {
        self.state().outage = outage;
    }
}

/// A fake console plus a client context wired to it.
///
/// Credential files live in a per-harness temp directory so tests never
/// touch the real user configuration and never see each other's sessions.
pub struct TestHarness {
    pub console: FakeConsole,
    pub ctx: ClientContext,
    creds_dir: TempDir,
}

impl TestHarness {
    pub async fn start() -> Self {
        let console = FakeConsole::start().await;
        let creds_dir = tempfile::tempdir().expect("temp dir for credentials");
        let ctx = build_context(&console, &creds_dir, "primary");
        Self {
            console,
            ctx,
            creds_dir,
        }
    }

    /// A second, independently-authenticated context against the same
    /// console. Used to act as the other party in a workflow.
    pub fn new_context(&self, name: &str) -> ClientContext {
        build_context(&self.console, &self.creds_dir, name)
    }

    pub fn credentials_path(&self, name: &str) -> std::path::PathBuf {
        self.creds_dir.path().join(format!("{name}.json"))
    }
}

fn build_context(console: &FakeConsole, creds_dir: &TempDir, name: &str) -> ClientContext {
    let mut config = ClientConfig::new(console.uri().parse().expect("mock server URI"));
    config.credentials_path = Some(creds_dir.path().join(format!("{name}.json")));
    config.poll_interval = Duration::from_millis(50);
    ClientContext::new(config)
}

pub async fn sign_in_lead(ctx: &ClientContext) -> UserProfile {
    ctx.auth()
        .login("lead@example.com", "lead-pass")
        .await
        .expect("lead login")
}

pub async fn sign_in_dev(ctx: &ClientContext) -> UserProfile {
    ctx.auth()
        .login("dev@example.com", "dev-pass")
        .await
        .expect("dev login")
}

pub async fn sign_in_other(ctx: &ClientContext) -> UserProfile {
    ctx.auth()
        .login("other@example.com", "other-pass")
        .await
        .expect("other login")
}
