//! Event logging subsystem for scrip.
//!
//! This module implements append-only event logging to support audit and
//! traceability. Events are stored in NDJSON format (one JSON object per
//! line) in `.scrip/events/events.ndjson`.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The action performed (init, new, issue, verify, etc.)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `rx`: Optional prescription ID for record-specific events
//! - `details`: Freeform object with action-specific details

use crate::context::StoreContext;
use crate::error::{Result, ScripError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Store initialization
    Init,
    /// Draft record created
    New,
    /// Validation run against a record
    Validate,
    /// Record issued (DRAFT -> ISSUED)
    Issue,
    /// Record verified and dispensed (ISSUED -> DISPENSED)
    Verify,
    /// Dose intake logged
    Dose,
    /// Store audit run
    Audit,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Init => write!(f, "init"),
            EventAction::New => write!(f, "new"),
            EventAction::Validate => write!(f, "validate"),
            EventAction::Issue => write!(f, "issue"),
            EventAction::Verify => write!(f, "verify"),
            EventAction::Dose => write!(f, "dose"),
            EventAction::Audit => write!(f, "audit"),
        }
    }
}

/// An event record for the audit log.
///
/// Events are serialized as single-line JSON objects and appended to
/// the events.ndjson file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Optional prescription ID for record-specific events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            rx: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the prescription ID for this event.
    pub fn with_rx(mut self, rx_id: impl Into<String>) -> Self {
        self.rx = Some(rx_id.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            ScripError::StoreError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
pub fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the events log.
///
/// This function appends the event as a single JSON line to the
/// events.ndjson file. The file is created if it doesn't exist; each append
/// results in one line with a trailing newline.
pub fn append_event(ctx: &StoreContext, event: &Event) -> Result<()> {
    let events_file = ctx.events_file();

    let json_line = event.to_ndjson_line()?;

    let events_dir = ctx.events_dir();
    if !events_dir.exists() {
        fs::create_dir_all(&events_dir).map_err(|e| {
            ScripError::StoreError(format!(
                "failed to create events directory '{}': {}",
                events_dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            ScripError::StoreError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        ScripError::StoreError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    // Sync to disk for durability
    file.sync_all().map_err(|e| {
        ScripError::StoreError(format!(
            "failed to sync events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_store;
    use serde_json::json;

    #[test]
    fn test_event_creation() {
        let event = Event::new(EventAction::Init);

        assert_eq!(event.action, EventAction::Init);
        assert!(!event.actor.is_empty());
        assert!(event.rx.is_none());
        // Timestamp should be recent (within last minute)
        let age = Utc::now().signed_duration_since(event.ts);
        assert!(age.num_minutes() < 1);
    }

    #[test]
    fn test_event_with_rx_and_details() {
        let event = Event::new(EventAction::Issue)
            .with_rx("RX-001")
            .with_details(json!({"safety_score": 70, "issues": 1}));

        assert_eq!(event.rx, Some("RX-001".to_string()));
        assert_eq!(event.details["safety_score"], 70);
    }

    #[test]
    fn test_event_serialization_is_single_line() {
        let event = Event::new(EventAction::Verify)
            .with_rx("RX-001")
            .with_details(json!({"stored_score": 70, "recomputed_score": 70}));

        let json_line = event.to_ndjson_line().unwrap();

        assert!(!json_line.contains('\n'));
        let parsed: Event = serde_json::from_str(&json_line).unwrap();
        assert_eq!(parsed.action, EventAction::Verify);
        assert_eq!(parsed.rx, Some("RX-001".to_string()));
    }

    #[test]
    fn test_event_action_serializes_snake_case() {
        let event = Event::new(EventAction::Dose);
        let json_line = event.to_ndjson_line().unwrap();
        assert!(json_line.contains("\"dose\""));
    }

    #[test]
    fn test_event_without_rx_omits_field() {
        let event = Event::new(EventAction::Init);
        let json_line = event.to_ndjson_line().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json_line).unwrap();
        assert!(parsed.get("rx").is_none());
    }

    #[test]
    fn test_append_event_creates_file_and_dir() {
        let (_temp, ctx) = create_test_store();
        std::fs::remove_dir_all(ctx.events_dir()).ok();
        let events_file = ctx.events_file();
        assert!(!events_file.exists());

        let event = Event::new(EventAction::Init);
        append_event(&ctx, &event).unwrap();

        assert!(events_file.exists());
        let content = fs::read_to_string(&events_file).unwrap();
        assert!(content.ends_with('\n'));
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_append_event_multiple_lines() {
        let (_temp, ctx) = create_test_store();

        append_event(&ctx, &Event::new(EventAction::Init)).unwrap();
        append_event(&ctx, &Event::new(EventAction::New).with_rx("RX-001")).unwrap();

        let content = fs::read_to_string(ctx.events_file()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: Event = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.action, EventAction::New);
        assert_eq!(second.rx, Some("RX-001".to_string()));
    }

    #[test]
    fn test_actor_string_format() {
        let actor = actor_string();
        assert!(actor.contains('@'));
    }

    #[test]
    fn test_event_action_display() {
        assert_eq!(format!("{}", EventAction::Init), "init");
        assert_eq!(format!("{}", EventAction::New), "new");
        assert_eq!(format!("{}", EventAction::Validate), "validate");
        assert_eq!(format!("{}", EventAction::Issue), "issue");
        assert_eq!(format!("{}", EventAction::Verify), "verify");
        assert_eq!(format!("{}", EventAction::Dose), "dose");
        assert_eq!(format!("{}", EventAction::Audit), "audit");
    }
}
