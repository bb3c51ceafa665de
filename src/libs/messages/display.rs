//! Display implementation for taskdir messages.
//!
//! All message text is defined here, in one place. Flash notifications,
//! validation errors and log lines are produced by formatting a [`Message`]
//! variant, so the wording stays consistent between the web pages and the
//! server log.
//!
//! ```rust
//! use taskdir::libs::messages::Message;
//!
//! assert_eq!(Message::FieldRequired.to_string(), "This field is required.");
//! assert_eq!(Message::FieldTooLong(50).to_string(), "Field cannot be longer than 50 characters.");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskSaved => "Task saved.".to_string(),
            Message::TaskStatusUpdated => "Task status updated.".to_string(),
            Message::TaskDeleted => "Task deleted.".to_string(),
            Message::TaskNotFound => "The requested task does not exist.".to_string(),
            Message::TaskCreatedWithId(id) => format!("Task {} created", id),
            Message::TaskUpdatedWithId(id) => format!("Task {} updated", id),
            Message::TaskToggled { id, completed } => {
                format!("Task {} marked as {}", id, if *completed { "completed" } else { "active" })
            }
            Message::TaskSoftDeleted(id) => format!("Task {} moved to deleted", id),
            Message::TaskUpdateTargetMissing(id) => format!("Update rejected: task '{}' does not exist", id),

            // === DIRECTORY MESSAGES ===
            Message::DirectorySaved => "Directory saved.".to_string(),
            Message::DirectoryDeleted => "Directory deleted.".to_string(),
            Message::DirectoryNotFound => "The requested directory does not exist.".to_string(),
            Message::DirectoryCreatedWithId(id) => format!("Directory {} created", id),
            Message::DirectoryUpdatedWithId(id) => format!("Directory {} updated", id),
            Message::DirectoryRemoved { id, detached } => {
                format!("Directory {} removed, {} task(s) moved to unfiled", id, detached)
            }
            Message::DirectoryUpdateTargetMissing(id) => format!("Update rejected: directory '{}' does not exist", id),
            Message::UnfiledDirectory => "Unfiled".to_string(),

            // === VALIDATION MESSAGES ===
            Message::FieldRequired => "This field is required.".to_string(),
            Message::FieldTooLong(max) => format!("Field cannot be longer than {} characters.", max),
            Message::InvalidDateTime => "Not a valid datetime value, expected YYYY-MM-DD HH:MM.".to_string(),
            Message::InvalidChoice => "Not a valid choice.".to_string(),

            // === DATABASE MESSAGES ===
            Message::DatabaseOpened(path) => format!("Using database at {}", path),
            Message::SchemaReady => "Database schema is ready".to_string(),
            Message::SchemaInitFailed(e) => format!("Failed to initialize database schema: {}", e),
            Message::DatabaseTaskPanicked(e) => format!("Database worker panicked: {}", e),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigLoaded(path) => format!("Configuration loaded from {}", path),
            Message::ConfigFileNotFound => "Configuration file not found, using defaults".to_string(),
            Message::InvalidPortOverride(value) => format!("Ignoring invalid port override '{}'", value),
            Message::ConfigSaved => "Configuration saved".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("Listening on http://{}", addr),
            Message::ServerShuttingDown => "Shutting down server".to_string(),
            Message::ServerReceivedCtrlC => "Received Ctrl-C".to_string(),
            Message::ServerReceivedSigterm => "Received SIGTERM".to_string(),
            Message::RequestFailed(e) => format!("Request failed: {}", e),
            Message::SignalHandlerFailed(e) => format!("Failed to install signal handler: {}", e),

            // === SECURITY MESSAGES ===
            Message::CsrfRejected { path, reason } => format!("Rejected request to {}: {}", path, reason),
            Message::SessionStarted => "Started new session".to_string(),
            Message::SessionsEvicted(count) => format!("Evicted {} idle sessions", count),
        };

        write!(f, "{}", s)
    }
}
