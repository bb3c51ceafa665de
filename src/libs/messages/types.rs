/// Every user-facing and log-facing text in the application.
///
/// Variants are grouped by the area that emits them. The text itself lives in
/// the `Display` implementation in `display.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskSaved,
    TaskStatusUpdated,
    TaskDeleted,
    TaskNotFound,
    TaskCreatedWithId(i64),
    TaskUpdatedWithId(i64),
    TaskToggled { id: i64, completed: bool },
    TaskSoftDeleted(i64),
    TaskUpdateTargetMissing(String),

    // === DIRECTORY MESSAGES ===
    DirectorySaved,
    DirectoryDeleted,
    DirectoryNotFound,
    DirectoryCreatedWithId(i64),
    DirectoryUpdatedWithId(i64),
    DirectoryRemoved { id: i64, detached: usize },
    DirectoryUpdateTargetMissing(String),
    UnfiledDirectory,

    // === VALIDATION MESSAGES ===
    FieldRequired,
    FieldTooLong(usize),
    InvalidDateTime,
    InvalidChoice,

    // === DATABASE MESSAGES ===
    DatabaseOpened(String),
    SchemaReady,
    SchemaInitFailed(String),
    DatabaseTaskPanicked(String),

    // === CONFIGURATION MESSAGES ===
    ConfigLoaded(String),
    ConfigFileNotFound,
    InvalidPortOverride(String),
    ConfigSaved,

    // === SERVER MESSAGES ===
    ServerListening(String),
    ServerShuttingDown,
    ServerReceivedCtrlC,
    ServerReceivedSigterm,
    RequestFailed(String),
    SignalHandlerFailed(String),

    // === SECURITY MESSAGES ===
    CsrfRejected { path: String, reason: String },
    SessionStarted,
    SessionsEvicted(usize),
}
