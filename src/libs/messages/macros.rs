//! Convenient macros for application logging.
//!
//! Each macro takes anything that implements `Display` (usually a
//! [`Message`](super::Message)) and forwards it to `tracing` at the matching
//! level, with the same prefixes the pages use for notification levels.
//!
//! ## Macro Categories
//!
//! - **`msg_info!`**, **`msg_success!`**, **`msg_warning!`**: informational events
//! - **`msg_error!`**: failures that end a request
//! - **`msg_debug!`**: verbose diagnostics, accepts `format!` arguments
//! - **`msg_error_anyhow!`**, **`msg_bail_anyhow!`**: build or return `anyhow::Error`
//!
//! ```rust
//! use taskdir::{msg_info, msg_error_anyhow};
//! use taskdir::libs::messages::Message;
//!
//! msg_info!(Message::SchemaReady);
//! let err = msg_error_anyhow!(Message::TaskNotFound);
//! assert!(err.to_string().contains("does not exist"));
//! ```

/// Logs an informational message.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        tracing::info!("{}", $msg)
    };
}

/// Logs a success message with ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        tracing::info!("✅ {}", $msg)
    };
}

/// Logs a warning with ⚠️ prefix.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        tracing::warn!("⚠️ {}", $msg)
    };
}

/// Logs an error with ❌ prefix.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        tracing::error!("❌ {}", $msg)
    };
}

/// Logs a debug line. Accepts either a single displayable value or
/// `format!`-style arguments.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        tracing::debug!("🔍 {}", $msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        tracing::debug!("🔍 {}", format!($fmt, $($arg)*))
    };
}

/// Creates an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
