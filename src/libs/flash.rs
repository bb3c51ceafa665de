//! One-shot notifications carried across a redirect.
//!
//! A handler that finishes a mutation queues a [`Flash`] on the session and
//! redirects. The next page render takes the queued flashes out of the
//! session, so each one is displayed exactly once.

use super::messages::Message;
use serde::Serialize;

/// Severity tier of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn new(level: Level, message: Message) -> Self {
        Flash {
            level,
            message: message.to_string(),
        }
    }

    pub fn success(message: Message) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn info(message: Message) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn warning(message: Message) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn danger(message: Message) -> Self {
        Self::new(Level::Danger, message)
    }
}
