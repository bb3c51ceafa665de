use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TITLE_MAX_LEN: usize = 150;
pub const TAG_MAX_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub tag: Option<String>,
    pub completed: bool,
    pub deleted: bool,
    /// `None` means the task is unfiled.
    pub directory_id: Option<i64>,
}

impl Task {
    pub fn new(title: &str, due_date: NaiveDateTime) -> Self {
        Task {
            id: None,
            title: title.to_string(),
            description: None,
            due_date,
            tag: None,
            completed: false,
            deleted: false,
            directory_id: None,
        }
    }
}

/// Status selector of the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Every task, deleted ones included.
    #[default]
    All,
    /// Not completed and not deleted.
    Active,
    /// Completed and not deleted.
    Completed,
    /// Soft-deleted, regardless of completion.
    Deleted,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::All => "all",
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
            TaskStatus::Deleted => "deleted",
        }
    }

    /// Parses a query value, treating anything unknown as [`TaskStatus::All`].
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TaskStatus::All),
            "active" => Ok(TaskStatus::Active),
            "completed" => Ok(TaskStatus::Completed),
            "deleted" => Ok(TaskStatus::Deleted),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combination of list filters; every field narrows the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub status: TaskStatus,
    /// Substring of the tag, matched case-insensitively for ASCII.
    pub tag: Option<String>,
    pub directory_id: Option<i64>,
}

impl TaskFilter {
    pub fn status(status: TaskStatus) -> Self {
        TaskFilter { status, ..Default::default() }
    }
}
