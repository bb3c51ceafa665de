//! Form input for tasks and directories.
//!
//! Forms hold exactly what the browser submitted, as strings, so a rejected
//! submission can be rendered back unchanged. Validation turns a form into a
//! typed input value or into a set of field errors, and never touches the
//! database. The "unfiled" sentinel `0` of the directory select exists only
//! here: validated input carries `Option<i64>`.

use super::directory::{Directory, NAME_MAX_LEN};
use super::messages::Message;
use super::task::{Task, TAG_MAX_LEN, TITLE_MAX_LEN};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accepted `due_date` format, e.g. `2025-03-15 14:30`.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Directory select value meaning "no directory".
pub const UNFILED: i64 = 0;

/// Field name to error text for a rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: Message) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    /// Hidden field, non-empty when editing an existing task.
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub tag: String,
    pub directory_id: String,
}

/// Validated task submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInput {
    /// Raw identifier of the task to update; `None` creates a new task.
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub tag: Option<String>,
    pub directory_id: Option<i64>,
}

impl TaskForm {
    /// Empty creation form with the due date preset to `now`.
    pub fn blank(now: NaiveDateTime) -> Self {
        TaskForm {
            due_date: now.format(DUE_DATE_FORMAT).to_string(),
            directory_id: UNFILED.to_string(),
            ..Default::default()
        }
    }

    /// Prefilled edit form for a stored task.
    pub fn from_task(task: &Task) -> Self {
        TaskForm {
            id: task.id.map(|id| id.to_string()).unwrap_or_default(),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date.format(DUE_DATE_FORMAT).to_string(),
            tag: task.tag.clone().unwrap_or_default(),
            directory_id: task.directory_id.unwrap_or(UNFILED).to_string(),
        }
    }

    /// Validates the submission against the known `directories`. A missing
    /// due date becomes `now`.
    pub fn validate(&self, directories: &[Directory], now: NaiveDateTime) -> Result<TaskInput, FormErrors> {
        let mut errors = FormErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", Message::FieldRequired);
        } else if title.chars().count() > TITLE_MAX_LEN {
            errors.add("title", Message::FieldTooLong(TITLE_MAX_LEN));
        }

        let due_date = match self.due_date.trim() {
            "" => Some(now),
            value => match NaiveDateTime::parse_from_str(value, DUE_DATE_FORMAT) {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    errors.add("due_date", Message::InvalidDateTime);
                    None
                }
            },
        };

        let tag = non_empty(&self.tag);
        if tag.as_ref().is_some_and(|t| t.chars().count() > TAG_MAX_LEN) {
            errors.add("tag", Message::FieldTooLong(TAG_MAX_LEN));
        }

        let directory_id = match self.directory_id.trim() {
            "" => Some(None),
            value => match value.parse::<i64>() {
                Ok(UNFILED) => Some(None),
                Ok(id) if directories.iter().any(|d| d.id == Some(id)) => Some(Some(id)),
                _ => {
                    errors.add("directory_id", Message::InvalidChoice);
                    None
                }
            },
        };

        match (due_date, directory_id) {
            (Some(due_date), Some(directory_id)) if errors.is_empty() => Ok(TaskInput {
                id: non_empty(&self.id),
                title: title.to_string(),
                description: non_empty(&self.description).map(|_| self.description.clone()),
                due_date,
                tag,
                directory_id,
            }),
            _ => Err(errors),
        }
    }
}

impl TaskInput {
    /// Copies the submitted fields onto `task`, leaving its id and its
    /// completed/deleted flags untouched.
    pub fn apply_to(&self, task: &mut Task) {
        task.title = self.title.clone();
        task.description = self.description.clone();
        task.due_date = self.due_date;
        task.tag = self.tag.clone();
        task.directory_id = self.directory_id;
    }

    pub fn to_new_task(&self) -> Task {
        let mut task = Task::new(&self.title, self.due_date);
        self.apply_to(&mut task);
        task
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryForm {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryInput {
    pub id: Option<String>,
    pub name: String,
}

impl DirectoryForm {
    pub fn from_directory(directory: &Directory) -> Self {
        DirectoryForm {
            id: directory.id.map(|id| id.to_string()).unwrap_or_default(),
            name: directory.name.clone(),
        }
    }

    pub fn validate(&self) -> Result<DirectoryInput, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", Message::FieldRequired);
        } else if name.chars().count() > NAME_MAX_LEN {
            errors.add("name", Message::FieldTooLong(NAME_MAX_LEN));
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(DirectoryInput {
            id: non_empty(&self.id),
            name: name.to_string(),
        })
    }
}

/// Select options for the task form, "Unfiled" first.
pub fn directory_choices(directories: &[Directory]) -> Vec<(i64, String)> {
    let mut choices = vec![(UNFILED, Message::UnfiledDirectory.to_string())];
    choices.extend(directories.iter().filter_map(|d| d.id.map(|id| (id, d.name.clone()))));
    choices
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap().and_hms_opt(8, 15, 30).unwrap()
    }

    fn work() -> Vec<Directory> {
        vec![Directory {
            id: Some(3),
            name: "Work".to_string(),
        }]
    }

    fn form(title: &str) -> TaskForm {
        TaskForm {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_title_is_required() {
        let errors = form("   ").validate(&work(), now()).unwrap_err();
        assert_eq!(errors.get("title"), Some("This field is required."));
    }

    #[test]
    fn test_title_length_limit() {
        let errors = form(&"x".repeat(TITLE_MAX_LEN + 1)).validate(&work(), now()).unwrap_err();
        assert_eq!(errors.get("title"), Some("Field cannot be longer than 150 characters."));
        assert!(form(&"x".repeat(TITLE_MAX_LEN)).validate(&work(), now()).is_ok());
    }

    #[test]
    fn test_missing_due_date_defaults_to_now() {
        let input = form("Write report").validate(&work(), now()).unwrap();
        assert_eq!(input.due_date, now());
        assert_eq!(input.id, None);
        assert_eq!(input.directory_id, None);
    }

    #[test]
    fn test_due_date_format() {
        let mut f = form("Write report");
        f.due_date = "2025-03-15 14:30".to_string();
        let input = f.validate(&work(), now()).unwrap();
        assert_eq!(input.due_date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap().and_hms_opt(14, 30, 0).unwrap());

        f.due_date = "15/03/2025".to_string();
        let errors = f.validate(&work(), now()).unwrap_err();
        assert!(errors.get("due_date").is_some());
        assert!(errors.get("title").is_none());
    }

    #[test]
    fn test_directory_sentinel_and_choices() {
        let mut f = form("Write report");
        f.directory_id = "0".to_string();
        assert_eq!(f.validate(&work(), now()).unwrap().directory_id, None);

        f.directory_id = "3".to_string();
        assert_eq!(f.validate(&work(), now()).unwrap().directory_id, Some(3));

        f.directory_id = "4".to_string();
        assert_eq!(f.validate(&work(), now()).unwrap_err().get("directory_id"), Some("Not a valid choice."));

        f.directory_id = "abc".to_string();
        assert!(f.validate(&work(), now()).is_err());
    }

    #[test]
    fn test_tag_limit_and_blank_fields() {
        let mut f = form("Write report");
        f.tag = "  ".to_string();
        f.description = "\n".to_string();
        let input = f.validate(&work(), now()).unwrap();
        assert_eq!(input.tag, None);
        assert_eq!(input.description, None);

        f.tag = "t".repeat(TAG_MAX_LEN + 1);
        assert!(f.validate(&work(), now()).unwrap_err().get("tag").is_some());
    }

    #[test]
    fn test_from_task_maps_unfiled_to_sentinel() {
        let mut task = Task::new("Write report", now());
        task.id = Some(9);
        let f = TaskForm::from_task(&task);
        assert_eq!(f.id, "9");
        assert_eq!(f.directory_id, "0");
        assert_eq!(f.due_date, "2025-01-02 08:15");

        task.directory_id = Some(3);
        assert_eq!(TaskForm::from_task(&task).directory_id, "3");
    }

    #[test]
    fn test_apply_keeps_flags() {
        let mut task = Task::new("Old", now());
        task.id = Some(1);
        task.completed = true;
        let input = form("New").validate(&work(), now()).unwrap();
        input.apply_to(&mut task);
        assert_eq!(task.title, "New");
        assert_eq!(task.id, Some(1));
        assert!(task.completed);
    }

    #[test]
    fn test_directory_form() {
        let errors = DirectoryForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("This field is required."));

        let input = DirectoryForm {
            id: " 4 ".to_string(),
            name: " Work ".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(input.id.as_deref(), Some("4"));
        assert_eq!(input.name, "Work");
    }

    #[test]
    fn test_directory_choices() {
        let choices = directory_choices(&work());
        assert_eq!(choices, vec![(0, "Unfiled".to_string()), (3, "Work".to_string())]);
    }
}
