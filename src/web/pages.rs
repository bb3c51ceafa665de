//! View models handed to the templates.
//!
//! Every page carries a [`Layout`], which takes the session's pending flashes
//! when it is built. Building a page is therefore what clears a one-shot
//! notification.

use crate::libs::directory::Directory;
use crate::libs::flash::Flash;
use crate::libs::forms::{directory_choices, DirectoryForm, FormErrors, TaskForm, DUE_DATE_FORMAT};
use crate::libs::metadata::{APP_METADATA_NAME, APP_METADATA_VERSION};
use crate::libs::session::Session;
use crate::libs::task::{Task, TaskFilter};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Layout {
    pub app_name: &'static str,
    pub app_version: &'static str,
    pub flashes: Vec<Flash>,
    pub csrf_token: String,
}

impl Layout {
    pub fn new(session: &Session) -> Self {
        Layout {
            app_name: APP_METADATA_NAME,
            app_version: APP_METADATA_VERSION,
            flashes: session.take_flashes(),
            csrf_token: session.csrf_token(),
        }
    }
}

/// One row of the task table.
#[derive(Debug, Serialize)]
pub struct TaskRow {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
    pub tag: Option<String>,
    pub completed: bool,
    pub deleted: bool,
    /// Name of the directory, `None` when unfiled.
    pub directory: Option<String>,
}

impl TaskRow {
    fn new(task: Task, directories: &[Directory]) -> Self {
        let directory = task
            .directory_id
            .and_then(|id| directories.iter().find(|d| d.id == Some(id)))
            .map(|d| d.name.clone());

        TaskRow {
            id: task.id,
            due_date: task.due_date.format(DUE_DATE_FORMAT).to_string(),
            title: task.title,
            description: task.description,
            tag: task.tag,
            completed: task.completed,
            deleted: task.deleted,
            directory,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexPage {
    #[serde(flatten)]
    pub layout: Layout,
    pub tasks: Vec<TaskRow>,
    pub directories: Vec<Directory>,
    pub status: &'static str,
    pub tag_filter: Option<String>,
    pub directory_filter: Option<i64>,
}

impl IndexPage {
    pub fn new(layout: Layout, tasks: Vec<Task>, directories: Vec<Directory>, filter: TaskFilter) -> Self {
        let tasks = tasks.into_iter().map(|task| TaskRow::new(task, &directories)).collect();
        IndexPage {
            layout,
            tasks,
            directories,
            status: filter.status.as_str(),
            tag_filter: filter.tag,
            directory_filter: filter.directory_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskFormPage {
    #[serde(flatten)]
    pub layout: Layout,
    pub form: TaskForm,
    pub errors: FormErrors,
    pub choices: Vec<(i64, String)>,
}

impl TaskFormPage {
    pub fn new(layout: Layout, form: TaskForm, errors: FormErrors, directories: &[Directory]) -> Self {
        TaskFormPage {
            layout,
            form,
            errors,
            choices: directory_choices(directories),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DirectoryPage {
    #[serde(flatten)]
    pub layout: Layout,
    pub form: DirectoryForm,
    pub errors: FormErrors,
    pub directories: Vec<Directory>,
}
