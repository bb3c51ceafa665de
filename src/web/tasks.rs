//! Task pages: list, create/update form, edit, toggle and soft delete.

use super::error::AppError;
use super::pages::{IndexPage, Layout, TaskFormPage};
use super::AppState;
use crate::db::directories::Directories;
use crate::db::tasks::Tasks;
use crate::libs::directory::Directory;
use crate::libs::flash::Flash;
use crate::libs::forms::{FormErrors, TaskForm};
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::libs::task::{TaskFilter, TaskStatus};
use crate::{msg_info, msg_success, msg_warning};
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use chrono::Utc;
use serde::Deserialize;

/// Query parameters of the list view.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub tag: Option<String>,
    pub directory: Option<String>,
}

impl ListQuery {
    /// Empty values mean "no filter". The tag is matched as given, spaces
    /// included. A directory value that is not an integer is ignored.
    pub fn to_filter(&self) -> TaskFilter {
        TaskFilter {
            status: TaskStatus::parse_or_default(self.status.as_deref()),
            tag: self.tag.as_deref().filter(|t| !t.is_empty()).map(str::to_string),
            directory_id: self.directory.as_deref().and_then(|d| d.trim().parse().ok()),
        }
    }
}

/// Outcome of a task form submission.
enum SaveTask {
    Invalid {
        form: TaskForm,
        errors: FormErrors,
        directories: Vec<Directory>,
    },
    Missing(String),
    Created(i64),
    Updated(i64),
}

/// `GET /`
pub async fn index(State(state): State<AppState>, Extension(session): Extension<Session>, Query(query): Query<ListQuery>) -> Result<Html<String>, AppError> {
    let filter = query.to_filter();
    let fetch_filter = filter.clone();
    let (tasks, directories) = state
        .store
        .transaction(move |tx| {
            let tasks = Tasks::new(tx).fetch(&fetch_filter)?;
            let directories = Directories::new(tx).list()?;
            Ok((tasks, directories))
        })
        .await?;

    let page = IndexPage::new(Layout::new(&session), tasks, directories, filter);
    Ok(Html(state.view.render("index.html", page)?))
}

/// `GET /todo`
pub async fn new_form(State(state): State<AppState>, Extension(session): Extension<Session>) -> Result<Html<String>, AppError> {
    let directories = state.store.transaction(|tx| Directories::new(tx).list()).await?;
    let form = TaskForm::blank(Utc::now().naive_utc());

    let page = TaskFormPage::new(Layout::new(&session), form, FormErrors::default(), &directories);
    Ok(Html(state.view.render("todo_form.html", page)?))
}

/// `POST /todo`
///
/// A non-empty `id` field updates that task; an `id` naming no task is
/// refused with a notification and nothing is created in its place.
pub async fn save(State(state): State<AppState>, Extension(session): Extension<Session>, Form(form): Form<TaskForm>) -> Result<Response, AppError> {
    let now = Utc::now().naive_utc();
    let outcome = state
        .store
        .transaction(move |tx| {
            let directories = Directories::new(tx).list()?;
            let input = match form.validate(&directories, now) {
                Ok(input) => input,
                Err(errors) => return Ok(SaveTask::Invalid { form, errors, directories }),
            };

            let tasks = Tasks::new(tx);
            let Some(raw_id) = &input.id else {
                let id = tasks.insert(&input.to_new_task())?;
                return Ok(SaveTask::Created(id));
            };
            let existing = match raw_id.parse::<i64>() {
                Ok(id) => tasks.get_by_id(id)?.map(|task| (id, task)),
                Err(_) => None,
            };
            let Some((id, mut task)) = existing else {
                return Ok(SaveTask::Missing(raw_id.clone()));
            };
            input.apply_to(&mut task);
            tasks.update(&task)?;
            Ok(SaveTask::Updated(id))
        })
        .await?;

    match outcome {
        SaveTask::Invalid { form, errors, directories } => {
            let page = TaskFormPage::new(Layout::new(&session), form, errors, &directories);
            Ok(Html(state.view.render("todo_form.html", page)?).into_response())
        }
        SaveTask::Missing(raw_id) => {
            msg_warning!(Message::TaskUpdateTargetMissing(raw_id));
            session.flash(Flash::danger(Message::TaskNotFound));
            Ok(Redirect::to("/").into_response())
        }
        SaveTask::Created(id) => {
            msg_success!(Message::TaskCreatedWithId(id));
            session.flash(Flash::success(Message::TaskSaved));
            Ok(Redirect::to("/").into_response())
        }
        SaveTask::Updated(id) => {
            msg_success!(Message::TaskUpdatedWithId(id));
            session.flash(Flash::success(Message::TaskSaved));
            Ok(Redirect::to("/").into_response())
        }
    }
}

/// `GET /todo/{id}/edit`
pub async fn edit(State(state): State<AppState>, Extension(session): Extension<Session>, Path(id): Path<i64>) -> Result<Html<String>, AppError> {
    let (task, directories) = state
        .store
        .transaction(move |tx| {
            let task = Tasks::new(tx).get_by_id(id)?;
            let directories = Directories::new(tx).list()?;
            Ok((task, directories))
        })
        .await?;
    let task = task.ok_or(AppError::NotFound)?;

    let page = TaskFormPage::new(Layout::new(&session), TaskForm::from_task(&task), FormErrors::default(), &directories);
    Ok(Html(state.view.render("todo_form.html", page)?))
}

/// `POST /todo/{id}/toggle`
pub async fn toggle(State(state): State<AppState>, Extension(session): Extension<Session>, Path(id): Path<i64>) -> Result<Redirect, AppError> {
    let completed = state
        .store
        .transaction(move |tx| {
            let tasks = Tasks::new(tx);
            let Some(mut task) = tasks.get_by_id(id)? else {
                return Ok(None);
            };
            task.completed = !task.completed;
            tasks.update(&task)?;
            Ok(Some(task.completed))
        })
        .await?
        .ok_or(AppError::NotFound)?;

    msg_info!(Message::TaskToggled { id, completed });
    session.flash(Flash::info(Message::TaskStatusUpdated));
    Ok(Redirect::to("/"))
}

/// `POST /todo/{id}/delete`
///
/// Marks the task deleted. Deleting an already deleted task succeeds again.
pub async fn delete(State(state): State<AppState>, Extension(session): Extension<Session>, Path(id): Path<i64>) -> Result<Redirect, AppError> {
    state
        .store
        .transaction(move |tx| {
            let tasks = Tasks::new(tx);
            let Some(mut task) = tasks.get_by_id(id)? else {
                return Ok(None);
            };
            task.deleted = true;
            tasks.update(&task)?;
            Ok(Some(()))
        })
        .await?
        .ok_or(AppError::NotFound)?;

    msg_info!(Message::TaskSoftDeleted(id));
    session.flash(Flash::warning(Message::TaskDeleted));
    Ok(Redirect::to("/"))
}
