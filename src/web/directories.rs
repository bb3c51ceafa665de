//! Directory page: list, create/rename form and delete.

use super::error::AppError;
use super::pages::{DirectoryPage, Layout};
use super::AppState;
use crate::db::directories::Directories;
use crate::libs::directory::Directory;
use crate::libs::flash::Flash;
use crate::libs::forms::{DirectoryForm, FormErrors};
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::{msg_success, msg_warning};
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use serde::Deserialize;

const DIRECTORY_VIEW: &str = "/directory";

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    /// Id of the directory to prefill the form with.
    pub edit: Option<i64>,
}

enum SaveDirectory {
    Invalid {
        form: DirectoryForm,
        errors: FormErrors,
        directories: Vec<Directory>,
    },
    Missing(String),
    Created(i64),
    Updated(i64),
}

/// `GET /directory`
pub async fn index(State(state): State<AppState>, Extension(session): Extension<Session>, Query(query): Query<DirectoryQuery>) -> Result<Html<String>, AppError> {
    let (editing, directories) = state
        .store
        .transaction(move |tx| {
            let directories = Directories::new(tx);
            let editing = match query.edit {
                Some(id) => Some(directories.get_by_id(id)?),
                None => None,
            };
            Ok((editing, directories.list()?))
        })
        .await?;

    let form = match editing {
        Some(Some(directory)) => DirectoryForm::from_directory(&directory),
        Some(None) => return Err(AppError::NotFound),
        None => DirectoryForm::default(),
    };

    let page = DirectoryPage {
        layout: Layout::new(&session),
        form,
        errors: FormErrors::default(),
        directories,
    };
    Ok(Html(state.view.render("directory_form.html", page)?))
}

/// `POST /directory`
pub async fn save(State(state): State<AppState>, Extension(session): Extension<Session>, Form(form): Form<DirectoryForm>) -> Result<Response, AppError> {
    let outcome = state
        .store
        .transaction(move |tx| {
            let directories = Directories::new(tx);
            let input = match form.validate() {
                Ok(input) => input,
                Err(errors) => {
                    let directories = directories.list()?;
                    return Ok(SaveDirectory::Invalid { form, errors, directories });
                }
            };

            let Some(raw_id) = input.id else {
                let id = directories.insert(&Directory::new(&input.name))?;
                return Ok(SaveDirectory::Created(id));
            };
            let existing = match raw_id.parse::<i64>() {
                Ok(id) => directories.get_by_id(id)?.map(|directory| (id, directory)),
                Err(_) => None,
            };
            let Some((id, mut directory)) = existing else {
                return Ok(SaveDirectory::Missing(raw_id));
            };
            directory.name = input.name;
            directories.update(&directory)?;
            Ok(SaveDirectory::Updated(id))
        })
        .await?;

    match outcome {
        SaveDirectory::Invalid { form, errors, directories } => {
            let page = DirectoryPage {
                layout: Layout::new(&session),
                form,
                errors,
                directories,
            };
            Ok(Html(state.view.render("directory_form.html", page)?).into_response())
        }
        SaveDirectory::Missing(raw_id) => {
            msg_warning!(Message::DirectoryUpdateTargetMissing(raw_id));
            session.flash(Flash::danger(Message::DirectoryNotFound));
            Ok(Redirect::to(DIRECTORY_VIEW).into_response())
        }
        SaveDirectory::Created(id) => {
            msg_success!(Message::DirectoryCreatedWithId(id));
            session.flash(Flash::success(Message::DirectorySaved));
            Ok(Redirect::to(DIRECTORY_VIEW).into_response())
        }
        SaveDirectory::Updated(id) => {
            msg_success!(Message::DirectoryUpdatedWithId(id));
            session.flash(Flash::success(Message::DirectorySaved));
            Ok(Redirect::to(DIRECTORY_VIEW).into_response())
        }
    }
}

/// `POST /directory/{id}/delete`
///
/// Tasks filed under the directory become unfiled; they are never removed.
pub async fn delete(State(state): State<AppState>, Extension(session): Extension<Session>, Path(id): Path<i64>) -> Result<Redirect, AppError> {
    let detached = state
        .store
        .transaction(move |tx| {
            let directories = Directories::new(tx);
            if directories.get_by_id(id)?.is_none() {
                return Ok(None);
            }
            directories.delete(id).map(Some)
        })
        .await?
        .ok_or(AppError::NotFound)?;

    msg_warning!(Message::DirectoryRemoved { id, detached });
    session.flash(Flash::warning(Message::DirectoryDeleted));
    Ok(Redirect::to(DIRECTORY_VIEW))
}
