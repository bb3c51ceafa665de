//! HTTP interface.
//!
//! Handlers translate requests into store operations and answer with either
//! a rendered page or a redirect carrying a one-shot notification. Every
//! route sits behind [`middleware::session_layer`], so a handler always finds
//! a [`Session`](crate::libs::session::Session) in its request extensions
//! and never sees a state-changing request with a bad CSRF token.

pub mod directories;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod tasks;

use crate::db::db::Store;
use crate::libs::config::SessionConfig;
use crate::libs::session::SessionStore;
use crate::libs::view::View;
use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub sessions: SessionStore,
    pub view: Arc<View>,
    pub session_config: SessionConfig,
}

impl AppState {
    pub fn new(store: Store, session_config: SessionConfig) -> Result<Self> {
        Ok(AppState {
            store,
            sessions: SessionStore::from_config(&session_config),
            view: Arc::new(View::new()?),
            session_config,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(tasks::index))
        .route("/todo", get(tasks::new_form).post(tasks::save))
        .route("/todo/{id}/edit", get(tasks::edit))
        .route("/todo/{id}/toggle", post(tasks::toggle))
        .route("/todo/{id}/delete", post(tasks::delete))
        .route("/directory", get(directories::index).post(directories::save))
        .route("/directory/{id}/delete", post(directories::delete))
        .route("/healthz", get(healthz))
        .layer(axum::middleware::from_fn_with_state(state.clone(), middleware::session_layer))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
