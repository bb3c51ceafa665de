//! Database layer for the taskdir application.
//!
//! Persistence is built on SQLite through `rusqlite`. The [`db::Store`]
//! handle is the only entry point the web layer sees: it opens a connection
//! per unit of work and runs that work in a single transaction. The
//! repositories borrow the connection (or transaction) they operate on.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdir::db::{db::Store, tasks::Tasks};
//! use taskdir::libs::task::{TaskFilter, TaskStatus};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Store::new("taskdir.db");
//! store.init()?;
//! let active = store
//!     .transaction(|tx| Tasks::new(tx).fetch(&TaskFilter::status(TaskStatus::Active)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Connection setup and the per-request [`db::Store`] handle.
pub mod db;

/// Directory CRUD and the detach-then-delete operation.
pub mod directories;

/// Idempotent creation of the `task` and `directory` tables.
pub mod schema;

/// Task CRUD and filtered listing.
pub mod tasks;
