//! # taskdir
//!
//! A single-user to-do web application. Tasks carry a due date, an optional
//! tag and an optional directory; they can be completed and soft deleted.
//! Directories group tasks, and deleting one moves its tasks back to
//! "unfiled" instead of removing them.
//!
//! ## Layout
//!
//! - [`db`]: SQLite schema and repositories
//! - [`libs`]: domain types, forms, sessions, CSRF, configuration and messages
//! - [`web`]: axum router, handlers and page models
//! - [`commands`]: command-line entry points
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdir::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod web;
