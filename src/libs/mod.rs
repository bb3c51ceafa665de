//! Core library modules for the taskdir application.
//!
//! Domain types ([`task`], [`directory`]) and form handling ([`forms`]) know
//! nothing about HTTP. Sessions, flashes and CSRF tokens live here as well so
//! they can be tested without a running server.

pub mod config;
pub mod csrf;
pub mod data_storage;
pub mod directory;
pub mod flash;
pub mod forms;
pub mod messages;
pub mod metadata;
pub mod session;
pub mod task;
pub mod view;
