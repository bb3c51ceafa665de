//! Idempotent schema creation.
//!
//! Every statement is `CREATE ... IF NOT EXISTS`, so running [`init_schema`]
//! against an existing database is a no-op and never drops rows.

use crate::libs::messages::Message;
use crate::{msg_error, msg_info};
use anyhow::Result;
use rusqlite::Connection;

const SCHEMA_DIRECTORY: &str = "CREATE TABLE IF NOT EXISTS directory (
    id INTEGER NOT NULL PRIMARY KEY,
    name VARCHAR(100) NOT NULL
)";
const SCHEMA_TASK: &str = "CREATE TABLE IF NOT EXISTS task (
    id INTEGER NOT NULL PRIMARY KEY,
    title VARCHAR(150) NOT NULL,
    description TEXT,
    due_date DATETIME NOT NULL,
    tag VARCHAR(50),
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    deleted BOOLEAN NOT NULL DEFAULT FALSE,
    directory_id INTEGER REFERENCES directory(id)
)";
const INDEX_TASK_DUE_DATE: &str = "CREATE INDEX IF NOT EXISTS idx_task_due_date ON task(due_date)";
const INDEX_TASK_DIRECTORY: &str = "CREATE INDEX IF NOT EXISTS idx_task_directory_id ON task(directory_id)";

/// Creates the `directory` and `task` tables and their indices.
pub fn init_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    for statement in [SCHEMA_DIRECTORY, SCHEMA_TASK, INDEX_TASK_DUE_DATE, INDEX_TASK_DIRECTORY] {
        if let Err(e) = tx.execute(statement, []) {
            msg_error!(Message::SchemaInitFailed(e.to_string()));
            return Err(e.into());
        }
    }

    tx.commit()?;
    msg_info!(Message::SchemaReady);
    Ok(())
}
