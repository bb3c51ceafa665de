use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskFilter, TaskStatus};
use crate::msg_bail_anyhow;
use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const TASK_COLUMNS: &str = "id, title, description, due_date, tag, completed, deleted, directory_id";
const INSERT_TASK: &str = "INSERT INTO task (title, description, due_date, tag, completed, deleted, directory_id)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_TASK: &str = "UPDATE task
    SET title = ?2, description = ?3, due_date = ?4, tag = ?5, completed = ?6, deleted = ?7, directory_id = ?8
    WHERE id = ?1";
const DETACH_DIRECTORY: &str = "UPDATE task SET directory_id = NULL WHERE directory_id = ?1";
const ORDER_BY_DUE_DATE: &str = "ORDER BY due_date ASC, id ASC";

/// Task queries over a borrowed connection or transaction.
pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Tasks { conn }
    }

    /// Inserts a new task and returns its generated id.
    pub fn insert(&self, task: &Task) -> Result<i64> {
        self.conn.execute(
            INSERT_TASK,
            params![task.title, task.description, task.due_date, task.tag, task.completed, task.deleted, task.directory_id],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Returns `Ok(None)` when no task has the given id.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        self.conn
            .query_row(&format!("SELECT {} FROM task WHERE id = ?1", TASK_COLUMNS), params![id], task_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Lists tasks matching every part of `filter`, earliest due date first.
    pub fn fetch(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        match filter.status {
            TaskStatus::All => {}
            TaskStatus::Active => clauses.push("deleted = FALSE AND completed = FALSE"),
            TaskStatus::Completed => clauses.push("deleted = FALSE AND completed = TRUE"),
            TaskStatus::Deleted => clauses.push("deleted = TRUE"),
        }
        if let Some(tag) = &filter.tag {
            clauses.push("tag LIKE ? ESCAPE '\\'");
            values.push(Value::Text(format!("%{}%", escape_like(tag))));
        }
        if let Some(directory_id) = filter.directory_id {
            clauses.push("directory_id = ?");
            values.push(Value::Integer(directory_id));
        }

        let mut sql = format!("SELECT {} FROM task", TASK_COLUMNS);
        if !clauses.is_empty() {
            sql = format!("{} WHERE {}", sql, clauses.join(" AND "));
        }
        sql = format!("{} {}", sql, ORDER_BY_DUE_DATE);

        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt.query_map(params_from_iter(values.iter()), task_from_row)?.collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    /// Replaces every stored field of an existing task.
    pub fn update(&self, task: &Task) -> Result<()> {
        let Some(id) = task.id else {
            msg_bail_anyhow!(Message::TaskNotFound);
        };
        let affected = self.conn.execute(
            UPDATE_TASK,
            params![id, task.title, task.description, task.due_date, task.tag, task.completed, task.deleted, task.directory_id],
        )?;
        if affected == 0 {
            msg_bail_anyhow!(Message::TaskNotFound);
        }

        Ok(())
    }

    /// Moves every task of a directory to unfiled and returns how many moved.
    pub fn detach_directory(&self, directory_id: i64) -> Result<usize> {
        Ok(self.conn.execute(DETACH_DIRECTORY, params![directory_id])?)
    }
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        tag: row.get(4)?,
        completed: row.get(5)?,
        deleted: row.get(6)?,
        directory_id: row.get(7)?,
    })
}

/// Escapes `LIKE` wildcards so the filter matches the text literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
