use super::tasks::Tasks;
use crate::libs::directory::Directory;
use crate::libs::messages::Message;
use crate::msg_bail_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_DIRECTORY: &str = "INSERT INTO directory (name) VALUES (?1)";
const UPDATE_DIRECTORY: &str = "UPDATE directory SET name = ?2 WHERE id = ?1";
const DELETE_DIRECTORY: &str = "DELETE FROM directory WHERE id = ?1";
const SELECT_ALL_DIRECTORIES: &str = "SELECT id, name FROM directory ORDER BY id";
const SELECT_DIRECTORY_BY_ID: &str = "SELECT id, name FROM directory WHERE id = ?1";

/// Directory queries over a borrowed connection or transaction.
pub struct Directories<'a> {
    conn: &'a Connection,
}

impl<'a> Directories<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Directories { conn }
    }

    /// Create a new directory
    pub fn insert(&self, directory: &Directory) -> Result<i64> {
        self.conn.execute(INSERT_DIRECTORY, params![directory.name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a directory by ID
    pub fn get_by_id(&self, id: i64) -> Result<Option<Directory>> {
        self.conn
            .query_row(SELECT_DIRECTORY_BY_ID, params![id], directory_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Get all directories in insertion order
    pub fn list(&self) -> Result<Vec<Directory>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_DIRECTORIES)?;
        let directories = stmt.query_map([], directory_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(directories)
    }

    /// Update an existing directory
    pub fn update(&self, directory: &Directory) -> Result<()> {
        let Some(id) = directory.id else {
            msg_bail_anyhow!(Message::DirectoryNotFound);
        };
        let affected = self.conn.execute(UPDATE_DIRECTORY, params![id, directory.name])?;
        if affected == 0 {
            msg_bail_anyhow!(Message::DirectoryNotFound);
        }
        Ok(())
    }

    /// Moves the directory's tasks to unfiled, then removes the directory.
    ///
    /// Both steps run under one savepoint: either both apply or neither does.
    /// The savepoint nests inside a surrounding transaction when there is one.
    /// Returns the number of detached tasks.
    pub fn delete(&self, id: i64) -> Result<usize> {
        self.conn.execute_batch("SAVEPOINT delete_directory")?;

        match self.detach_and_delete(id) {
            Ok(detached) => {
                self.conn.execute_batch("RELEASE delete_directory")?;
                Ok(detached)
            }
            Err(e) => {
                self.conn.execute_batch("ROLLBACK TO delete_directory; RELEASE delete_directory")?;
                Err(e)
            }
        }
    }

    fn detach_and_delete(&self, id: i64) -> Result<usize> {
        let detached = Tasks::new(self.conn).detach_directory(id)?;
        let affected = self.conn.execute(DELETE_DIRECTORY, params![id])?;
        if affected == 0 {
            msg_bail_anyhow!(Message::DirectoryNotFound);
        }
        Ok(detached)
    }
}

fn directory_from_row(row: &Row) -> rusqlite::Result<Directory> {
    Ok(Directory {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}
