use super::schema;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error_anyhow};
use anyhow::Result;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a unit of work waits for another one holding the write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A single SQLite connection with foreign keys enforced.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open(path: &Path) -> Result<Db> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", true)?;

        Ok(Db { conn })
    }
}

/// Handle to the database file, shared by all request handlers.
///
/// The store itself holds no connection. Each unit of work opens its own
/// connection, runs inside one transaction and closes the connection when it
/// finishes, so a request never sees state left behind by another one.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates missing tables. Existing rows are left untouched, so this is
    /// safe to call on every start.
    pub fn init(&self) -> Result<()> {
        let mut db = self.open()?;
        schema::init_schema(&mut db.conn)
    }

    pub fn open(&self) -> Result<Db> {
        msg_debug!(Message::DatabaseOpened(self.path.display().to_string()));
        Db::open(&self.path)
    }

    /// Runs `work` inside one transaction on a blocking worker thread.
    ///
    /// The transaction commits when `work` returns `Ok` and rolls back when it
    /// returns `Err`. It begins `IMMEDIATE`: a unit of work reads before it
    /// writes, and two deferred transactions upgrading their read locks at the
    /// same time would fail with `SQLITE_BUSY` instead of waiting.
    pub async fn transaction<F, T>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut db = store.open()?;
            let tx = db.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let value = work(&tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await
        .map_err(|e| msg_error_anyhow!(Message::DatabaseTaskPanicked(e.to_string())))?
    }
}
