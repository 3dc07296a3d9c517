use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::ServerError;

// Per-thread connection cache, keyed by database path so that test
// databases on the same thread don't bleed into each other.
thread_local! {
    static DB_CONNS: RefCell<HashMap<String, Connection>> = RefCell::new(HashMap::new());
}

/// Cheap, cloneable handle to a SQLite database. Each server worker thread
/// lazily opens (and then reuses) its own connection.
#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut conns = cell.borrow_mut();
                if !conns.contains_key(&self.path) {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| ServerError::DbError(format!("open db failed: {e}")))?;
                    conn.pragma_update(None, "foreign_keys", true)
                        .map_err(|e| ServerError::DbError(format!("pragma failed: {e}")))?;
                    conns.insert(self.path.clone(), conn);
                }
                let conn = conns
                    .get_mut(&self.path)
                    .ok_or(ServerError::InternalError)?;
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

/// Initialize database from a SQL schema file, creating the parent
/// directory for file-backed databases first.
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), ServerError> {
    if let Some(parent) = Path::new(db.path()).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| ServerError::DbError(format!("create db dir failed: {e}")))?;
        }
    }

    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("read schema file failed: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| ServerError::DbError(format!("apply schema failed: {e}")))
    })
}
