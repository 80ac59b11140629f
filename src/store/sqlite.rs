use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use tracing::debug;

use crate::error::Result;
use crate::store::{bootstrap, CatalogStore, Row, SqlValue};

/// SQLite-backed catalog store. The emulated catalog relations are plain
/// SQLite tables created by [`bootstrap`]; the engine only ever reads them.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    timeout: Mutex<Option<Duration>>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_FULL_MUTEX
            | OpenFlags::SQLITE_OPEN_URI;
        let conn = Connection::open_with_flags(path, flags)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            timeout: Mutex::new(None),
        }
    }

    /// Create the emulated catalog relations if they do not exist yet
    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute_batch(bootstrap::CATALOG_SCHEMA)?;
        Ok(())
    }

    /// Run arbitrary statements against the backing database. Used by
    /// fixture loading and the CLI's init path, not by the engine itself.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute_batch(sql)?;
        Ok(())
    }

    pub fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<usize> {
        let conn = self.conn.lock();
        let affected = conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(affected)
    }
}

impl CatalogStore for SqliteStore {
    fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        let conn = self.conn.lock();
        let Some(limit) = *self.timeout.lock() else {
            return run_query(&conn, sql, params);
        };

        // A watchdog thread interrupts the statement once the deadline
        // passes; joining it before returning keeps the interrupt from
        // landing on a later statement.
        let handle = conn.get_interrupt_handle();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let watchdog = thread::spawn(move || {
            if done_rx.recv_timeout(limit).is_err() {
                handle.interrupt();
            }
        });
        let result = run_query(&conn, sql, params);
        let _ = done_tx.send(());
        let _ = watchdog.join();
        result
    }

    fn set_statement_timeout(&self, timeout: Duration) -> Result<()> {
        debug!(timeout_ms = timeout.as_millis() as u64, "statement timeout set");
        self.conn.lock().busy_timeout(timeout)?;
        *self.timeout.lock() = Some(timeout);
        Ok(())
    }

    fn clear_statement_timeout(&self) -> Result<()> {
        debug!("statement timeout cleared");
        self.conn.lock().busy_timeout(Duration::from_secs(0))?;
        *self.timeout.lock() = None;
        Ok(())
    }
}

fn run_query(conn: &Connection, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|c| c.to_lowercase())
        .collect();
    let column_count = columns.len();

    let mut rows = stmt.query(params_from_iter(params.iter()))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(SqlValue::from(row.get_ref(i)?));
        }
        out.push(Row::new(columns.clone(), values));
    }
    Ok(out)
}
