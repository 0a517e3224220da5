//! SQLite backend on top of `rusqlite`.

use std::future::{Future, ready};
use std::path::Path;

use rusqlite::params_from_iter;
use tyql_core::{BuildContext, Connection, Dialect, Result, Value};

/// A [`Connection`] backed by a `rusqlite::Connection`.
///
/// Statements run synchronously; the returned futures are always ready.
#[derive(Debug)]
pub struct SqliteConnection {
    conn: rusqlite::Connection,
    context: BuildContext,
}

impl SqliteConnection {
    pub fn new(conn: rusqlite::Connection) -> Self {
        Self {
            conn,
            context: BuildContext::new(Dialect::SQLite),
        }
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(rusqlite::Connection::open_in_memory()?))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(rusqlite::Connection::open(path)?))
    }

    /// Override the quoting strategy used when compiling.
    pub fn with_context(mut self, context: BuildContext) -> Self {
        self.context = context;
        self
    }

    /// Gets a reference to the underlying connection
    pub fn conn(&self) -> &rusqlite::Connection {
        &self.conn
    }

    pub fn mut_conn(&mut self) -> &mut rusqlite::Connection {
        &mut self.conn
    }

    /// Run one or more statements without bindings, e.g. schema setup.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        tyql_core::tyql_trace_query!(sql, 0);
        Ok(self.conn.execute_batch(sql)?)
    }

    fn query_rows(&self, sql: &str, bindings: &[Value]) -> Result<Vec<Vec<Value>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let width = stmt.column_count();
        let rows = stmt
            .query_and_then(params_from_iter(bindings), |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(Value::from))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

impl Connection for SqliteConnection {
    fn build_context(&self) -> BuildContext {
        self.context
    }

    fn execute_raw(
        &self,
        sql: &str,
        bindings: &[Value],
    ) -> impl Future<Output = Result<Vec<Vec<Value>>>> {
        ready(self.query_rows(sql, bindings))
    }
}
