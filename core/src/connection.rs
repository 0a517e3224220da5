//! Execution backends.
//!
//! A backend only has to run compiled SQL with positional bindings and hand
//! back positional rows; compiling and materializing are provided on top.

use core::future::Future;

use crate::compile::{CompiledQuery, compile};
use crate::dialect::BuildContext;
use crate::error::Result;
use crate::materialize::{Output, materialize};
use crate::query::Query;
use crate::value::Value;

#[allow(async_fn_in_trait)]
pub trait Connection {
    /// Dialect and quoting this backend expects.
    fn build_context(&self) -> BuildContext;

    /// Run `sql` with `bindings` and return every row, cells in select
    /// order. Errors from the database are passed through unchanged.
    fn execute_raw(
        &self,
        sql: &str,
        bindings: &[Value],
    ) -> impl Future<Output = Result<Vec<Vec<Value>>>>;

    /// SQL and bindings for `query`, for diagnostics.
    fn to_sql(&self, query: &Query) -> Result<CompiledQuery> {
        compile(query, &self.build_context())
    }

    /// Compile and run `query`, returning raw rows.
    async fn fetch_rows(&self, query: &Query) -> Result<Vec<Vec<Value>>> {
        let compiled = self.to_sql(query)?;
        crate::tyql_trace_query!(&compiled.sql, compiled.bindings.len());
        self.execute_raw(&compiled.sql, &compiled.bindings).await
    }

    /// Compile, run and materialize `query`.
    async fn run_query(&self, query: &Query) -> Result<Vec<Output>> {
        let rows = self.fetch_rows(query).await?;
        materialize(query, rows)
    }
}
