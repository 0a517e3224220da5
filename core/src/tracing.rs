//! Tracing utilities for query and relation-loading observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event with the SQL text and binding count.
///
/// ```ignore
/// tyql_trace_query!(&compiled.sql, compiled.bindings.len());
/// ```
#[macro_export]
macro_rules! tyql_trace_query {
    ($sql:expr, $binding_count:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %$sql, bindings = $binding_count, "tyql.query");
    };
}

/// Emit a debug-level tracing event when the relation loader fans out.
///
/// ```ignore
/// tyql_trace_relations!("users", queries.len());
/// ```
#[macro_export]
macro_rules! tyql_trace_relations {
    ($table:expr, $count:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(table = %$table, relations = $count, "tyql.relations");
    };
}
