//! Dialect-agnostic engine of tyql: expression trees, join chains, the SQL
//! compiler, the result materializer and the batched relation loader.

pub mod column;
pub mod compile;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod join;
pub mod loader;
pub mod materialize;
pub mod model;
pub mod query;
pub mod table;
mod tracing;
pub mod value;

// Re-export key types and traits
pub use column::ColumnList;
pub use compile::{CompiledQuery, compile};
pub use connection::Connection;
pub use dialect::{BuildContext, Dialect, Quote};
pub use error::{Result, TyqlError};
pub use expr::{Aliased, Column, Direction, Expr, IntoExpr, Ops, Ordering};
pub use join::{JoinCondition, JoinNode};
pub use loader::{RelationLoader, RelationMap};
pub use materialize::{FromOutput, Output, materialize};
pub use model::{Model, ModelInfo, Record, naming};
pub use query::{Query, Selectable};
pub use table::{Relation, RelationDef, Table, to};
pub use value::{FromValue, Value};
