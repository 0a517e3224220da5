//! # tyql
//!
//! A relational query builder: compose typed expressions, joins and table
//! mappings, compile them to parameterized SQL, and map the flat result rows
//! back into models, tuples of models or scalars.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "rusqlite")]
//! # fn main() -> tyql::Result<()> {
//! use tyql::prelude::*;
//! use tyql::sqlite::SqliteConnection;
//!
//! model! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct User in "users" {
//!         pub id: i64,
//!         pub name: String,
//!     }
//! }
//!
//! let conn = SqliteConnection::open_in_memory()?;
//! conn.execute_batch(
//!     "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
//!      INSERT INTO users VALUES (1, 'alice'), (2, 'bob');",
//! )?;
//!
//! let users = Table::new::<User>();
//! let query = users.r#where(users.col("name")?.eq("bob"));
//!
//! let found: Vec<User> = futures_util::FutureExt::now_or_never(query.load_as(&conn))
//!     .expect("sqlite runs synchronously")?;
//! assert_eq!(found, [User { id: 2, name: "bob".into() }]);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "rusqlite"))]
//! # fn main() {}
//! ```
//!
//! ## Database Support
//!
//! | Database | Driver   | Feature Flag |
//! |----------|----------|--------------|
//! | SQLite   | rusqlite | `rusqlite`   |
//!
//! Other backends implement [`Connection`].

pub use tyql_core::*;

#[cfg(feature = "rusqlite")]
pub mod sqlite;

/// Everything needed to declare models and build queries.
pub mod prelude {
    pub use tyql_core::expr::{
        add, and, between, dvd, eq, gt, gte, in_array, is_not_null, is_null, like, lt, lte, mlt,
        neq, not, not_between, not_in_array, not_like, or, parens, sbt,
    };
    pub use tyql_core::{
        BuildContext, Column, ColumnList, Connection, Dialect, Expr, FromOutput, FromValue,
        IntoExpr, JoinNode, Model, Ops, Output, Query, Quote, Record, RelationMap, Result,
        Selectable, Table, TyqlError, Value, model, naming, to,
    };
}
