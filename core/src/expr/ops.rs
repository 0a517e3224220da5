//! Fluent operator surface.
//!
//! ```
//! use tyql_core::expr::{Column, Ops};
//!
//! let id = Column::new("users", "id", "id");
//! let predicate = (&id).gt(3).and((&id).not_in([7, 9]).unwrap());
//! # let _ = predicate;
//! ```

use compact_str::CompactString;

use crate::error::Result;

use super::{Aliased, Column, Expr, IntoExpr, Ordering};

/// Method-call versions of the free operator functions, available on
/// expressions and columns.
pub trait Ops: IntoExpr + Sized {
    fn eq(self, other: impl IntoExpr) -> Expr {
        super::eq(self, other)
    }

    fn not_eq(self, other: impl IntoExpr) -> Expr {
        super::neq(self, other)
    }

    fn gt(self, other: impl IntoExpr) -> Expr {
        super::gt(self, other)
    }

    fn gte(self, other: impl IntoExpr) -> Expr {
        super::gte(self, other)
    }

    fn lt(self, other: impl IntoExpr) -> Expr {
        super::lt(self, other)
    }

    fn lte(self, other: impl IntoExpr) -> Expr {
        super::lte(self, other)
    }

    fn like(self, pattern: impl IntoExpr) -> Expr {
        super::like(self, pattern)
    }

    fn not_like(self, pattern: impl IntoExpr) -> Expr {
        super::not_like(self, pattern)
    }

    fn add(self, other: impl IntoExpr) -> Expr {
        super::add(self, other)
    }

    fn sbt(self, other: impl IntoExpr) -> Expr {
        super::sbt(self, other)
    }

    fn mlt(self, other: impl IntoExpr) -> Expr {
        super::mlt(self, other)
    }

    fn dvd(self, other: impl IntoExpr) -> Expr {
        super::dvd(self, other)
    }

    /// Fails when `candidates` is empty.
    fn r#in<I, R>(self, candidates: I) -> Result<Expr>
    where
        I: IntoIterator<Item = R>,
        R: IntoExpr,
    {
        super::in_array(self, candidates)
    }

    /// Fails when `candidates` is empty.
    fn not_in<I, R>(self, candidates: I) -> Result<Expr>
    where
        I: IntoIterator<Item = R>,
        R: IntoExpr,
    {
        super::not_in_array(self, candidates)
    }

    fn between(self, start: impl IntoExpr, end: impl IntoExpr) -> Expr {
        super::between(self, start, end)
    }

    fn not_between(self, start: impl IntoExpr, end: impl IntoExpr) -> Expr {
        super::not_between(self, start, end)
    }

    fn is_null(self) -> Expr {
        super::is_null(self)
    }

    fn is_not_null(self) -> Expr {
        super::is_not_null(self)
    }

    fn and(self, other: impl IntoExpr) -> Expr {
        super::and([self.into_expr(), other.into_expr()])
    }

    fn or(self, other: impl IntoExpr) -> Expr {
        super::or([self.into_expr(), other.into_expr()])
    }

    fn asc(self) -> Ordering {
        Ordering::asc(self)
    }

    fn desc(self) -> Ordering {
        Ordering::desc(self)
    }

    fn alias(self, name: impl Into<CompactString>) -> Aliased {
        Aliased {
            expr: self.into_expr(),
            alias: name.into(),
        }
    }
}

impl Ops for Expr {}
impl Ops for Column {}
impl Ops for &Column {}
