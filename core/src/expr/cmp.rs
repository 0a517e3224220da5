//! Comparison functions.
//!
//! Both operands accept anything implementing [`IntoExpr`]; raw values are
//! bound as parameters.

use super::{Expr, IntoExpr, Op};

// =============================================================================
// Equality Comparisons
// =============================================================================

/// Equality comparison (`=`).
pub fn eq(left: impl IntoExpr, right: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::Eq, right)
}

/// Inequality comparison (`<>`).
pub fn neq(left: impl IntoExpr, right: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::NotEq, right)
}

// =============================================================================
// Ordering Comparisons
// =============================================================================

/// Greater-than comparison (`>`).
pub fn gt(left: impl IntoExpr, right: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::Gt, right)
}

/// Greater-than-or-equal comparison (`>=`).
pub fn gte(left: impl IntoExpr, right: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::Gte, right)
}

/// Less-than comparison (`<`).
pub fn lt(left: impl IntoExpr, right: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::Lt, right)
}

/// Less-than-or-equal comparison (`<=`).
pub fn lte(left: impl IntoExpr, right: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::Lte, right)
}

// =============================================================================
// Pattern Matching
// =============================================================================

/// `LIKE` pattern match.
pub fn like(left: impl IntoExpr, pattern: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::Like, pattern)
}

/// `NOT LIKE` pattern match.
pub fn not_like(left: impl IntoExpr, pattern: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::NotLike, pattern)
}

// =============================================================================
// Range
// =============================================================================

/// `BETWEEN` range check, inclusive on both ends.
pub fn between(value: impl IntoExpr, start: impl IntoExpr, end: impl IntoExpr) -> Expr {
    Expr::Between {
        value: Box::new(value.into_expr()),
        start: Box::new(start.into_expr()),
        end: Box::new(end.into_expr()),
        positive: true,
    }
}

/// `NOT BETWEEN` range check.
pub fn not_between(value: impl IntoExpr, start: impl IntoExpr, end: impl IntoExpr) -> Expr {
    between(value, start, end).positive(false)
}
