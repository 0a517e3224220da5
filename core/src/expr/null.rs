//! NULL checks.

use super::{Expr, IntoExpr, SuffixOp};

/// `IS NULL` check.
pub fn is_null(expr: impl IntoExpr) -> Expr {
    Expr::Suffix {
        expr: Box::new(expr.into_expr()),
        op: SuffixOp::IsNull,
    }
}

/// `IS NOT NULL` check.
pub fn is_not_null(expr: impl IntoExpr) -> Expr {
    Expr::Suffix {
        expr: Box::new(expr.into_expr()),
        op: SuffixOp::IsNotNull,
    }
}
