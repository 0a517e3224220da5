//! Logical operators (AND, OR, NOT).

use super::{Expr, IntoExpr, Op, PrefixOp};

// =============================================================================
// NOT
// =============================================================================

/// Logical NOT.
///
/// Binary operands are parenthesized so `NOT` applies to the whole operand.
pub fn not(expr: impl IntoExpr) -> Expr {
    let expr = match expr.into_expr() {
        infix @ Expr::Infix { .. } => infix.parens(),
        other => other,
    };
    Expr::Prefix {
        op: PrefixOp::Not,
        expr: Box::new(expr),
    }
}

// =============================================================================
// AND
// =============================================================================

/// Logical AND of multiple conditions, folded left to right.
///
/// A single condition is returned unchanged; no condition at all yields a
/// literal `true`.
pub fn and<I, E>(conditions: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: IntoExpr,
{
    fold(conditions, Op::And).unwrap_or_else(|| Expr::literal(true))
}

// =============================================================================
// OR
// =============================================================================

/// Logical OR of multiple conditions, wrapped in parentheses so it can sit
/// inside an outer `AND` without changing precedence.
///
/// No condition at all yields a literal `false`.
pub fn or<I, E>(conditions: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: IntoExpr,
{
    match fold(conditions, Op::Or) {
        Some(expr) => expr.parens(),
        None => Expr::literal(false),
    }
}

/// Explicit grouping.
pub fn parens(expr: impl IntoExpr) -> Expr {
    expr.into_expr().parens()
}

fn fold<I, E>(conditions: I, op: Op) -> Option<Expr>
where
    I: IntoIterator<Item = E>,
    E: IntoExpr,
{
    conditions
        .into_iter()
        .map(IntoExpr::into_expr)
        .reduce(|left, right| Expr::infix(left, op, right))
}
