//! Set membership (`IN`, `NOT IN`).

use crate::error::{Result, TyqlError};

use super::{Expr, IntoExpr};

// =============================================================================
// IN Array
// =============================================================================

/// IN array check.
///
/// Fails with [`TyqlError::EmptyInList`] when no candidate is given instead of
/// rendering an always-false clause.
pub fn in_array<I, R>(expr: impl IntoExpr, values: I) -> Result<Expr>
where
    I: IntoIterator<Item = R>,
    R: IntoExpr,
{
    let candidates: Vec<Expr> = values.into_iter().map(IntoExpr::into_expr).collect();
    if candidates.is_empty() {
        return Err(TyqlError::EmptyInList);
    }
    Ok(Expr::In {
        value: Box::new(expr.into_expr()),
        candidates,
        positive: true,
    })
}

/// NOT IN array check.
pub fn not_in_array<I, R>(expr: impl IntoExpr, values: I) -> Result<Expr>
where
    I: IntoIterator<Item = R>,
    R: IntoExpr,
{
    in_array(expr, values).map(|expr| expr.positive(false))
}
