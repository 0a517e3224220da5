//! Arithmetic operators. No type restriction is enforced here; the database
//! decides what `'a' + 1` means.

use super::{Expr, IntoExpr, Op};

/// Addition (`+`).
pub fn add(left: impl IntoExpr, right: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::Add, right)
}

/// Subtraction (`-`).
pub fn sbt(left: impl IntoExpr, right: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::Subtract, right)
}

/// Multiplication (`*`).
pub fn mlt(left: impl IntoExpr, right: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::Multiply, right)
}

/// Division (`/`).
pub fn dvd(left: impl IntoExpr, right: impl IntoExpr) -> Expr {
    Expr::infix(left, Op::Divide, right)
}
