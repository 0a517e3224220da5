//! Expression tree.
//!
//! Every predicate, computed value and column reference in a query is an
//! [`Expr`]. The algebra is closed: children of every node are themselves
//! expressions, and plain Rust values passed where an expression is expected
//! are promoted to [`Expr::Literal`] through [`IntoExpr`].
//!
//! Two construction styles are available:
//!
//! ```
//! use tyql_core::expr::{Column, Ops, and, eq, gt};
//!
//! let id = Column::new("users", "id", "id");
//! let age = Column::new("users", "age", "age");
//!
//! // Fluent
//! let fluent = id.clone().eq(1).and(age.clone().gt(18));
//!
//! // Function style
//! let functional = and([eq(&id, 1), gt(&age, 18)]);
//! # let _ = (fluent, functional);
//! ```

mod cmp;
mod logical;
mod math;
mod null;
mod ops;
mod set;

pub use cmp::*;
pub use logical::*;
pub use math::*;
pub use null::*;
pub use ops::Ops;
pub use set::*;

use compact_str::CompactString;

use crate::value::Value;

// =============================================================================
// Column
// =============================================================================

/// A physical column reference.
///
/// `table` is the identifier the column is addressed through in the compiled
/// query (the table alias when one is set), `column` the physical name, and
/// `field` the model attribute the value is assigned to on the way back.
#[derive(Debug, Clone)]
pub struct Column {
    table: CompactString,
    column: CompactString,
    field: CompactString,
}

impl Column {
    pub fn new(
        table: impl Into<CompactString>,
        column: impl Into<CompactString>,
        field: impl Into<CompactString>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            field: field.into(),
        }
    }

    #[inline]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[inline]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Same column addressed through another table identifier.
    pub(crate) fn rebased(&self, table: &str) -> Self {
        Self {
            table: table.into(),
            column: self.column.clone(),
            field: self.field.clone(),
        }
    }
}

// =============================================================================
// Operators
// =============================================================================

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    Add,
    Subtract,
    Multiply,
    Divide,
    Like,
    NotLike,
    And,
    Or,
}

impl Op {
    pub const fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::NotEq => "<>",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Add => "+",
            Op::Subtract => "-",
            Op::Multiply => "*",
            Op::Divide => "/",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
            Op::And => "AND",
            Op::Or => "OR",
        }
    }

    /// Binding strength; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Op::Or => 1,
            Op::And => 2,
            Op::Eq | Op::NotEq | Op::Gt | Op::Gte | Op::Lt | Op::Lte | Op::Like | Op::NotLike => {
                COMPARISON
            }
            Op::Add | Op::Subtract => 5,
            Op::Multiply | Op::Divide => 6,
        }
    }

    /// Whether `a op (b op c)` equals `a op b op c`.
    pub const fn is_associative(self) -> bool {
        matches!(self, Op::And | Op::Or | Op::Add | Op::Multiply)
    }

    pub const fn is_comparison(self) -> bool {
        self.precedence() == COMPARISON
    }
}

/// Strength shared by comparisons, `IS [NOT] NULL`, `IN` and `BETWEEN`.
pub(crate) const COMPARISON: u8 = 4;

/// Postfix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixOp {
    IsNull,
    IsNotNull,
}

impl SuffixOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            SuffixOp::IsNull => "IS NULL",
            SuffixOp::IsNotNull => "IS NOT NULL",
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Not,
}

impl PrefixOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            PrefixOp::Not => "NOT",
        }
    }

    /// `NOT` binds looser than comparisons and tighter than `AND`.
    pub const fn precedence(self) -> u8 {
        match self {
            PrefixOp::Not => 3,
        }
    }
}

// =============================================================================
// Expr
// =============================================================================

#[derive(Debug, Clone)]
pub enum Expr {
    Column(Column),
    Literal(Value),
    Prefix {
        op: PrefixOp,
        expr: Box<Expr>,
    },
    Infix {
        left: Box<Expr>,
        op: Op,
        right: Box<Expr>,
    },
    Suffix {
        expr: Box<Expr>,
        op: SuffixOp,
    },
    In {
        value: Box<Expr>,
        candidates: Vec<Expr>,
        positive: bool,
    },
    Between {
        value: Box<Expr>,
        start: Box<Expr>,
        end: Box<Expr>,
        positive: bool,
    },
    Parens(Box<Expr>),
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub(crate) fn infix(left: impl IntoExpr, op: Op, right: impl IntoExpr) -> Self {
        Expr::Infix {
            left: Box::new(left.into_expr()),
            op,
            right: Box::new(right.into_expr()),
        }
    }

    pub fn parens(self) -> Self {
        Expr::Parens(Box::new(self))
    }

    /// Sets the polarity of an `IN` or `BETWEEN` node. Other nodes are
    /// returned untouched.
    pub fn positive(self, yes: bool) -> Self {
        match self {
            Expr::In {
                value, candidates, ..
            } => Expr::In {
                value,
                candidates,
                positive: yes,
            },
            Expr::Between {
                value, start, end, ..
            } => Expr::Between {
                value,
                start,
                end,
                positive: yes,
            },
            other => other,
        }
    }

    /// Binding strength of the node's outermost operator; `None` for atoms
    /// and explicit groups.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Expr::Infix { op, .. } => Some(op.precedence()),
            Expr::Prefix { op, .. } => Some(op.precedence()),
            Expr::Suffix { .. } | Expr::In { .. } | Expr::Between { .. } => Some(COMPARISON),
            Expr::Column(_) | Expr::Literal(_) | Expr::Parens(_) => None,
        }
    }

    pub fn as_column(&self) -> Option<&Column> {
        match self {
            Expr::Column(column) => Some(column),
            _ => None,
        }
    }
}

// =============================================================================
// Select and order decorations
// =============================================================================

/// An expression selected under an output name: `<expr> AS "<alias>"`.
#[derive(Debug, Clone)]
pub struct Aliased {
    pub expr: Expr,
    pub alias: CompactString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` entry.
#[derive(Debug, Clone)]
pub struct Ordering {
    pub expr: Expr,
    pub direction: Direction,
}

impl Ordering {
    pub fn asc(expr: impl IntoExpr) -> Self {
        Self {
            expr: expr.into_expr(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(expr: impl IntoExpr) -> Self {
        Self {
            expr: expr.into_expr(),
            direction: Direction::Desc,
        }
    }
}

// =============================================================================
// IntoExpr
// =============================================================================

/// Anything usable where an expression is expected.
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    #[inline]
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for &Expr {
    #[inline]
    fn into_expr(self) -> Expr {
        self.clone()
    }
}

impl IntoExpr for Column {
    #[inline]
    fn into_expr(self) -> Expr {
        Expr::Column(self)
    }
}

impl IntoExpr for &Column {
    #[inline]
    fn into_expr(self) -> Expr {
        Expr::Column(self.clone())
    }
}

impl IntoExpr for Value {
    #[inline]
    fn into_expr(self) -> Expr {
        Expr::Literal(self)
    }
}

macro_rules! impl_into_expr_literal {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoExpr for $ty {
                #[inline]
                fn into_expr(self) -> Expr {
                    Expr::Literal(Value::from(self))
                }
            }
        )+
    };
}

impl_into_expr_literal!(
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    bool,
    String,
    &str,
    Vec<u8>,
    &[u8],
);

impl<T: Into<Value>> IntoExpr for Option<T> {
    #[inline]
    fn into_expr(self) -> Expr {
        Expr::Literal(Value::from(self))
    }
}
