//! Query compiler: `(Query, BuildContext) -> (sql, bindings)`.
//!
//! Compilation is a pure, deterministic walk. Literals become placeholders
//! and their values are collected in emission order, so the n-th placeholder
//! always corresponds to the n-th binding.

use smallvec::SmallVec;

use crate::column::ColumnList;
use crate::dialect::BuildContext;
use crate::error::{Result, TyqlError};
use crate::expr::{COMPARISON, Column, Expr, Op, and};
use crate::join::JoinNode;
use crate::query::{Query, Selectable};
use crate::value::Value;

/// SQL text plus its positional bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub bindings: SmallVec<[Value; 8]>,
}

impl core::fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Compile `query` for the target described by `ctx`.
pub fn compile(query: &Query, ctx: &BuildContext) -> Result<CompiledQuery> {
    let mut w = SqlWriter::new(ctx);

    let select = query.resolved_select();
    if select.is_empty() {
        return Err(TyqlError::Unsupported("empty select list"));
    }
    w.push("SELECT ");
    w.selectables(select, Clause::Select)?;

    let from = query.source();
    w.push(" FROM ");
    w.table(from);

    for join in query.joins() {
        join.walk(from, &mut |parent, node| w.join(parent, node))?;
    }

    if !query.where_clauses().is_empty() {
        w.push(" WHERE ");
        w.expr(&and(query.where_clauses()))?;
    }

    if !query.group_by_items().is_empty() {
        w.push(" GROUP BY ");
        w.selectables(query.group_by_items(), Clause::GroupBy)?;
    }

    if !query.having_clauses().is_empty() {
        w.push(" HAVING ");
        w.expr(&and(query.having_clauses()))?;
    }

    if !query.orderings().is_empty() {
        w.push(" ORDER BY ");
        for (i, ordering) in query.orderings().iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.expr(&ordering.expr)?;
            w.push(" ");
            w.push(ordering.direction.as_str());
        }
    }

    if let Some(tail) = ctx
        .dialect
        .render_limit(query.limit_value(), query.offset_value())
    {
        w.push(" ");
        w.push(&tail);
    }

    Ok(w.finish())
}

/// Compile a bare expression, e.g. for diagnostics.
pub fn compile_expr(expr: &Expr, ctx: &BuildContext) -> Result<CompiledQuery> {
    let mut w = SqlWriter::new(ctx);
    w.expr(expr)?;
    Ok(w.finish())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Clause {
    Select,
    GroupBy,
}

struct SqlWriter<'c> {
    ctx: &'c BuildContext,
    buf: String,
    bindings: SmallVec<[Value; 8]>,
}

impl<'c> SqlWriter<'c> {
    fn new(ctx: &'c BuildContext) -> Self {
        Self {
            ctx,
            buf: String::with_capacity(128),
            bindings: SmallVec::new(),
        }
    }

    fn finish(self) -> CompiledQuery {
        CompiledQuery {
            sql: self.buf,
            bindings: self.bindings,
        }
    }

    #[inline]
    fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn ident(&mut self, name: &str) {
        let quoted = self.ctx.quote.quote(name);
        self.buf.push_str(&quoted);
    }

    fn bind(&mut self, value: &Value) {
        self.bindings.push(value.clone());
        let placeholder = self.ctx.dialect.render_placeholder(self.bindings.len());
        self.buf.push_str(&placeholder);
    }

    fn column(&mut self, column: &Column) {
        self.ident(column.table());
        self.push(".");
        self.ident(column.column());
    }

    /// `"table"` or `"table" AS "alias"`.
    fn table(&mut self, columns: &ColumnList) {
        self.ident(columns.table_name());
        if let Some(alias) = columns.table_alias() {
            self.push(" AS ");
            self.ident(alias);
        }
    }

    fn join(&mut self, parent: &ColumnList, node: &JoinNode) -> Result<()> {
        let on = node.condition(parent)?;
        self.push(" INNER JOIN ");
        self.table(node.right_columns());
        self.push(" ON ");
        self.expr(&on)
    }

    fn columns(&mut self, columns: &ColumnList, first: &mut bool) {
        for column in columns.columns() {
            self.separator(first);
            self.column(column);
        }
    }

    fn separator(&mut self, first: &mut bool) {
        if !*first {
            self.push(", ");
        }
        *first = false;
    }

    /// Flattened select / group-by list. Join nodes expand to their own
    /// columns followed by their children in pre-order.
    fn selectables(&mut self, items: &[Selectable], clause: Clause) -> Result<()> {
        let mut first = true;
        for item in items {
            match item {
                Selectable::Expr(expr) => {
                    self.separator(&mut first);
                    self.expr(expr)?;
                }
                Selectable::Aliased(aliased) => {
                    if clause == Clause::GroupBy {
                        return Err(TyqlError::Unsupported(
                            "aliased expressions in GROUP BY",
                        ));
                    }
                    self.separator(&mut first);
                    self.expr(&aliased.expr)?;
                    self.push(" AS ");
                    self.ident(&aliased.alias);
                }
                Selectable::Columns(columns) => self.columns(columns, &mut first),
                Selectable::Join(join) => self.join_columns(join, &mut first),
            }
        }
        Ok(())
    }

    fn join_columns(&mut self, join: &JoinNode, first: &mut bool) {
        self.columns(join.right_columns(), first);
        for child in join.children() {
            self.join_columns(child, first);
        }
    }

    fn expr(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Column(column) => self.column(column),
            Expr::Literal(value) => self.bind(value),
            Expr::Prefix { op, expr } => {
                self.push(op.as_str());
                self.push(" ");
                self.prefixed_operand(expr, op.precedence())?;
            }
            Expr::Infix { left, op, right } => {
                self.operand(left, |child, strength| {
                    needs_grouping(*op, child, strength, false)
                })?;
                self.push(" ");
                self.push(op.as_str());
                self.push(" ");
                self.operand(right, |child, strength| {
                    needs_grouping(*op, child, strength, true)
                })?;
            }
            Expr::Suffix { expr, op } => {
                self.predicate_operand(expr)?;
                self.push(" ");
                self.push(op.as_str());
            }
            Expr::In {
                value,
                candidates,
                positive,
            } => {
                if candidates.is_empty() {
                    return Err(TyqlError::EmptyInList);
                }
                self.predicate_operand(value)?;
                self.push(if *positive { " IN (" } else { " NOT IN (" });
                for (i, candidate) in candidates.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.expr(candidate)?;
                }
                self.push(")");
            }
            Expr::Between {
                value,
                start,
                end,
                positive,
            } => {
                self.predicate_operand(value)?;
                self.push(if *positive {
                    " BETWEEN "
                } else {
                    " NOT BETWEEN "
                });
                self.predicate_operand(start)?;
                self.push(" AND ");
                self.predicate_operand(end)?;
            }
            Expr::Parens(inner) => {
                self.push("(");
                self.expr(inner)?;
                self.push(")");
            }
        }
        Ok(())
    }

    /// Write `expr` as an operand, wrapped in parentheses when `group` says
    /// its operator would otherwise re-associate with the parent's.
    fn operand(&mut self, expr: &Expr, group: impl Fn(&Expr, u8) -> bool) -> Result<()> {
        match expr.precedence() {
            Some(strength) if group(expr, strength) => {
                self.push("(");
                self.expr(expr)?;
                self.push(")");
                Ok(())
            }
            _ => self.expr(expr),
        }
    }

    /// Operand of `NOT`, `IS NULL`, `IN` or `BETWEEN`: anything binding no
    /// tighter than the operator itself is grouped.
    fn prefixed_operand(&mut self, expr: &Expr, parent: u8) -> Result<()> {
        self.operand(expr, |_, strength| strength <= parent)
    }

    fn predicate_operand(&mut self, expr: &Expr) -> Result<()> {
        self.prefixed_operand(expr, COMPARISON)
    }
}

/// Whether `child`, an operand of the infix `parent`, must be parenthesized
/// to keep the tree's grouping.
///
/// Looser children are always grouped. At equal strength a left child is
/// grouped only under comparisons, which do not chain; a right child stays
/// flat only when it repeats an associative parent.
fn needs_grouping(parent: Op, child: &Expr, strength: u8, right: bool) -> bool {
    match strength.cmp(&parent.precedence()) {
        core::cmp::Ordering::Less => true,
        core::cmp::Ordering::Greater => false,
        core::cmp::Ordering::Equal if parent.is_comparison() => true,
        core::cmp::Ordering::Equal => {
            let repeats = matches!(child, Expr::Infix { op, .. } if *op == parent);
            right && !(repeats && parent.is_associative())
        }
    }
}
