//! Query values and their builder.
//!
//! A [`Query`] is created once per table root and then transformed by
//! builder calls. Every call consumes the query and returns the next value;
//! clone it to branch.

use crate::column::ColumnList;
use crate::compile::{CompiledQuery, compile};
use crate::connection::Connection;
use crate::dialect::BuildContext;
use crate::error::{Result, TyqlError};
use crate::expr::{Aliased, Column, Expr, IntoExpr, Ordering};
use crate::join::JoinNode;
use crate::materialize::{FromOutput, Output};

// =============================================================================
// Selectable
// =============================================================================

/// One entry of a select or group-by list.
#[derive(Debug, Clone)]
pub enum Selectable {
    /// A computed value; one output slot.
    Expr(Expr),
    /// A computed value selected under a name; one output slot.
    Aliased(Aliased),
    /// Every column of a table; one model per row.
    Columns(ColumnList),
    /// A joined table and its nested joins; one model per table.
    Join(JoinNode),
}

impl From<Expr> for Selectable {
    fn from(expr: Expr) -> Self {
        Selectable::Expr(expr)
    }
}

impl From<Column> for Selectable {
    fn from(column: Column) -> Self {
        Selectable::Expr(column.into_expr())
    }
}

impl From<&Column> for Selectable {
    fn from(column: &Column) -> Self {
        Selectable::Expr(column.into_expr())
    }
}

impl From<Aliased> for Selectable {
    fn from(aliased: Aliased) -> Self {
        Selectable::Aliased(aliased)
    }
}

impl From<ColumnList> for Selectable {
    fn from(columns: ColumnList) -> Self {
        Selectable::Columns(columns)
    }
}

impl From<&ColumnList> for Selectable {
    fn from(columns: &ColumnList) -> Self {
        Selectable::Columns(columns.clone())
    }
}

impl From<JoinNode> for Selectable {
    fn from(join: JoinNode) -> Self {
        Selectable::Join(join)
    }
}

impl From<&JoinNode> for Selectable {
    fn from(join: &JoinNode) -> Self {
        Selectable::Join(join.clone())
    }
}

// =============================================================================
// Query
// =============================================================================

#[derive(Debug, Clone)]
pub struct Query {
    from: ColumnList,
    select: Option<Vec<Selectable>>,
    default_select: Vec<Selectable>,
    joins: Vec<JoinNode>,
    where_clauses: Vec<Expr>,
    group_by: Vec<Selectable>,
    having: Vec<Expr>,
    order_by: Vec<Ordering>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Query {
    pub fn new(from: ColumnList) -> Self {
        Self {
            default_select: vec![Selectable::Columns(from.clone())],
            from,
            select: None,
            joins: Vec::new(),
            where_clauses: Vec::new(),
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    //--------------------------------------------------------------------------
    // Builder
    //--------------------------------------------------------------------------

    /// Join off the root table. The node is re-aliased under the root
    /// identifier and its models join the default select.
    pub fn inner_join(mut self, join: JoinNode) -> Self {
        let join = join.rebase(self.from.identifier());
        self.default_select.push(Selectable::Join(join.clone()));
        self.joins.push(join);
        self
    }

    /// Replace the select list. The result shape mirrors `items`.
    pub fn select<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selectable>,
    {
        self.select = Some(items.into_iter().map(Into::into).collect());
        self
    }

    /// Add a predicate; predicates are combined with `AND`.
    pub fn r#where(mut self, predicate: impl IntoExpr) -> Self {
        self.where_clauses.push(predicate.into_expr());
        self
    }

    pub fn group_by<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selectable>,
    {
        self.group_by.extend(items.into_iter().map(Into::into));
        self
    }

    /// Add a `HAVING` predicate; predicates are combined with `AND`.
    pub fn having(mut self, predicate: impl IntoExpr) -> Self {
        self.having.push(predicate.into_expr());
        self
    }

    pub fn order_by<I>(mut self, orderings: I) -> Self
    where
        I: IntoIterator<Item = Ordering>,
    {
        self.order_by.extend(orderings);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    //--------------------------------------------------------------------------
    // Accessors
    //--------------------------------------------------------------------------

    /// Root table columns.
    #[inline]
    pub fn source(&self) -> &ColumnList {
        &self.from
    }

    /// Root column, addressed through the root alias when one is set.
    pub fn col(&self, field: &str) -> Result<Column> {
        self.from.col(field)
    }

    /// Top-level join by relation name.
    pub fn join(&self, name: &str) -> Result<&JoinNode> {
        self.joins
            .iter()
            .find(|join| join.name() == name)
            .ok_or_else(|| TyqlError::UnknownRelation {
                table: self.from.table_name().to_string(),
                relation: name.to_string(),
            })
    }

    #[inline]
    pub fn joins(&self) -> &[JoinNode] {
        &self.joins
    }

    /// Explicit select list, `None` when the default applies.
    #[inline]
    pub fn selection(&self) -> Option<&[Selectable]> {
        self.select.as_deref()
    }

    #[inline]
    pub fn default_select(&self) -> &[Selectable] {
        &self.default_select
    }

    /// The list that is actually compiled and materialized.
    pub fn resolved_select(&self) -> &[Selectable] {
        self.select.as_deref().unwrap_or(&self.default_select)
    }

    #[inline]
    pub fn where_clauses(&self) -> &[Expr] {
        &self.where_clauses
    }

    #[inline]
    pub fn group_by_items(&self) -> &[Selectable] {
        &self.group_by
    }

    #[inline]
    pub fn having_clauses(&self) -> &[Expr] {
        &self.having
    }

    #[inline]
    pub fn orderings(&self) -> &[Ordering] {
        &self.order_by
    }

    #[inline]
    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    #[inline]
    pub fn offset_value(&self) -> Option<u64> {
        self.offset
    }

    //--------------------------------------------------------------------------
    // Compilation and execution
    //--------------------------------------------------------------------------

    pub fn to_sql(&self, ctx: &BuildContext) -> Result<CompiledQuery> {
        compile(self, ctx)
    }

    /// Run the query and materialize every row.
    pub async fn load<C: Connection>(&self, conn: &C) -> Result<Vec<Output>> {
        conn.run_query(self).await
    }

    /// Run the query and extract every row as `T`.
    pub async fn load_as<T: FromOutput, C: Connection>(&self, conn: &C) -> Result<Vec<T>> {
        self.load(conn)
            .await?
            .into_iter()
            .map(T::from_output)
            .collect()
    }

    /// Run the query with `LIMIT 1`.
    pub async fn first<C: Connection>(&self, conn: &C) -> Result<Option<Output>> {
        let query = self.clone().limit(1);
        Ok(query.load(conn).await?.into_iter().next())
    }

    pub async fn first_as<T: FromOutput, C: Connection>(&self, conn: &C) -> Result<Option<T>> {
        self.first(conn).await?.map(T::from_output).transpose()
    }
}
