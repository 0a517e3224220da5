//! Join chains.
//!
//! A [`JoinNode`] is one `INNER JOIN` plus the joins hanging off its
//! right-hand table. Nodes nest, so both "parallel" joins off one table and
//! "chained" joins off a just-joined table are expressible:
//!
//! ```ignore
//! // users ⋈ posts ⋈ comments, then users ⋈ profile
//! users.query()
//!     .inner_join(users.rel("posts")?.inner_join(posts.rel("comments")?))
//!     .inner_join(users.rel("profile")?)
//! ```

use std::sync::Arc;

use compact_str::{CompactString, format_compact};

use crate::column::ColumnList;
use crate::error::{Result, TyqlError};
use crate::expr::{Column, Expr};

/// Builds the `ON` predicate once both sides' column sets are known.
pub type JoinCondition = Arc<dyn Fn(&ColumnList, &ColumnList) -> Result<Expr> + Send + Sync>;

// =============================================================================
// Join Node
// =============================================================================

#[derive(Clone)]
pub struct JoinNode {
    name: CompactString,
    left_table: &'static str,
    right: ColumnList,
    condition: JoinCondition,
    children: Vec<JoinNode>,
}

impl JoinNode {
    /// A join named `name` from `left_table` to the table behind `right`.
    pub fn on<F>(
        name: impl Into<CompactString>,
        left_table: &'static str,
        right: ColumnList,
        condition: F,
    ) -> Self
    where
        F: Fn(&ColumnList, &ColumnList) -> Result<Expr> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            left_table,
            right,
            condition: Arc::new(condition),
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Table this join must be attached to.
    #[inline]
    pub fn left_table(&self) -> &'static str {
        self.left_table
    }

    #[inline]
    pub fn right_columns(&self) -> &ColumnList {
        &self.right
    }

    #[inline]
    pub fn children(&self) -> &[JoinNode] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&JoinNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Column of the joined table, addressed through its alias.
    pub fn col(&self, field: &str) -> Result<Column> {
        self.right.col(field)
    }

    /// Attach `other` below this node; it joins off this node's right-hand
    /// table. The returned node keeps extending from the same point.
    pub fn inner_join(mut self, other: JoinNode) -> Self {
        let other = other.rebase(self.right.identifier());
        self.children.push(other);
        self
    }

    /// Re-alias this subtree under `parent`: the node becomes
    /// `{parent}_{name}` and its children follow.
    pub(crate) fn rebase(self, parent: &str) -> Self {
        let alias = format_compact!("{parent}_{}", self.name);
        let right = self.right.aliased(alias.clone());
        let children = self
            .children
            .into_iter()
            .map(|child| child.rebase(&alias))
            .collect();
        Self {
            name: self.name,
            left_table: self.left_table,
            right,
            condition: self.condition,
            children,
        }
    }

    /// `ON` predicate against `left`, the columns of the parent table.
    pub fn condition(&self, left: &ColumnList) -> Result<Expr> {
        if self.left_table != left.table_name() {
            return Err(TyqlError::InvalidJoin(format!(
                "`{}` joins from `{}` but is attached to `{}`",
                self.name,
                self.left_table,
                left.table_name()
            )));
        }
        (self.condition)(left, &self.right)
    }

    /// Depth-first pre-order walk yielding each node with its parent's
    /// columns.
    pub(crate) fn walk<'a>(
        &'a self,
        parent: &'a ColumnList,
        visit: &mut impl FnMut(&'a ColumnList, &'a JoinNode) -> Result<()>,
    ) -> Result<()> {
        visit(parent, self)?;
        for child in &self.children {
            child.walk(&self.right, visit)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for JoinNode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JoinNode")
            .field("name", &self.name)
            .field("left_table", &self.left_table)
            .field("right", &self.right.identifier())
            .field("children", &self.children)
            .finish()
    }
}
