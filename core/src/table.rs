//! Table descriptors: a model's columns plus its named relations.

use compact_str::CompactString;
use hashbrown::HashMap;

use crate::column::ColumnList;
use crate::error::{Result, TyqlError};
use crate::expr::{Column, IntoExpr, Ops, Ordering};
use crate::join::JoinNode;
use crate::loader::RelationLoader;
use crate::model::{Model, ModelInfo};
use crate::query::{Query, Selectable};

// =============================================================================
// Relations
// =============================================================================

/// Target side of a relation, produced by [`to`].
#[derive(Debug, Clone, Copy)]
pub struct RelationDef {
    target: ModelInfo,
    target_field: &'static str,
    source_field: &'static str,
}

/// A relation to `M`, matching `M.target_field` against the declaring
/// table's `source_field`.
///
/// ```ignore
/// Table::new::<User>().relation("posts", to::<Post>("authorId", "id"))?
/// ```
pub fn to<M: Model>(target_field: &'static str, source_field: &'static str) -> RelationDef {
    RelationDef {
        target: ModelInfo::of::<M>(),
        target_field,
        source_field,
    }
}

/// A named relation declared on a [`Table`].
#[derive(Debug, Clone)]
pub struct Relation {
    name: CompactString,
    source: ModelInfo,
    target: ModelInfo,
    target_field: &'static str,
    source_field: &'static str,
}

impl Relation {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn source(&self) -> &ModelInfo {
        &self.source
    }

    #[inline]
    pub fn target(&self) -> &ModelInfo {
        &self.target
    }

    /// Field of the related model holding the key.
    #[inline]
    pub fn target_field(&self) -> &'static str {
        self.target_field
    }

    /// Field of the declaring model the key refers to.
    #[inline]
    pub fn source_field(&self) -> &'static str {
        self.source_field
    }

    /// Unaliased join node for this relation.
    pub fn join(&self) -> JoinNode {
        let target_field = self.target_field;
        let source_field = self.source_field;
        JoinNode::on(
            self.name.clone(),
            self.source.table(),
            ColumnList::new(self.target, None),
            move |left, right| Ok(right.get(target_field)?.eq(left.get(source_field)?)),
        )
    }
}

// =============================================================================
// Table
// =============================================================================

/// Entry point for queries against one model.
#[derive(Debug, Clone)]
pub struct Table {
    columns: ColumnList,
    relations: HashMap<CompactString, Relation>,
}

impl Table {
    pub fn new<M: Model>() -> Self {
        Self {
            columns: ColumnList::new(ModelInfo::of::<M>(), None),
            relations: HashMap::new(),
        }
    }

    /// Declare a relation. Both key fields must exist on their models.
    pub fn relation(mut self, name: impl Into<CompactString>, def: RelationDef) -> Result<Self> {
        let source = *self.columns.model();
        if !source.has_field(def.source_field) {
            return Err(TyqlError::unknown_field(source.table(), def.source_field));
        }
        if !def.target.has_field(def.target_field) {
            return Err(TyqlError::unknown_field(def.target.table(), def.target_field));
        }

        let name = name.into();
        self.relations.insert(
            name.clone(),
            Relation {
                name,
                source,
                target: def.target,
                target_field: def.target_field,
                source_field: def.source_field,
            },
        );
        Ok(self)
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.columns.table_name()
    }

    #[inline]
    pub fn columns(&self) -> &ColumnList {
        &self.columns
    }

    pub fn col(&self, field: &str) -> Result<Column> {
        self.columns.col(field)
    }

    pub fn relation_named(&self, name: &str) -> Result<&Relation> {
        self.relations
            .get(name)
            .ok_or_else(|| TyqlError::UnknownRelation {
                table: self.name().to_string(),
                relation: name.to_string(),
            })
    }

    /// Join node for relation `name`, aliased `{table}_{name}`.
    pub fn rel(&self, name: &str) -> Result<JoinNode> {
        Ok(self.relation_named(name)?.join().rebase(self.name()))
    }

    /// Batch loader for the named relations, in the given order.
    pub fn rels<I, S>(&self, names: I) -> Result<RelationLoader>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let relations = names
            .into_iter()
            .map(|name| self.relation_named(name.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok(RelationLoader::new(relations))
    }

    pub fn query(&self) -> Query {
        Query::new(self.columns.clone())
    }

    /// Query with the root table addressed as `alias`.
    pub fn query_as(&self, alias: impl Into<CompactString>) -> Query {
        Query::new(self.columns.aliased(alias))
    }

    // Shortcuts for `self.query().<clause>(..)`.

    pub fn select<I, S>(&self, items: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<Selectable>,
    {
        self.query().select(items)
    }

    pub fn inner_join(&self, join: JoinNode) -> Query {
        self.query().inner_join(join)
    }

    pub fn r#where(&self, predicate: impl IntoExpr) -> Query {
        self.query().r#where(predicate)
    }

    pub fn group_by<I, S>(&self, items: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<Selectable>,
    {
        self.query().group_by(items)
    }

    pub fn having(&self, predicate: impl IntoExpr) -> Query {
        self.query().having(predicate)
    }

    pub fn order_by<I>(&self, orderings: I) -> Query
    where
        I: IntoIterator<Item = Ordering>,
    {
        self.query().order_by(orderings)
    }

    pub fn limit(&self, limit: u64) -> Query {
        self.query().limit(limit)
    }

    pub fn offset(&self, offset: u64) -> Query {
        self.query().offset(offset)
    }
}
