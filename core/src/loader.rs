//! Batched has-many loading.
//!
//! For every requested relation one query fetches the related rows of all
//! parents at once (`key IN (..)`). The queries run concurrently and their
//! rows are grouped by key into one [`RelationMap`] per relation.

use compact_str::format_compact;
use futures_util::future::try_join_all;
use hashbrown::HashMap;

use crate::column::ColumnList;
use crate::connection::Connection;
use crate::error::{Result, TyqlError};
use crate::expr::{Expr, in_array};
use crate::materialize::Output;
use crate::model::{Model, Record};
use crate::query::Query;
use crate::table::Relation;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct RelationLoader {
    relations: Vec<Relation>,
}

impl RelationLoader {
    pub fn new(relations: Vec<Relation>) -> Self {
        Self { relations }
    }

    #[inline]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// One query per relation, in relation order. `None` when there are no
    /// parents to load for.
    ///
    /// Parent keys are bound as they come; duplicates are kept.
    pub fn queries<M: Model>(&self, parents: &[M]) -> Result<Vec<Option<Query>>> {
        self.relations
            .iter()
            .map(|relation| relation_query(relation, parents))
            .collect()
    }

    /// Run every relation query and group the rows by key.
    ///
    /// Any failing query fails the whole batch.
    pub async fn load<M: Model, C: Connection>(
        &self,
        parents: &[M],
        conn: &C,
    ) -> Result<Vec<RelationMap>> {
        let queries = self.queries(parents)?;
        crate::tyql_trace_relations!(M::TABLE, queries.len());

        let fetches = self
            .relations
            .iter()
            .zip(queries)
            .map(|(relation, query)| async move {
                let Some(query) = query else {
                    return Ok(RelationMap::new(relation.clone()));
                };
                let rows = conn.run_query(&query).await?;
                RelationMap::group(relation.clone(), rows)
            });

        try_join_all(fetches).await
    }
}

fn relation_query<M: Model>(relation: &Relation, parents: &[M]) -> Result<Option<Query>> {
    if relation.source().table() != M::TABLE {
        return Err(TyqlError::InvalidJoin(format!(
            "relation `{}` belongs to `{}`, not `{}`",
            relation.name(),
            relation.source().table(),
            M::TABLE
        )));
    }
    if parents.is_empty() {
        return Ok(None);
    }

    let keys = parents
        .iter()
        .map(|parent| {
            parent
                .field(relation.source_field())
                .map(Expr::Literal)
                .ok_or_else(|| TyqlError::unknown_field(M::TABLE, relation.source_field()))
        })
        .collect::<Result<Vec<_>>>()?;

    let alias = format_compact!("{}_{}", M::TABLE, relation.name());
    let target = ColumnList::new(*relation.target(), Some(alias));
    let key = target.col(relation.target_field())?;

    Ok(Some(Query::new(target).r#where(in_array(key, keys)?)))
}

// =============================================================================
// Relation Map
// =============================================================================

/// Related records of one relation, grouped by key.
///
/// Keys with no related rows are absent.
#[derive(Debug)]
pub struct RelationMap {
    relation: Relation,
    groups: HashMap<Value, Vec<Box<dyn Record>>>,
}

impl RelationMap {
    fn new(relation: Relation) -> Self {
        Self {
            relation,
            groups: HashMap::new(),
        }
    }

    fn group(relation: Relation, rows: Vec<Output>) -> Result<Self> {
        let mut map = Self::new(relation);
        for row in rows {
            let record = row.into_record()?;
            let key = record
                .value_of(map.relation.target_field())
                .ok_or_else(|| {
                    TyqlError::unknown_field(map.relation.target().table(), map.relation.target_field())
                })?;
            map.groups.entry(key).or_default().push(record);
        }
        Ok(map)
    }

    #[inline]
    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Records related to `key`, in row order.
    pub fn get(&self, key: impl Into<Value>) -> Option<&[Box<dyn Record>]> {
        self.groups.get(&key.into()).map(Vec::as_slice)
    }

    /// Records related to `parent`, looked up by its key field.
    pub fn for_parent<M: Model>(&self, parent: &M) -> Option<&[Box<dyn Record>]> {
        let key = parent.field(self.relation.source_field())?;
        self.get(key)
    }

    /// Records related to `key`, as `T`. Empty when the key is absent; a
    /// record of another model fails with [`TyqlError::Mapping`].
    pub fn get_as<T: Model>(&self, key: impl Into<Value>) -> Result<Vec<&T>> {
        self.get(key)
            .unwrap_or_default()
            .iter()
            .map(|record| {
                record.downcast_ref::<T>().ok_or_else(|| {
                    TyqlError::Mapping(format!(
                        "expected a `{}` record, found `{}`",
                        T::TABLE,
                        record.table_name()
                    ))
                })
            })
            .collect()
    }

    pub fn contains_key(&self, key: impl Into<Value>) -> bool {
        self.groups.contains_key(&key.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.groups.keys()
    }

    /// Number of keys with at least one related record.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Downcast every record to `T`.
    pub fn into_typed<T: Model>(self) -> Result<HashMap<Value, Vec<T>>> {
        self.groups
            .into_iter()
            .map(|(key, records)| {
                let records = records
                    .into_iter()
                    .map(|record| record.downcast::<T>())
                    .collect::<Result<Vec<_>>>()?;
                Ok((key, records))
            })
            .collect()
    }
}
