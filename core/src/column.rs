//! Column lists: every column of one model, addressed through one table
//! identifier.

use compact_str::CompactString;

use crate::error::{Result, TyqlError};
use crate::expr::Column;
use crate::model::ModelInfo;

/// The ordered columns of a model bound to a table name and optional alias.
///
/// All columns in a list share the same table identifier: the alias when
/// one is set, the table name otherwise.
#[derive(Debug, Clone)]
pub struct ColumnList {
    model: ModelInfo,
    table_alias: Option<CompactString>,
    columns: Vec<Column>,
}

impl ColumnList {
    pub fn new(model: ModelInfo, table_alias: Option<CompactString>) -> Self {
        let identifier = table_alias.as_deref().unwrap_or(model.table());
        let columns = model
            .fields()
            .iter()
            .map(|field| Column::new(identifier, model.column_name(field), *field))
            .collect();
        Self {
            model,
            table_alias,
            columns,
        }
    }

    #[inline]
    pub fn model(&self) -> &ModelInfo {
        &self.model
    }

    #[inline]
    pub fn table_name(&self) -> &'static str {
        self.model.table()
    }

    #[inline]
    pub fn table_alias(&self) -> Option<&str> {
        self.table_alias.as_deref()
    }

    /// Name the columns are addressed through in compiled SQL.
    pub fn identifier(&self) -> &str {
        self.table_alias().unwrap_or(self.model.table())
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by logical field name.
    pub fn get(&self, field: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|column| column.field() == field)
            .ok_or_else(|| TyqlError::unknown_field(self.table_name(), field))
    }

    /// Owned copy of [`get`](Self::get), for building expressions.
    pub fn col(&self, field: &str) -> Result<Column> {
        self.get(field).cloned()
    }

    /// Same columns addressed through `alias`.
    pub fn aliased(&self, alias: impl Into<CompactString>) -> Self {
        let alias = alias.into();
        let columns = self.columns.iter().map(|c| c.rebased(&alias)).collect();
        Self {
            model: self.model,
            table_alias: Some(alias),
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::naming::camel_to_snake;

    crate::model! {
        #[derive(Debug, Clone, Default)]
        struct Comment in "comments", columns = camel_to_snake {
            id: i64,
            #[allow(non_snake_case)]
            postId: i64,
        }
    }

    #[test]
    fn test_columns_follow_model() {
        let list = ColumnList::new(ModelInfo::of::<Comment>(), None);
        assert_eq!(list.identifier(), "comments");
        let cols: Vec<_> = list.columns().iter().map(|c| c.column()).collect();
        assert_eq!(cols, ["id", "post_id"]);
        assert_eq!(list.get("postId").unwrap().field(), "postId");
        assert!(matches!(
            list.get("post_id"),
            Err(TyqlError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_aliased_rebases_every_column() {
        let list = ColumnList::new(ModelInfo::of::<Comment>(), None).aliased("posts_comments");
        assert_eq!(list.table_name(), "comments");
        assert_eq!(list.identifier(), "posts_comments");
        assert!(list.columns().iter().all(|c| c.table() == "posts_comments"));
    }
}
