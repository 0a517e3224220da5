use thiserror::Error;

#[derive(Debug, Error)]
pub enum TyqlError {
    /// `IN` / `NOT IN` built without any candidate
    #[error("Cannot pass empty arguments to IN")]
    EmptyInList,

    /// A field name that the model does not declare
    #[error("Unknown field `{field}` on model `{model}`")]
    UnknownField { model: String, field: String },

    /// A relation name that the table does not declare
    #[error("Unknown relation `{relation}` on table `{table}`")]
    UnknownRelation { table: String, relation: String },

    /// A join attached to a table it was not defined for
    #[error("Invalid join: {0}")]
    InvalidJoin(String),

    /// Query shapes the compiler refuses to render
    #[error("Not supported: {0}")]
    Unsupported(&'static str),

    /// Error mapping raw rows back into models or values
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Error reported by an execution backend
    #[error("Execution error: {0}")]
    Execution(String),

    /// Rusqlite specific errors
    #[cfg(feature = "rusqlite")]
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

impl TyqlError {
    pub(crate) fn unknown_field(model: &str, field: &str) -> Self {
        TyqlError::UnknownField {
            model: model.to_string(),
            field: field.to_string(),
        }
    }
}

/// Result type for query building and execution
pub type Result<T> = std::result::Result<T, TyqlError>;
