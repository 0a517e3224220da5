//! SQL dialects and identifier quoting.
//!
//! Dialects only differ in placeholder style and in how `LIMIT`/`OFFSET`
//! are placed; everything else the compiler emits is standard SQL.

use std::borrow::Cow;

/// SQL dialect the compiler targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    SQLite,
    PostgreSQL,
    MySQL,
}

impl Dialect {
    /// Renders a placeholder for this dialect with the given 1-based index.
    ///
    /// Returns `Cow::Borrowed("?")` for SQLite/MySQL,
    /// `Cow::Owned` for PostgreSQL numbered placeholders.
    ///
    /// # Examples
    /// - PostgreSQL: `$1`, `$2`, `$3`
    /// - SQLite/MySQL: `?`
    #[inline]
    pub fn render_placeholder(&self, index: usize) -> Cow<'static, str> {
        match self {
            Dialect::PostgreSQL => Cow::Owned(format!("${}", index)),
            Dialect::SQLite | Dialect::MySQL => Cow::Borrowed("?"),
        }
    }

    /// Identifier quoting the dialect uses out of the box.
    pub const fn default_quote(&self) -> Quote {
        match self {
            Dialect::SQLite | Dialect::PostgreSQL => Quote::Double,
            Dialect::MySQL => Quote::Backtick,
        }
    }

    /// Renders the `LIMIT`/`OFFSET` tail, or `None` when neither is set.
    ///
    /// SQLite and MySQL reject `OFFSET` without `LIMIT`, so an unbounded
    /// limit is written in front of a lone offset.
    pub fn render_limit(&self, limit: Option<u64>, offset: Option<u64>) -> Option<String> {
        match (self, limit, offset) {
            (_, None, None) => None,
            (_, Some(limit), None) => Some(format!("LIMIT {limit}")),
            (_, Some(limit), Some(offset)) => Some(format!("LIMIT {limit} OFFSET {offset}")),
            (Dialect::SQLite, None, Some(offset)) => Some(format!("LIMIT -1 OFFSET {offset}")),
            (Dialect::MySQL, None, Some(offset)) => {
                Some(format!("LIMIT {} OFFSET {offset}", u64::MAX))
            }
            (Dialect::PostgreSQL, None, Some(offset)) => Some(format!("OFFSET {offset}")),
        }
    }
}

/// Identifier quoting strategy.
#[derive(Clone, Copy)]
pub enum Quote {
    /// `"name"`
    Double,
    /// `` `name` ``
    Backtick,
    /// Caller supplied.
    Custom(fn(&str) -> String),
}

impl Quote {
    /// Quote one identifier, doubling any embedded quote character.
    pub fn quote(&self, ident: &str) -> String {
        match self {
            Quote::Double => wrap(ident, '"'),
            Quote::Backtick => wrap(ident, '`'),
            Quote::Custom(quote) => quote(ident),
        }
    }
}

fn wrap(ident: &str, mark: char) -> String {
    let mut out = String::with_capacity(ident.len() + 2);
    out.push(mark);
    for ch in ident.chars() {
        if ch == mark {
            out.push(mark);
        }
        out.push(ch);
    }
    out.push(mark);
    out
}

impl core::fmt::Debug for Quote {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Quote::Double => f.write_str("Double"),
            Quote::Backtick => f.write_str("Backtick"),
            Quote::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Everything the compiler needs to know about its target.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext {
    pub dialect: Dialect,
    pub quote: Quote,
}

impl BuildContext {
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            quote: dialect.default_quote(),
        }
    }

    pub const fn with_quote(mut self, quote: Quote) -> Self {
        self.quote = quote;
        self
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}
