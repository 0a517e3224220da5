//! Model registration: how a Rust struct maps onto a table and back.

use core::any::Any;
use core::fmt::Debug;

use crate::error::{Result, TyqlError};
use crate::value::Value;

/// A struct backed by one table.
///
/// Implementations are normally generated by [`model!`](crate::model), which
/// derives everything below from the struct's field list.
pub trait Model: Debug + Send + Sync + Sized + 'static {
    /// Physical table name.
    const TABLE: &'static str;

    /// Logical field names, in declaration order. Every entry is a column.
    const FIELDS: &'static [&'static str];

    /// A blank instance that rows are hydrated into.
    fn template() -> Self;

    /// Assign one raw column value to the named field.
    fn set_field(&mut self, field: &str, value: Value) -> Result<()>;

    /// Read the named field as a raw value.
    fn field(&self, field: &str) -> Option<Value>;

    /// Physical column name for a logical field.
    fn column_name(field: &str) -> String {
        field.to_string()
    }
}

/// Object-safe view of a [`Model`], used where rows of several tables are
/// mixed in one result.
pub trait Record: Any + Debug + Send + Sync {
    fn table_name(&self) -> &'static str;
    fn assign(&mut self, field: &str, value: Value) -> Result<()>;
    fn value_of(&self, field: &str) -> Option<Value>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<M: Model> Record for M {
    #[inline]
    fn table_name(&self) -> &'static str {
        M::TABLE
    }

    #[inline]
    fn assign(&mut self, field: &str, value: Value) -> Result<()> {
        self.set_field(field, value)
    }

    #[inline]
    fn value_of(&self, field: &str) -> Option<Value> {
        self.field(field)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn Record {
    /// Borrow the record as a concrete model.
    pub fn downcast_ref<M: Model>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }

    /// Take the record as a concrete model.
    pub fn downcast<M: Model>(self: Box<Self>) -> Result<M> {
        let found = self.table_name();
        self.into_any()
            .downcast::<M>()
            .map(|model| *model)
            .map_err(|_| {
                TyqlError::Mapping(format!(
                    "expected a `{}` record, found `{found}`",
                    M::TABLE
                ))
            })
    }
}

fn boxed_template<M: Model>() -> Box<dyn Record> {
    Box::new(M::template())
}

/// Type-erased registration data of a [`Model`].
#[derive(Clone, Copy)]
pub struct ModelInfo {
    table: &'static str,
    fields: &'static [&'static str],
    column_name: fn(&str) -> String,
    template: fn() -> Box<dyn Record>,
}

impl ModelInfo {
    pub fn of<M: Model>() -> Self {
        Self {
            table: M::TABLE,
            fields: M::FIELDS,
            column_name: M::column_name,
            template: boxed_template::<M>,
        }
    }

    #[inline]
    pub const fn table(&self) -> &'static str {
        self.table
    }

    #[inline]
    pub const fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains(&field)
    }

    pub fn column_name(&self, field: &str) -> String {
        (self.column_name)(field)
    }

    pub fn template(&self) -> Box<dyn Record> {
        (self.template)()
    }
}

impl Debug for ModelInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelInfo")
            .field("table", &self.table)
            .field("fields", &self.fields)
            .finish()
    }
}

pub mod naming {
    /// `userName` → `user_name`.
    pub fn camel_to_snake(field: &str) -> String {
        let mut out = String::with_capacity(field.len() + 4);
        for ch in field.chars() {
            if ch.is_ascii_uppercase() {
                out.push('_');
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
        }
        out
    }
}

/// Declares a struct together with its [`Model`] implementation.
///
/// Every field must implement `Default`, `Clone`, [`FromValue`](crate::FromValue)
/// and `Into<Value>`. The struct itself needs at least `Debug`.
///
/// ```
/// use tyql_core::model;
///
/// model! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct User in "users", columns = tyql_core::naming::camel_to_snake {
///         pub id: i64,
///         #[allow(non_snake_case)]
///         pub userName: String,
///     }
/// }
///
/// use tyql_core::Model;
/// assert_eq!(User::TABLE, "users");
/// assert_eq!(User::column_name("userName"), "user_name");
/// ```
#[macro_export]
macro_rules! model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident in $table:literal $(, columns = $rule:path)? {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty, )*
        }

        impl $crate::Model for $name {
            const TABLE: &'static str = $table;
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            fn template() -> Self {
                Self {
                    $( $field: ::core::default::Default::default(), )*
                }
            }

            fn set_field(
                &mut self,
                field: &str,
                value: $crate::Value,
            ) -> $crate::Result<()> {
                match field {
                    $(
                        stringify!($field) => {
                            self.$field = <$ty as $crate::FromValue>::from_value(value)?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::TyqlError::UnknownField {
                        model: $table.to_string(),
                        field: field.to_string(),
                    }),
                }
            }

            fn field(&self, field: &str) -> ::core::option::Option<$crate::Value> {
                match field {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            $crate::Value::from(::core::clone::Clone::clone(&self.$field)),
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            $(
                fn column_name(field: &str) -> String {
                    $rule(field)
                }
            )?
        }
    };
}
