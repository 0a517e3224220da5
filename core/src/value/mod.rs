//! Scalar values: literal bindings on the way in, raw row cells on the way out.

#[cfg(feature = "rusqlite")]
mod rusqlite;

use core::hash::{Hash, Hasher};

use crate::error::{Result, TyqlError};

//------------------------------------------------------------------------------
// Value Definition
//------------------------------------------------------------------------------

/// An opaque scalar bound as a query parameter or read back from a row.
///
/// Equality and hashing compare `Real` values by bit pattern so that values
/// can key the relation loader's lookup maps.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// NULL value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (i64)
    Integer(i64),
    /// Real value (f64)
    Real(f64),
    /// Text value
    Text(String),
    /// Blob value
    Blob(Vec<u8>),
}

impl Value {
    /// Returns true if this value is NULL.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the integer value if this is an INTEGER.
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the real value if this is a REAL.
    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text value if this is TEXT.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the boolean value, accepting the 0/1 integers SQLite stores.
    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            Value::Integer(0) => Some(false),
            Value::Integer(1) => Some(true),
            _ => None,
        }
    }

    /// Name of the variant, used in mapping errors.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
        }
    }

    /// Convert this value to a Rust type using the `FromValue` trait.
    ///
    /// ```
    /// use tyql_core::Value;
    ///
    /// let n: i64 = Value::Integer(42).convert().unwrap();
    /// assert_eq!(n, 42);
    /// ```
    pub fn convert<T: FromValue>(self) -> Result<T> {
        T::from_value(self)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Blob(a), Value::Blob(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Real(r) => r.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::Blob(b) => b.hash(state),
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Blob(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

//------------------------------------------------------------------------------
// Conversions into Value
//------------------------------------------------------------------------------

macro_rules! impl_from_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )+
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::Real(f64::from(value))
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl From<&[u8]> for Value {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Value::Blob(value.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

//------------------------------------------------------------------------------
// FromValue
//------------------------------------------------------------------------------

/// Conversion from a raw [`Value`] into a Rust field type.
///
/// Used when hydrating models and when extracting scalar select items.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T>(value: &Value, target: &str) -> Result<T> {
    Err(TyqlError::Mapping(format!(
        "cannot convert {} to {target}",
        value.type_name()
    )))
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            Value::Bool(b) => Ok(i64::from(b)),
            other => mismatch(&other, "i64"),
        }
    }
}

macro_rules! impl_from_value_narrow {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    let wide = i64::from_value(value)?;
                    <$ty>::try_from(wide).map_err(|_| {
                        TyqlError::Mapping(format!(
                            "integer {wide} out of range for {}",
                            stringify!($ty)
                        ))
                    })
                }
            }
        )+
    };
}

impl_from_value_narrow!(i8, i16, i32, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Real(r) => Ok(r),
            Value::Integer(i) => Ok(i as f64),
            other => mismatch(&other, "f64"),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self> {
        f64::from_value(value).map(|r| r as f32)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value.as_bool() {
            Some(b) => Ok(b),
            None => mismatch(&value, "bool"),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => mismatch(&other, "String"),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(b) => Ok(b),
            Value::Text(s) => Ok(s.into_bytes()),
            other => mismatch(&other, "Vec<u8>"),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn test_reals_hash_by_bits() {
        let mut set = HashSet::new();
        set.insert(Value::Real(1.5));
        set.insert(Value::Real(1.5));
        set.insert(Value::Integer(1));
        assert_eq!(set.len(), 2);
        assert_ne!(Value::Integer(1), Value::Real(1.0));
    }

    #[test]
    fn test_bool_accepts_sqlite_integers() {
        assert!(Value::Integer(1).convert::<bool>().unwrap());
        assert!(!Value::Integer(0).convert::<bool>().unwrap());
        assert!(Value::Integer(2).convert::<bool>().is_err());
    }

    #[test]
    fn test_narrowing_reports_range() {
        let err = Value::Integer(i64::MAX).convert::<i32>().unwrap_err();
        assert!(matches!(err, TyqlError::Mapping(_)));
    }

    #[test]
    fn test_option_maps_null() {
        assert_eq!(Value::Null.convert::<Option<String>>().unwrap(), None);
        assert_eq!(
            Value::from("x").convert::<Option<String>>().unwrap(),
            Some("x".to_string())
        );
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }
}
