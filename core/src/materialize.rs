//! Result materializer: positional rows back into the select shape.
//!
//! The row layout is exactly the flattened select list the compiler
//! emitted. Each [`Selectable::Columns`] entry and each table of a
//! [`Selectable::Join`] tree becomes one hydrated model; every other entry
//! becomes one scalar. A row resolving to a single item is returned as that
//! item, never as a one-element tuple.

use crate::column::ColumnList;
use crate::error::{Result, TyqlError};
use crate::join::JoinNode;
use crate::model::{Model, Record};
use crate::query::{Query, Selectable};
use crate::value::{FromValue, Value};

// =============================================================================
// Output
// =============================================================================

/// One materialized row, or one item of it.
#[derive(Debug)]
pub enum Output {
    Model(Box<dyn Record>),
    Value(Value),
    Tuple(Vec<Output>),
}

impl Output {
    pub fn into_record(self) -> Result<Box<dyn Record>> {
        match self {
            Output::Model(record) => Ok(record),
            other => Err(unexpected("a model", &other)),
        }
    }

    pub fn into_model<M: Model>(self) -> Result<M> {
        self.into_record()?.downcast::<M>()
    }

    pub fn as_model<M: Model>(&self) -> Option<&M> {
        match self {
            Output::Model(record) => record.downcast_ref::<M>(),
            _ => None,
        }
    }

    pub fn into_value(self) -> Result<Value> {
        match self {
            Output::Value(value) => Ok(value),
            other => Err(unexpected("a value", &other)),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Output::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_tuple(self) -> Result<Vec<Output>> {
        match self {
            Output::Tuple(items) => Ok(items),
            other => Err(unexpected("a tuple", &other)),
        }
    }
}

fn unexpected(expected: &str, found: &Output) -> TyqlError {
    let found = match found {
        Output::Model(record) => format!("a `{}` model", record.table_name()),
        Output::Value(value) => format!("a {} value", value.type_name()),
        Output::Tuple(items) => format!("a {}-tuple", items.len()),
    };
    TyqlError::Mapping(format!("expected {expected}, found {found}"))
}

// =============================================================================
// Materialization
// =============================================================================

enum Slot<'q> {
    Model(&'q ColumnList),
    Scalar,
}

impl Slot<'_> {
    fn width(&self) -> usize {
        match self {
            Slot::Model(columns) => columns.columns().len(),
            Slot::Scalar => 1,
        }
    }
}

fn slots(items: &[Selectable]) -> Vec<Slot<'_>> {
    fn join_slots<'q>(join: &'q JoinNode, out: &mut Vec<Slot<'q>>) {
        out.push(Slot::Model(join.right_columns()));
        for child in join.children() {
            join_slots(child, out);
        }
    }

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Selectable::Expr(_) | Selectable::Aliased(_) => out.push(Slot::Scalar),
            Selectable::Columns(columns) => out.push(Slot::Model(columns)),
            Selectable::Join(join) => join_slots(join, &mut out),
        }
    }
    out
}

/// Rebuild `rows`, as returned for the compiled `query`, into outputs.
pub fn materialize(query: &Query, rows: Vec<Vec<Value>>) -> Result<Vec<Output>> {
    let slots = slots(query.resolved_select());
    let width: usize = slots.iter().map(Slot::width).sum();

    rows.into_iter()
        .map(|row| {
            if row.len() != width {
                return Err(TyqlError::Mapping(format!(
                    "row has {} columns, select list has {width}",
                    row.len()
                )));
            }
            materialize_row(&slots, row)
        })
        .collect()
}

fn materialize_row(slots: &[Slot<'_>], row: Vec<Value>) -> Result<Output> {
    let mut cells = row.into_iter();
    let mut next = || {
        cells
            .next()
            .ok_or_else(|| TyqlError::Mapping("row ended early".to_string()))
    };

    let mut items = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            Slot::Model(columns) => {
                let mut record = columns.model().template();
                for column in columns.columns() {
                    record.assign(column.field(), next()?)?;
                }
                items.push(Output::Model(record));
            }
            Slot::Scalar => items.push(Output::Value(next()?)),
        }
    }

    if items.len() == 1 {
        Ok(items.swap_remove(0))
    } else {
        Ok(Output::Tuple(items))
    }
}

// =============================================================================
// Typed extraction
// =============================================================================

/// Conversion from a materialized [`Output`] into a Rust type.
pub trait FromOutput: Sized {
    fn from_output(output: Output) -> Result<Self>;
}

impl FromOutput for Output {
    #[inline]
    fn from_output(output: Output) -> Result<Self> {
        Ok(output)
    }
}

impl<M: Model> FromOutput for M {
    fn from_output(output: Output) -> Result<Self> {
        output.into_model()
    }
}

impl<T: FromValue> FromOutput for Option<T> {
    fn from_output(output: Output) -> Result<Self> {
        output.into_value()?.convert()
    }
}

macro_rules! impl_from_output_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromOutput for $ty {
                fn from_output(output: Output) -> Result<Self> {
                    output.into_value()?.convert()
                }
            }
        )+
    };
}

impl_from_output_scalar!(
    Value, i8, i16, i32, i64, u8, u16, u32, u64, usize, f64, f32, bool, String, Vec<u8>,
);

macro_rules! impl_from_output_tuple {
    ($len:literal; $($T:ident),+) => {
        impl<$($T: FromOutput),+> FromOutput for ($($T,)+) {
            #[allow(non_snake_case)]
            fn from_output(output: Output) -> Result<Self> {
                let items = output.into_tuple()?;
                if items.len() != $len {
                    return Err(TyqlError::Mapping(format!(
                        "expected a {}-tuple, found a {}-tuple",
                        $len,
                        items.len()
                    )));
                }
                let mut items = items.into_iter();
                $(
                    let $T = match items.next() {
                        Some(item) => $T::from_output(item)?,
                        None => return Err(TyqlError::Mapping("tuple ended early".to_string())),
                    };
                )+
                Ok(($($T,)+))
            }
        }
    };
}

impl_from_output_tuple!(2; A, B);
impl_from_output_tuple!(3; A, B, C);
impl_from_output_tuple!(4; A, B, C, D);
impl_from_output_tuple!(5; A, B, C, D, E);
impl_from_output_tuple!(6; A, B, C, D, E, F);
impl_from_output_tuple!(7; A, B, C, D, E, F, G);
impl_from_output_tuple!(8; A, B, C, D, E, F, G, H);
