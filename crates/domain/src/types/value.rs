//! Decoded cell values.

use chrono::{DateTime, NaiveDate, Utc};
use num_bigint::BigInt;
use rust_decimal::Decimal;

/// A single decoded cell.
///
/// `Null` is a distinguished variant rather than an `Option<CellValue>`
/// wrapper so that every other variant can be matched on directly and
/// [`Row::to_map`](crate::Row::to_map) always has a concrete value to
/// insert, even for absent/null cells.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Decoded `boolean` column.
    Boolean(bool),
    /// Decoded `date` column.
    Date(NaiveDate),
    /// Decoded `fixed` column with scale 0 (arbitrary-precision integer).
    Integer(BigInt),
    /// Decoded `fixed` column with scale > 0 (arbitrary-precision decimal).
    Decimal(Decimal),
    /// Decoded `float`/`double`/`real`/`double precision` column.
    Float(f64),
    /// Decoded `time`/`datetime`/`timestamp*` column: an instant in UTC.
    Instant(DateTime<Utc>),
    /// Passthrough for unrecognized type tags, verbatim.
    Text(String),
    /// A `null` cell, regardless of the column's declared type.
    Null,
}

impl CellValue {
    /// `true` iff this is [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the inner `bool`, if this is a [`CellValue::Boolean`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the inner `&str`, if this is a [`CellValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}
