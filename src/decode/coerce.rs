//! Declared-type driven value coercion.
//!
//! Coercion runs in two passes. The first pass dispatches on the declared
//! type: fixed-width numbers pass through, LOBs are materialized and
//! everything else is passed on unchanged. The second pass only runs on
//! non-null values and works on their text:
//!
//! - NUMERIC: text shorter than the threshold (11 by default) parses as
//!   i32, longer text with a `.` parses as f64, and anything else as i64.
//!   A short text with a decimal point such as `"1.5"` is rejected, since
//!   the i32 parse is tried first.
//! - CHAR: `"1"` becomes `true`, every other text becomes `false`.
//!
//! Floating point values always carry a fractional part in their text, so
//! `42.0` reads as `"42.0"` rather than `"42"` and a short float under a
//! NUMERIC column is rejected like any other short decimal.

use crate::config::DecodeOptions;
use crate::constants::CHAR_TRUE_TEXT;
use crate::error::{Error, Result};
use crate::types::{ColumnDescriptor, LargeObject, RawValue, SqlType, Value};

use super::lob::{read_binary_lob_limited, read_character_lob_limited};

/// A column value fetched from the cursor, before coercion.
#[derive(Debug)]
pub enum RawCell<C, B> {
    /// Inline value; `None` is SQL NULL.
    Scalar(Option<RawValue>),
    /// Character LOB handle (CLOB, NCLOB); `None` is SQL NULL.
    Clob(Option<C>),
    /// Binary LOB handle; `None` is SQL NULL.
    Blob(Option<B>),
}

impl<C, B> RawCell<C, B> {
    /// Check if the cell holds SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            RawCell::Scalar(None) | RawCell::Clob(None) | RawCell::Blob(None)
        )
    }

    fn kind(&self) -> &'static str {
        match self {
            RawCell::Scalar(Some(RawValue::Bool(_))) => "boolean",
            RawCell::Scalar(Some(RawValue::Int(_))) => "32-bit integer",
            RawCell::Scalar(Some(RawValue::BigInt(_))) => "64-bit integer",
            RawCell::Scalar(Some(RawValue::Float(_))) => "32-bit float",
            RawCell::Scalar(Some(RawValue::Double(_))) => "64-bit float",
            RawCell::Scalar(Some(RawValue::Decimal(_))) => "decimal",
            RawCell::Scalar(Some(RawValue::Text(_))) => "text",
            RawCell::Scalar(Some(RawValue::Bytes(_))) => "bytes",
            RawCell::Scalar(Some(RawValue::Date(_))) => "date",
            RawCell::Scalar(Some(RawValue::Time(_))) => "time",
            RawCell::Scalar(Some(RawValue::Timestamp(_))) => "timestamp",
            RawCell::Scalar(None) => "null",
            RawCell::Clob(_) => "character LOB",
            RawCell::Blob(_) => "binary LOB",
        }
    }

    /// Text of an inline value, empty for LOB handles and NULL.
    fn text(&self) -> String {
        match self {
            RawCell::Scalar(Some(raw)) => raw.to_string(),
            _ => String::new(),
        }
    }
}

/// Coerce a fetched cell with default options.
pub fn coerce<C, B>(column: &ColumnDescriptor, cell: RawCell<C, B>) -> Result<Value>
where
    C: LargeObject,
    B: LargeObject,
{
    coerce_with(column, cell, &DecodeOptions::default())
}

/// Coerce a fetched cell according to the column's declared type.
pub fn coerce_with<C, B>(
    column: &ColumnDescriptor,
    cell: RawCell<C, B>,
    options: &DecodeOptions,
) -> Result<Value>
where
    C: LargeObject,
    B: LargeObject,
{
    let value = match (column.sql_type, cell) {
        (_, RawCell::Scalar(None)) => return Ok(Value::Null),
        (SqlType::Integer, RawCell::Scalar(Some(RawValue::Int(n)))) => Value::Int(n),
        (SqlType::BigInt, RawCell::Scalar(Some(RawValue::BigInt(n)))) => Value::BigInt(n),
        (SqlType::Float, RawCell::Scalar(Some(RawValue::Float(n)))) => Value::Float(n),
        (SqlType::Double, RawCell::Scalar(Some(RawValue::Double(n)))) => Value::Double(n),
        (SqlType::Clob | SqlType::Nclob, RawCell::Clob(handle)) => {
            read_character_lob_limited(handle, options.max_lob_length)?
                .map_or(Value::Null, Value::String)
        }
        (SqlType::Blob, RawCell::Blob(handle)) => {
            read_binary_lob_limited(handle, options.max_lob_length)?
                .map_or(Value::Null, Value::Bytes)
        }
        (SqlType::Numeric | SqlType::Char | SqlType::Generic(_), RawCell::Scalar(Some(raw))) => {
            Value::from(raw)
        }
        (sql_type, cell) => {
            return Err(Error::coercion(
                &column.label,
                sql_type,
                cell.text(),
                format!("{} value does not match declared type", cell.kind()),
            ))
        }
    };

    if value.is_null() {
        return Ok(value);
    }

    match column.sql_type {
        SqlType::Numeric => coerce_numeric(column, &heuristic_text(&value), options),
        SqlType::Char => Ok(Value::Bool(heuristic_text(&value) == CHAR_TRUE_TEXT)),
        _ => Ok(value),
    }
}

fn heuristic_text(value: &Value) -> String {
    match value {
        Value::Float(n) => format!("{:?}", n),
        Value::Double(n) => format!("{:?}", n),
        other => other.to_string(),
    }
}

fn coerce_numeric(column: &ColumnDescriptor, text: &str, options: &DecodeOptions) -> Result<Value> {
    let parse_error =
        |e: &dyn std::fmt::Display| Error::coercion(&column.label, column.sql_type, text, e.to_string());

    if text.chars().count() < options.numeric_text_threshold {
        text.parse::<i32>()
            .map(Value::Int)
            .map_err(|e| parse_error(&e))
    } else if text.contains('.') {
        text.parse::<f64>()
            .map(Value::Double)
            .map_err(|e| parse_error(&e))
    } else {
        text.parse::<i64>()
            .map(Value::BigInt)
            .map_err(|e| parse_error(&e))
    }
}
