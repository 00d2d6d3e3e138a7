//! Row decoder: turns a cursor into a fully materialized list of records.

use tracing::{debug, trace};

use crate::config::DecodeOptions;
use crate::cursor::Cursor;
use crate::decode::{coerce_with, RawCell};
use crate::error::{Error, Result};
use crate::types::{
    describe, AttributeRecord, ColumnDescriptor, FetchKind, RawValue, RecordVariant,
};

/// Decodes every remaining row of a cursor into attribute records.
///
/// The decoder reads the column metadata once, then fetches and coerces each
/// column of each row by its declared type. Any failure aborts the whole
/// call: no partial result is returned.
///
/// # Example
///
/// ```
/// use row_decoder::constants::{SQL_TYPE_CHAR, SQL_TYPE_INTEGER};
/// use row_decoder::{MemoryCursor, Record, RowDecoder};
///
/// let mut cursor = MemoryCursor::new()
///     .column("id", SQL_TYPE_INTEGER)
///     .column("active", SQL_TYPE_CHAR)
///     .row(vec![1.into(), "1".into()])
///     .row(vec![2.into(), "0".into()]);
///
/// let records = RowDecoder::new().decode_all(&mut cursor, &Record::new)?;
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].get_bool("active"), Some(true));
/// assert_eq!(records[1].get_bool("active"), Some(false));
/// # Ok::<(), row_decoder::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RowDecoder {
    options: DecodeOptions,
}

impl RowDecoder {
    /// Create a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given options.
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Get the decode options.
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode all remaining rows of `cursor` into records created by `variant`.
    ///
    /// The cursor is borrowed for the whole call and is left exhausted on
    /// success. It is not closed.
    pub fn decode_all<C, V>(&self, cursor: &mut C, variant: &V) -> Result<Vec<V::Record>>
    where
        C: Cursor + ?Sized,
        V: RecordVariant,
    {
        let columns = describe(cursor)?;
        debug!(columns = columns.len(), labels = ?columns.labels(), "read column metadata");

        let mut records = Vec::new();
        while cursor.advance().map_err(|e| Error::Cursor {
            message: "failed to advance cursor".to_string(),
            source: Some(Box::new(e)),
        })? {
            let mut record = variant.new_record();
            for (index, column) in columns.iter() {
                let cell = fetch_cell(cursor, index, column)?;
                let value = coerce_with(column, cell, &self.options)?;
                record.set_attribute(&column.label, value);
            }
            records.push(record);
            trace!(row = records.len(), "decoded row");
        }

        debug!(rows = records.len(), "decoded result");
        Ok(records)
    }
}

/// Decode all remaining rows of `cursor` with default options.
///
/// Shorthand for `RowDecoder::new().decode_all(cursor, variant)`.
pub fn decode_all<C, V>(cursor: &mut C, variant: &V) -> Result<Vec<V::Record>>
where
    C: Cursor + ?Sized,
    V: RecordVariant,
{
    RowDecoder::new().decode_all(cursor, variant)
}

/// Fetch one column through the accessor its declared type calls for.
fn fetch_cell<C>(
    cursor: &mut C,
    index: usize,
    column: &ColumnDescriptor,
) -> Result<RawCell<C::Clob, C::Blob>>
where
    C: Cursor + ?Sized,
{
    let fetch_error = |e: C::Error| Error::Cursor {
        message: format!("failed to read column {} ({})", column.label, column.sql_type),
        source: Some(Box::new(e)),
    };

    let cell = match column.sql_type.fetch_kind() {
        FetchKind::Int => {
            RawCell::Scalar(cursor.get_int(index).map_err(fetch_error)?.map(RawValue::Int))
        }
        FetchKind::Long => RawCell::Scalar(
            cursor
                .get_long(index)
                .map_err(fetch_error)?
                .map(RawValue::BigInt),
        ),
        FetchKind::Float => RawCell::Scalar(
            cursor
                .get_float(index)
                .map_err(fetch_error)?
                .map(RawValue::Float),
        ),
        FetchKind::Double => RawCell::Scalar(
            cursor
                .get_double(index)
                .map_err(fetch_error)?
                .map(RawValue::Double),
        ),
        FetchKind::CharacterLob => RawCell::Clob(cursor.get_clob(index).map_err(fetch_error)?),
        FetchKind::NationalCharacterLob => {
            RawCell::Clob(cursor.get_nclob(index).map_err(fetch_error)?)
        }
        FetchKind::BinaryLob => RawCell::Blob(cursor.get_blob(index).map_err(fetch_error)?),
        FetchKind::Object => RawCell::Scalar(cursor.get_object(index).map_err(fetch_error)?),
    };
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SQL_TYPE_INTEGER, SQL_TYPE_NUMERIC, SQL_TYPE_VARCHAR};
    use crate::cursor::{MemoryCell, MemoryCursor};
    use crate::types::{Record, Value};

    #[test]
    fn test_decode_two_rows() {
        let mut cursor = MemoryCursor::new()
            .column("id", SQL_TYPE_INTEGER)
            .column("name", SQL_TYPE_VARCHAR)
            .row(vec![1.into(), "Alice".into()])
            .row(vec![2.into(), "Bob".into()]);

        let records = decode_all(&mut cursor, &Record::new).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_i32("id"), Some(1));
        assert_eq!(records[0].get_str("name"), Some("Alice"));
        assert_eq!(records[1].get_i32("id"), Some(2));
        assert_eq!(records[1].get_str("name"), Some("Bob"));
    }

    #[test]
    fn test_decode_empty() {
        let mut cursor = MemoryCursor::new().column("id", SQL_TYPE_INTEGER);
        let records = decode_all(&mut cursor, &Record::new).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_null_values_have_entries() {
        let mut cursor = MemoryCursor::new()
            .column("id", SQL_TYPE_INTEGER)
            .column("amount", SQL_TYPE_NUMERIC)
            .row(vec![MemoryCell::Null, MemoryCell::Null]);

        let records = decode_all(&mut cursor, &Record::new).unwrap();
        assert_eq!(records[0].len(), 2);
        assert_eq!(records[0].get("id"), Some(&Value::Null));
        assert_eq!(records[0].get("amount"), Some(&Value::Null));
    }

    #[test]
    fn test_accessor_failure_is_cursor_error() {
        let mut cursor = MemoryCursor::new()
            .column("id", SQL_TYPE_INTEGER)
            .row(vec!["not an int".into()]);

        let err = decode_all(&mut cursor, &Record::new).unwrap_err();
        assert!(matches!(err, Error::Cursor { .. }));
    }

    #[test]
    fn test_options_are_applied() {
        let mut cursor = MemoryCursor::new()
            .column("amount", SQL_TYPE_NUMERIC)
            .row(vec!["42".into()]);

        let decoder = RowDecoder::with_options(DecodeOptions::new().with_numeric_text_threshold(1));
        let records = decoder.decode_all(&mut cursor, &Record::new).unwrap();
        assert_eq!(records[0].get("amount"), Some(&Value::BigInt(42)));
    }
}
