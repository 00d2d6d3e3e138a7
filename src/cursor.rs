//! Forward-only cursor over a tabular query result.
//!
//! The [`Cursor`] trait is the input boundary of the decoder: column
//! metadata, a row advance, and typed per-column accessors. The decoder
//! borrows the cursor mutably for the whole decode call; opening and closing
//! the underlying query stays with the caller.
//!
//! [`MemoryCursor`] is an in-memory implementation for results that are
//! already materialized, and for tests.

use thiserror::Error;

use crate::types::{LargeObject, MemoryLob, RawValue};

/// Forward-only cursor with typed column accessors.
///
/// Column indices are 0-based. Every accessor returns `Ok(None)` for SQL
/// NULL and reads from the row the last successful [`Cursor::advance`]
/// moved to.
///
/// # Example
///
/// ```
/// use row_decoder::constants::{SQL_TYPE_INTEGER, SQL_TYPE_VARCHAR};
/// use row_decoder::{Cursor, MemoryCursor};
///
/// let mut cursor = MemoryCursor::new()
///     .column("id", SQL_TYPE_INTEGER)
///     .column("name", SQL_TYPE_VARCHAR)
///     .row(vec![1.into(), "Alice".into()]);
///
/// assert_eq!(cursor.column_count().unwrap(), 2);
/// assert!(cursor.advance().unwrap());
/// assert_eq!(cursor.get_int(0).unwrap(), Some(1));
/// assert!(!cursor.advance().unwrap());
/// ```
pub trait Cursor {
    /// Error reported by the cursor.
    type Error: std::error::Error + Send + Sync + 'static;
    /// Character LOB handle (CLOB and NCLOB).
    type Clob: LargeObject;
    /// Binary LOB handle.
    type Blob: LargeObject;

    /// Number of columns in the result.
    fn column_count(&self) -> Result<usize, Self::Error>;

    /// Label of a column (its alias, if the query gave one).
    fn column_label(&self, index: usize) -> Result<String, Self::Error>;

    /// Raw declared type code of a column.
    fn column_type(&self, index: usize) -> Result<i32, Self::Error>;

    /// Move to the next row. Returns `false` once the result is exhausted.
    fn advance(&mut self) -> Result<bool, Self::Error>;

    /// Read a column as a 32-bit integer.
    fn get_int(&mut self, index: usize) -> Result<Option<i32>, Self::Error>;

    /// Read a column as a 64-bit integer.
    fn get_long(&mut self, index: usize) -> Result<Option<i64>, Self::Error>;

    /// Read a column as a 32-bit float.
    fn get_float(&mut self, index: usize) -> Result<Option<f32>, Self::Error>;

    /// Read a column as a 64-bit float.
    fn get_double(&mut self, index: usize) -> Result<Option<f64>, Self::Error>;

    /// Read a CLOB column handle.
    fn get_clob(&mut self, index: usize) -> Result<Option<Self::Clob>, Self::Error>;

    /// Read an NCLOB column handle.
    fn get_nclob(&mut self, index: usize) -> Result<Option<Self::Clob>, Self::Error>;

    /// Read a BLOB column handle.
    fn get_blob(&mut self, index: usize) -> Result<Option<Self::Blob>, Self::Error>;

    /// Read a column as whatever value the cursor naturally produces.
    fn get_object(&mut self, index: usize) -> Result<Option<RawValue>, Self::Error>;
}

/// Error type for [`MemoryCursor`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MemoryCursorError {
    /// The cursor has been closed.
    #[error("Cursor is closed")]
    Closed,

    /// Column index out of bounds.
    #[error("Column index {index} out of bounds (columns: {count})")]
    ColumnIndexOutOfBounds { index: usize, count: usize },

    /// No current row (before the first advance or after exhaustion).
    #[error("Cursor is not positioned on a row")]
    NoCurrentRow,

    /// Cell cannot be read through the requested accessor.
    #[error("Column {index} holds {actual}, cannot read as {expected}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}

/// A cell of a [`MemoryCursor`] row.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryCell {
    /// SQL NULL.
    Null,
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Character LOB.
    Clob(MemoryLob),
    /// Binary LOB.
    Blob(MemoryLob),
    /// Any other value.
    Object(RawValue),
}

impl MemoryCell {
    fn kind(&self) -> &'static str {
        match self {
            MemoryCell::Null => "NULL",
            MemoryCell::Int(_) => "int",
            MemoryCell::Long(_) => "long",
            MemoryCell::Float(_) => "float",
            MemoryCell::Double(_) => "double",
            MemoryCell::Clob(_) => "clob",
            MemoryCell::Blob(_) => "blob",
            MemoryCell::Object(_) => "object",
        }
    }
}

impl From<i32> for MemoryCell {
    fn from(n: i32) -> Self {
        MemoryCell::Int(n)
    }
}

impl From<i64> for MemoryCell {
    fn from(n: i64) -> Self {
        MemoryCell::Long(n)
    }
}

impl From<f32> for MemoryCell {
    fn from(n: f32) -> Self {
        MemoryCell::Float(n)
    }
}

impl From<f64> for MemoryCell {
    fn from(n: f64) -> Self {
        MemoryCell::Double(n)
    }
}

impl From<&str> for MemoryCell {
    fn from(s: &str) -> Self {
        MemoryCell::Object(RawValue::Text(s.to_string()))
    }
}

impl From<String> for MemoryCell {
    fn from(s: String) -> Self {
        MemoryCell::Object(RawValue::Text(s))
    }
}

impl From<RawValue> for MemoryCell {
    fn from(raw: RawValue) -> Self {
        MemoryCell::Object(raw)
    }
}

impl<T: Into<MemoryCell>> From<Option<T>> for MemoryCell {
    fn from(value: Option<T>) -> Self {
        value.map_or(MemoryCell::Null, Into::into)
    }
}

static NULL_CELL: MemoryCell = MemoryCell::Null;

/// Cursor over rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCursor {
    /// Column labels and raw type codes.
    columns: Vec<(String, i32)>,
    /// Row cells.
    rows: Vec<Vec<MemoryCell>>,
    /// Index of the current row; `None` before the first advance.
    position: Option<usize>,
    /// Whether the cursor has been closed.
    closed: bool,
}

impl MemoryCursor {
    /// Create an empty cursor with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column.
    pub fn column(mut self, label: impl Into<String>, type_code: i32) -> Self {
        self.columns.push((label.into(), type_code));
        self
    }

    /// Add a row. Missing trailing cells read as NULL.
    pub fn row(mut self, cells: Vec<MemoryCell>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Close the cursor. Every later call fails with [`MemoryCursorError::Closed`].
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Check if the cursor is closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of rows held.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn check_open(&self) -> Result<(), MemoryCursorError> {
        if self.closed {
            Err(MemoryCursorError::Closed)
        } else {
            Ok(())
        }
    }

    fn check_column(&self, index: usize) -> Result<(), MemoryCursorError> {
        self.check_open()?;
        if index >= self.columns.len() {
            return Err(MemoryCursorError::ColumnIndexOutOfBounds {
                index,
                count: self.columns.len(),
            });
        }
        Ok(())
    }

    fn cell(&self, index: usize) -> Result<&MemoryCell, MemoryCursorError> {
        self.check_column(index)?;
        let row = self
            .position
            .and_then(|pos| self.rows.get(pos))
            .ok_or(MemoryCursorError::NoCurrentRow)?;
        Ok(row.get(index).unwrap_or(&NULL_CELL))
    }

    fn mismatch(index: usize, expected: &'static str, cell: &MemoryCell) -> MemoryCursorError {
        MemoryCursorError::TypeMismatch {
            index,
            expected,
            actual: cell.kind(),
        }
    }
}

impl Cursor for MemoryCursor {
    type Error = MemoryCursorError;
    type Clob = MemoryLob;
    type Blob = MemoryLob;

    fn column_count(&self) -> Result<usize, Self::Error> {
        self.check_open()?;
        Ok(self.columns.len())
    }

    fn column_label(&self, index: usize) -> Result<String, Self::Error> {
        self.check_column(index)?;
        Ok(self.columns[index].0.clone())
    }

    fn column_type(&self, index: usize) -> Result<i32, Self::Error> {
        self.check_column(index)?;
        Ok(self.columns[index].1)
    }

    fn advance(&mut self) -> Result<bool, Self::Error> {
        self.check_open()?;
        let next = self.position.map_or(0, |pos| pos + 1).min(self.rows.len());
        self.position = Some(next);
        Ok(next < self.rows.len())
    }

    fn get_int(&mut self, index: usize) -> Result<Option<i32>, Self::Error> {
        match self.cell(index)? {
            MemoryCell::Null => Ok(None),
            MemoryCell::Int(n) => Ok(Some(*n)),
            other => Err(Self::mismatch(index, "int", other)),
        }
    }

    fn get_long(&mut self, index: usize) -> Result<Option<i64>, Self::Error> {
        match self.cell(index)? {
            MemoryCell::Null => Ok(None),
            MemoryCell::Int(n) => Ok(Some(i64::from(*n))),
            MemoryCell::Long(n) => Ok(Some(*n)),
            other => Err(Self::mismatch(index, "long", other)),
        }
    }

    fn get_float(&mut self, index: usize) -> Result<Option<f32>, Self::Error> {
        match self.cell(index)? {
            MemoryCell::Null => Ok(None),
            MemoryCell::Float(n) => Ok(Some(*n)),
            other => Err(Self::mismatch(index, "float", other)),
        }
    }

    fn get_double(&mut self, index: usize) -> Result<Option<f64>, Self::Error> {
        match self.cell(index)? {
            MemoryCell::Null => Ok(None),
            MemoryCell::Float(n) => Ok(Some(f64::from(*n))),
            MemoryCell::Double(n) => Ok(Some(*n)),
            other => Err(Self::mismatch(index, "double", other)),
        }
    }

    fn get_clob(&mut self, index: usize) -> Result<Option<Self::Clob>, Self::Error> {
        match self.cell(index)? {
            MemoryCell::Null => Ok(None),
            MemoryCell::Clob(lob) => Ok(Some(lob.clone())),
            other => Err(Self::mismatch(index, "clob", other)),
        }
    }

    fn get_nclob(&mut self, index: usize) -> Result<Option<Self::Clob>, Self::Error> {
        self.get_clob(index)
    }

    fn get_blob(&mut self, index: usize) -> Result<Option<Self::Blob>, Self::Error> {
        match self.cell(index)? {
            MemoryCell::Null => Ok(None),
            MemoryCell::Blob(lob) => Ok(Some(lob.clone())),
            other => Err(Self::mismatch(index, "blob", other)),
        }
    }

    fn get_object(&mut self, index: usize) -> Result<Option<RawValue>, Self::Error> {
        match self.cell(index)? {
            MemoryCell::Null => Ok(None),
            MemoryCell::Int(n) => Ok(Some(RawValue::Int(*n))),
            MemoryCell::Long(n) => Ok(Some(RawValue::BigInt(*n))),
            MemoryCell::Float(n) => Ok(Some(RawValue::Float(*n))),
            MemoryCell::Double(n) => Ok(Some(RawValue::Double(*n))),
            MemoryCell::Object(raw) => Ok(Some(raw.clone())),
            other => Err(Self::mismatch(index, "object", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SQL_TYPE_BLOB, SQL_TYPE_INTEGER, SQL_TYPE_VARCHAR};

    fn make_test_cursor() -> MemoryCursor {
        MemoryCursor::new()
            .column("ID", SQL_TYPE_INTEGER)
            .column("NAME", SQL_TYPE_VARCHAR)
            .row(vec![1.into(), "a".into()])
            .row(vec![2.into(), MemoryCell::Null])
    }

    #[test]
    fn test_advance_until_exhausted() {
        let mut cursor = make_test_cursor();
        assert!(cursor.advance().unwrap());
        assert!(cursor.advance().unwrap());
        assert!(!cursor.advance().unwrap());
        assert!(!cursor.advance().unwrap());
    }

    #[test]
    fn test_accessors() {
        let mut cursor = make_test_cursor();
        cursor.advance().unwrap();
        assert_eq!(cursor.get_int(0).unwrap(), Some(1));
        assert_eq!(cursor.get_long(0).unwrap(), Some(1));
        assert_eq!(
            cursor.get_object(1).unwrap(),
            Some(RawValue::Text("a".to_string()))
        );

        cursor.advance().unwrap();
        assert_eq!(cursor.get_object(1).unwrap(), None);
    }

    #[test]
    fn test_no_current_row() {
        let mut cursor = make_test_cursor();
        assert_eq!(cursor.get_int(0), Err(MemoryCursorError::NoCurrentRow));
    }

    #[test]
    fn test_type_mismatch() {
        let mut cursor = make_test_cursor();
        cursor.advance().unwrap();
        assert!(matches!(
            cursor.get_int(1),
            Err(MemoryCursorError::TypeMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn test_out_of_bounds() {
        let cursor = make_test_cursor();
        assert_eq!(
            cursor.column_label(5),
            Err(MemoryCursorError::ColumnIndexOutOfBounds { index: 5, count: 2 })
        );
    }

    #[test]
    fn test_closed() {
        let mut cursor = make_test_cursor();
        cursor.close();
        assert!(cursor.is_closed());
        assert_eq!(cursor.column_count(), Err(MemoryCursorError::Closed));
        assert_eq!(cursor.advance(), Err(MemoryCursorError::Closed));
    }

    #[test]
    fn test_lob_cells() {
        let mut cursor = MemoryCursor::new()
            .column("PHOTO", SQL_TYPE_BLOB)
            .row(vec![MemoryCell::Blob(MemoryLob::new(vec![1u8, 2]))])
            .row(vec![MemoryCell::Null]);

        cursor.advance().unwrap();
        let lob = cursor.get_blob(0).unwrap().unwrap();
        assert_eq!(lob.length().unwrap(), 2);

        cursor.advance().unwrap();
        assert_eq!(cursor.get_blob(0).unwrap(), None);
    }

    #[test]
    fn test_short_row_reads_null() {
        let mut cursor = MemoryCursor::new()
            .column("A", SQL_TYPE_INTEGER)
            .column("B", SQL_TYPE_INTEGER)
            .row(vec![1.into()]);
        cursor.advance().unwrap();
        assert_eq!(cursor.get_int(1).unwrap(), None);
    }

    #[test]
    fn test_option_cells() {
        assert_eq!(MemoryCell::from(None::<i32>), MemoryCell::Null);
        assert_eq!(MemoryCell::from(Some(3i64)), MemoryCell::Long(3));
    }
}
