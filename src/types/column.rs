//! Column descriptors read from a cursor's metadata.
//!
//! The descriptors are read once at the start of a decode call and drive the
//! per-column fetch and coercion for every row.

use crate::cursor::Cursor;
use crate::error::{Error, Result};

use super::sql_type::SqlType;

/// A column in a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column label (alias if the query gave one).
    pub label: String,
    /// Declared column type.
    pub sql_type: SqlType,
}

impl ColumnDescriptor {
    /// Create a column descriptor.
    pub fn new(label: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            label: label.into(),
            sql_type,
        }
    }
}

/// Ordered column descriptors for one result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column descriptors in cursor order.
    pub columns: Vec<ColumnDescriptor>,
}

impl ColumnInfo {
    /// Create new column info from descriptors.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// Get column labels.
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get column by index (0-based).
    pub fn get(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    /// Iterate over descriptors with their 0-based index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ColumnDescriptor)> {
        self.columns.iter().enumerate()
    }
}

/// Read the column labels and declared types of a cursor.
///
/// Fails with [`Error::Metadata`] if the cursor cannot report its metadata,
/// e.g. because it is already closed.
pub fn describe<C: Cursor + ?Sized>(cursor: &C) -> Result<ColumnInfo> {
    let count = cursor
        .column_count()
        .map_err(|e| metadata_error("failed to read column count", e))?;

    let mut columns = Vec::with_capacity(count);
    for index in 0..count {
        let label = cursor
            .column_label(index)
            .map_err(|e| metadata_error(format!("failed to read label of column {}", index), e))?;
        let code = cursor
            .column_type(index)
            .map_err(|e| metadata_error(format!("failed to read type of column {}", index), e))?;
        columns.push(ColumnDescriptor::new(label, SqlType::from_raw(code)));
    }

    Ok(ColumnInfo::new(columns))
}

fn metadata_error<E>(message: impl Into<String>, source: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::Metadata {
        message: message.into(),
        source: Some(Box::new(source)),
    }
}
