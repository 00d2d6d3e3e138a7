//! Row decoder for forward-only SQL result cursors.
//!
//! Converts every row of a [`Cursor`] into an attribute record, coercing each
//! column by its declared SQL type. Large objects are read fully into memory,
//! NUMERIC columns are narrowed to `i32`, `i64` or `f64` from their text, and
//! CHAR columns become boolean flags.
//!
//! # Example
//!
//! ```
//! use row_decoder::constants::{SQL_TYPE_BLOB, SQL_TYPE_INTEGER, SQL_TYPE_NUMERIC};
//! use row_decoder::{decode_all, MemoryCell, MemoryCursor, MemoryLob, RawValue, Record, Value};
//!
//! let mut cursor = MemoryCursor::new()
//!     .column("id", SQL_TYPE_INTEGER)
//!     .column("amount", SQL_TYPE_NUMERIC)
//!     .column("photo", SQL_TYPE_BLOB)
//!     .row(vec![
//!         1.into(),
//!         RawValue::Decimal("12345678901".to_string()).into(),
//!         MemoryCell::Blob(MemoryLob::new(vec![0xffu8, 0xd8])),
//!     ]);
//!
//! let records = decode_all(&mut cursor, &Record::new)?;
//!
//! assert_eq!(records[0].get("amount"), Some(&Value::BigInt(12345678901)));
//! assert_eq!(records[0].get_bytes("photo"), Some(&[0xff, 0xd8][..]));
//! # Ok::<(), row_decoder::Error>(())
//! ```

pub mod config;
pub mod constants;
pub mod cursor;
pub mod decode;
pub mod decoder;
pub mod error;
pub mod types;

// Re-export main types
pub use config::DecodeOptions;
pub use cursor::{Cursor, MemoryCell, MemoryCursor, MemoryCursorError};
pub use decode::{coerce, coerce_with, read_binary_lob, read_character_lob, RawCell};
pub use decoder::{decode_all, RowDecoder};
pub use error::{Error, Result};
pub use types::{
    describe, AttributeRecord, ColumnDescriptor, ColumnInfo, LargeObject, LobStream, MemoryLob,
    RawValue, Record, RecordVariant, SqlType, Value,
};
