//! Error types for the row decoder.

use std::io;
use thiserror::Error;

use crate::types::SqlType;

/// Result type alias for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error reported by a cursor implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for row decoding.
///
/// Every variant is fatal for the decode call that produced it.
#[derive(Error, Debug)]
pub enum Error {
    /// Column metadata could not be read from the cursor.
    #[error("Metadata error: {message}")]
    Metadata {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A value could not be coerced to the type its column declares.
    #[error("Coercion error in column {column} ({sql_type}) for value {text:?}: {message}")]
    Coercion {
        column: String,
        sql_type: SqlType,
        text: String,
        message: String,
    },

    /// I/O failure while extracting a large object.
    #[error("LOB read error: {message}")]
    LobRead {
        message: String,
        #[source]
        source: io::Error,
    },

    /// The large object stream failed to release.
    #[error("LOB release error: {source}{}", read_failure_suffix(.read_error))]
    LobRelease {
        #[source]
        source: io::Error,
        /// Read failure that preceded the release failure, if any.
        read_error: Option<io::Error>,
    },

    /// The large object is bigger than the decoder accepts.
    #[error("LOB of {length} bytes exceeds limit of {limit} bytes")]
    LobTooLarge { length: u64, limit: u64 },

    /// The cursor failed to advance or to produce a column value.
    #[error("Cursor error: {message}")]
    Cursor {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

fn read_failure_suffix(read_error: &Option<io::Error>) -> String {
    match read_error {
        Some(e) => format!(" (after read failure: {e})"),
        None => String::new(),
    }
}

impl Error {
    /// Create a metadata error.
    pub fn metadata(message: impl Into<String>) -> Self {
        Self::Metadata {
            message: message.into(),
            source: None,
        }
    }

    /// Create a cursor error.
    pub fn cursor(message: impl Into<String>) -> Self {
        Self::Cursor {
            message: message.into(),
            source: None,
        }
    }

    /// Create a coercion error.
    pub fn coercion(
        column: impl Into<String>,
        sql_type: SqlType,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Coercion {
            column: column.into(),
            sql_type,
            text: text.into(),
            message: message.into(),
        }
    }

    /// Create a LOB read error.
    pub fn lob_read(message: impl Into<String>, source: io::Error) -> Self {
        Self::LobRead {
            message: message.into(),
            source,
        }
    }

    /// Whether this error came from reading column metadata.
    pub fn is_metadata(&self) -> bool {
        matches!(self, Error::Metadata { .. })
    }

    /// Whether this error came from value coercion.
    pub fn is_coercion(&self) -> bool {
        matches!(self, Error::Coercion { .. })
    }

    /// Whether this error came from large object extraction.
    pub fn is_lob(&self) -> bool {
        matches!(
            self,
            Error::LobRead { .. } | Error::LobRelease { .. } | Error::LobTooLarge { .. }
        )
    }
}
