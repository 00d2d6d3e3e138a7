//! Declared column type taxonomy.
//!
//! Only the types that drive coercion get their own arm. Every other code
//! reported by a cursor lands in [`SqlType::Generic`] and is passed through.

use crate::constants::{
    SQL_TYPE_BIGINT, SQL_TYPE_BLOB, SQL_TYPE_CHAR, SQL_TYPE_CLOB, SQL_TYPE_DOUBLE,
    SQL_TYPE_FLOAT, SQL_TYPE_INTEGER, SQL_TYPE_NCLOB, SQL_TYPE_NUMERIC,
};

/// Declared SQL type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// INTEGER - 32-bit integer.
    Integer,
    /// BIGINT - 64-bit integer.
    BigInt,
    /// FLOAT - 32-bit float.
    Float,
    /// DOUBLE - 64-bit float.
    Double,
    /// NUMERIC - textual heuristic picks i32, i64 or f64.
    Numeric,
    /// CHAR - coerced to a boolean flag.
    Char,
    /// CLOB - character large object.
    Clob,
    /// NCLOB - national character large object.
    Nclob,
    /// BLOB - binary large object.
    Blob,
    /// Any other declared type, with its raw code.
    Generic(i32),
}

/// How a column's raw value is fetched from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Int,
    Long,
    Float,
    Double,
    CharacterLob,
    NationalCharacterLob,
    BinaryLob,
    Object,
}

impl SqlType {
    /// Map a raw type code to its type. Unknown codes become `Generic`.
    pub fn from_raw(code: i32) -> Self {
        match code {
            SQL_TYPE_INTEGER => SqlType::Integer,
            SQL_TYPE_BIGINT => SqlType::BigInt,
            SQL_TYPE_FLOAT => SqlType::Float,
            SQL_TYPE_DOUBLE => SqlType::Double,
            SQL_TYPE_NUMERIC => SqlType::Numeric,
            SQL_TYPE_CHAR => SqlType::Char,
            SQL_TYPE_CLOB => SqlType::Clob,
            SQL_TYPE_NCLOB => SqlType::Nclob,
            SQL_TYPE_BLOB => SqlType::Blob,
            other => SqlType::Generic(other),
        }
    }

    /// Get the raw type code.
    pub fn type_num(&self) -> i32 {
        match self {
            SqlType::Integer => SQL_TYPE_INTEGER,
            SqlType::BigInt => SQL_TYPE_BIGINT,
            SqlType::Float => SQL_TYPE_FLOAT,
            SqlType::Double => SQL_TYPE_DOUBLE,
            SqlType::Numeric => SQL_TYPE_NUMERIC,
            SqlType::Char => SQL_TYPE_CHAR,
            SqlType::Clob => SQL_TYPE_CLOB,
            SqlType::Nclob => SQL_TYPE_NCLOB,
            SqlType::Blob => SQL_TYPE_BLOB,
            SqlType::Generic(code) => *code,
        }
    }

    /// Which cursor accessor produces this column's raw value.
    ///
    /// NUMERIC and CHAR are fetched as plain objects; their heuristics run on
    /// the text afterwards.
    pub fn fetch_kind(&self) -> FetchKind {
        match self {
            SqlType::Integer => FetchKind::Int,
            SqlType::BigInt => FetchKind::Long,
            SqlType::Float => FetchKind::Float,
            SqlType::Double => FetchKind::Double,
            SqlType::Clob => FetchKind::CharacterLob,
            SqlType::Nclob => FetchKind::NationalCharacterLob,
            SqlType::Blob => FetchKind::BinaryLob,
            SqlType::Numeric | SqlType::Char | SqlType::Generic(_) => FetchKind::Object,
        }
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlType::Integer => write!(f, "INTEGER"),
            SqlType::BigInt => write!(f, "BIGINT"),
            SqlType::Float => write!(f, "FLOAT"),
            SqlType::Double => write!(f, "DOUBLE"),
            SqlType::Numeric => write!(f, "NUMERIC"),
            SqlType::Char => write!(f, "CHAR"),
            SqlType::Clob => write!(f, "CLOB"),
            SqlType::Nclob => write!(f, "NCLOB"),
            SqlType::Blob => write!(f, "BLOB"),
            SqlType::Generic(code) => write!(f, "GENERIC({})", code),
        }
    }
}

impl From<i32> for SqlType {
    fn from(code: i32) -> Self {
        SqlType::from_raw(code)
    }
}
