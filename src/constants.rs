//! SQL type codes reported by cursors.
//!
//! These are the numeric codes of the JDBC `java.sql.Types` table, which most
//! drivers report as the declared column type.

pub const SQL_TYPE_INTEGER: i32 = 4;
pub const SQL_TYPE_BIGINT: i32 = -5;
pub const SQL_TYPE_FLOAT: i32 = 6;
pub const SQL_TYPE_DOUBLE: i32 = 8;
pub const SQL_TYPE_NUMERIC: i32 = 2;
pub const SQL_TYPE_DECIMAL: i32 = 3;
pub const SQL_TYPE_CHAR: i32 = 1;
pub const SQL_TYPE_VARCHAR: i32 = 12;
pub const SQL_TYPE_TIMESTAMP: i32 = 93;
pub const SQL_TYPE_BLOB: i32 = 2004;
pub const SQL_TYPE_CLOB: i32 = 2005;
pub const SQL_TYPE_NCLOB: i32 = 2011;

// Heuristics
/// NUMERIC text shorter than this many characters is parsed as a 32-bit integer.
pub const NUMERIC_SHORT_TEXT_LEN: usize = 11;
/// CHAR text that coerces to `true`; anything else coerces to `false`.
pub const CHAR_TRUE_TEXT: &str = "1";
