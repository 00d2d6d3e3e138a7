//! Raw and coerced column values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Non-null value as a cursor hands it over, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Boolean value (BIT, BOOLEAN).
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    BigInt(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Exact decimal kept as text (NUMERIC, DECIMAL).
    /// Preserves precision; the NUMERIC heuristic parses it later.
    Decimal(String),
    /// Character data (CHAR, VARCHAR, ...).
    Text(String),
    /// Binary data (BINARY, VARBINARY, ...).
    Bytes(Vec<u8>),
    /// DATE.
    Date(NaiveDate),
    /// TIME.
    Time(NaiveTime),
    /// TIMESTAMP.
    Timestamp(NaiveDateTime),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::Int(n) => write!(f, "{}", n),
            RawValue::BigInt(n) => write!(f, "{}", n),
            RawValue::Float(n) => write!(f, "{}", n),
            RawValue::Double(n) => write!(f, "{}", n),
            RawValue::Decimal(s) => write!(f, "{}", s),
            RawValue::Text(s) => write!(f, "{}", s),
            RawValue::Bytes(bytes) => write!(f, "<BYTES: {} bytes>", bytes.len()),
            RawValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            RawValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            RawValue::Timestamp(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Coerced attribute value stored in a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean (CHAR columns end up here).
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    BigInt(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// String (character LOBs and plain text).
    String(String),
    /// Byte sequence (binary LOBs and plain binary data).
    Bytes(Vec<u8>),
    /// Raw value passed through without a dedicated representation.
    Object(RawValue),
}

impl Value {
    /// Check if the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get the value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as i64. 32-bit integers widen.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(i64::from(*n)),
            Value::BigInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as f64. 32-bit floats widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(f64::from(*n)),
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Try to get the passed-through raw value.
    pub fn as_object(&self) -> Option<&RawValue> {
        match self {
            Value::Object(raw) => Some(raw),
            _ => None,
        }
    }
}

impl From<RawValue> for Value {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Bool(b) => Value::Bool(b),
            RawValue::Int(n) => Value::Int(n),
            RawValue::BigInt(n) => Value::BigInt(n),
            RawValue::Float(n) => Value::Float(n),
            RawValue::Double(n) => Value::Double(n),
            RawValue::Text(s) => Value::String(s),
            RawValue::Bytes(bytes) => Value::Bytes(bytes),
            other @ (RawValue::Decimal(_)
            | RawValue::Date(_)
            | RawValue::Time(_)
            | RawValue::Timestamp(_)) => Value::Object(other),
        }
    }
}

impl From<Option<RawValue>> for Value {
    fn from(raw: Option<RawValue>) -> Self {
        raw.map_or(Value::Null, Value::from)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::BigInt(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Double(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Bytes(bytes) => write!(f, "<BYTES: {} bytes>", bytes.len()),
            Value::Object(raw) => write!(f, "{}", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_null() {
        let val = Value::Null;
        assert!(val.is_null());
        assert_eq!(val.as_str(), None);
        assert_eq!(format!("{}", val), "NULL");
    }

    #[test]
    fn test_value_widening() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::BigInt(7).as_i32(), None);
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(
            Value::from(RawValue::Text("Alice".to_string())),
            Value::String("Alice".to_string())
        );
        assert_eq!(Value::from(RawValue::Int(1)), Value::Int(1));
        assert_eq!(
            Value::from(RawValue::Decimal("1.50".to_string())),
            Value::Object(RawValue::Decimal("1.50".to_string()))
        );
        assert_eq!(Value::from(None::<RawValue>), Value::Null);
    }

    #[test]
    fn test_raw_display() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(8, 5, 0))
            .unwrap();
        assert_eq!(RawValue::Timestamp(ts).to_string(), "2024-03-09 08:05:00");
        assert_eq!(RawValue::Decimal("12.30".to_string()).to_string(), "12.30");
        assert_eq!(RawValue::Bytes(vec![1, 2, 3]).to_string(), "<BYTES: 3 bytes>");
        assert_eq!(Value::Object(RawValue::Bool(true)).to_string(), "true");
    }
}
