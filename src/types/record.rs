//! Attribute records produced by the decoder.

use std::collections::HashMap;

use super::value::Value;

/// A per-row container mapping column labels to coerced values.
///
/// Implement this for your own model types to decode straight into them.
pub trait AttributeRecord {
    /// Store one attribute, replacing any previous value under the label.
    fn set_attribute(&mut self, label: &str, value: Value);
}

/// Capability that creates fresh, empty records of one variant.
///
/// Any `Fn() -> R` is a variant, so a constructor such as `Record::new` or a
/// closure can be passed directly.
pub trait RecordVariant {
    /// Record type this variant produces.
    type Record: AttributeRecord;

    /// Create a fresh, empty record.
    fn new_record(&self) -> Self::Record;
}

impl<F, R> RecordVariant for F
where
    F: Fn() -> R,
    R: AttributeRecord,
{
    type Record = R;

    fn new_record(&self) -> R {
        self()
    }
}

/// Default attribute record backed by a hash map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    attrs: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get value by label.
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.attrs.get(label)
    }

    /// Get an i32 attribute.
    pub fn get_i32(&self, label: &str) -> Option<i32> {
        self.get(label).and_then(Value::as_i32)
    }

    /// Get an integer attribute, widening i32.
    pub fn get_i64(&self, label: &str) -> Option<i64> {
        self.get(label).and_then(Value::as_i64)
    }

    /// Get a floating-point attribute, widening f32.
    pub fn get_f64(&self, label: &str) -> Option<f64> {
        self.get(label).and_then(Value::as_f64)
    }

    /// Get a boolean attribute.
    pub fn get_bool(&self, label: &str) -> Option<bool> {
        self.get(label).and_then(Value::as_bool)
    }

    /// Get a string attribute.
    pub fn get_str(&self, label: &str) -> Option<&str> {
        self.get(label).and_then(Value::as_str)
    }

    /// Get a byte attribute.
    pub fn get_bytes(&self, label: &str) -> Option<&[u8]> {
        self.get(label).and_then(Value::as_bytes)
    }

    /// Check whether the record has an entry for the label.
    ///
    /// A NULL column still has an entry.
    pub fn contains(&self, label: &str) -> bool {
        self.attrs.contains_key(label)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Check if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Attribute labels, in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    /// Borrow the attribute map.
    pub fn attrs(&self) -> &HashMap<String, Value> {
        &self.attrs
    }
}

impl AttributeRecord for Record {
    fn set_attribute(&mut self, label: &str, value: Value) {
        self.attrs.insert(label.to_string(), value);
    }
}

impl AttributeRecord for HashMap<String, Value> {
    fn set_attribute(&mut self, label: &str, value: Value) {
        self.insert(label.to_string(), value);
    }
}
