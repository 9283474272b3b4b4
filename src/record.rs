//! Conversions between key/value pair lists and mappings.
//!
//! Forms edit labels and annotations as ordered lists of [`KeyValue`] rows,
//! while the rule model stores them as a [`Record`].

use std::collections::BTreeMap;

/// A string mapping, such as a rule's labels or annotations.
pub type Record = BTreeMap<String, String>;

/// One key/value row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyValue {
    /// The key.
    pub key: String,
    /// The value.
    pub value: String,
}

impl KeyValue {
    /// Create a row.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for KeyValue {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Collapse rows into a mapping. A later row overwrites an earlier row with
/// the same key.
///
/// ```
/// use alertkit::record::{array_to_record, KeyValue};
///
/// let record = array_to_record(&[KeyValue::new("a", "1"), KeyValue::new("b", "2")]);
/// assert_eq!(record["a"], "1");
/// assert_eq!(record["b"], "2");
/// ```
pub fn array_to_record(items: &[KeyValue]) -> Record {
    items
        .iter()
        .map(|item| (item.key.clone(), item.value.clone()))
        .collect()
}

/// Expand a mapping into rows, one per entry.
pub fn record_to_array(record: &Record) -> Vec<KeyValue> {
    record
        .iter()
        .map(|(key, value)| KeyValue::new(key.as_str(), value.as_str()))
        .collect()
}
