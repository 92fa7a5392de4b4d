//! Search result records.
//!
//! A [`ResultRecord`] is whatever the search provider hands back for one
//! match: an identifier, a human readable label and any extra fields the
//! provider cares to attach. The widget only ever looks at `id` and `display`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a search result.
///
/// Providers emit both numeric and string identifiers, so both deserialize
/// into the same string-backed id. It always serializes as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    UInt(u64),
    Str(String),
}

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => Self(n.to_string()),
            RawId::UInt(n) => Self(n.to_string()),
            RawId::Str(s) => Self(s),
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl RecordId {
    /// Create an id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw value, as used for the option `value`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RecordId {
                fn from(n: $t) -> Self {
                    Self(n.to_string())
                }
            }
        )*
    };
}

impl_from_int!(i32, u32, i64, u64, usize);

/// One searchable entity returned by a search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Identifier, becomes the option value.
    pub id: RecordId,
    /// Label shown in the option list.
    pub display: String,
    /// Any additional fields the provider attached.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultRecord {
    /// Create a record with no extra fields.
    pub fn new(id: impl Into<RecordId>, display: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: display.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// The ordered results of the most recently accepted search.
///
/// Order is exactly the provider's order; nothing is sorted or de-duplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    records: Vec<ResultRecord>,
}

impl ResultSet {
    /// Create a result set from provider output.
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    /// Record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ResultRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    /// All records as a slice.
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }
}

impl From<Vec<ResultRecord>> for ResultSet {
    fn from(records: Vec<ResultRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
