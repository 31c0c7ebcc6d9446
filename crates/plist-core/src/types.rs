//! Plist value types produced by the decoder.
//!
//! Integers and reals keep separate variants here so callers can tell them
//! apart; the JSON projection in [`crate::json`] collapses both into a single
//! JSON number. `<integer>` values above `i64::MAX` decode to
//! `UnsignedInteger`; everything else in range is `Integer`.

use chrono::{DateTime, Utc};

/// A decoded property-list value.
#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    String(String),
    Integer(i64),
    UnsignedInteger(u64),
    Real(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    Data(Vec<u8>),
    Array(Vec<PlistValue>),
    Dict(Dict),
}

impl PlistValue {
    /// Name of the plist element this value was decoded from.
    pub fn type_name(&self) -> &'static str {
        match self {
            PlistValue::String(_) => "string",
            PlistValue::Integer(_) | PlistValue::UnsignedInteger(_) => "integer",
            PlistValue::Real(_) => "real",
            PlistValue::Boolean(_) => "boolean",
            PlistValue::Date(_) => "date",
            PlistValue::Data(_) => "data",
            PlistValue::Array(_) => "array",
            PlistValue::Dict(_) => "dict",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PlistValue::Integer(n) => Some(*n),
            PlistValue::UnsignedInteger(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Integer value if it is non-negative.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PlistValue::Integer(n) => u64::try_from(*n).ok(),
            PlistValue::UnsignedInteger(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of either an integer or a real.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PlistValue::Integer(n) => Some(*n as f64),
            PlistValue::UnsignedInteger(n) => Some(*n as f64),
            PlistValue::Real(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PlistValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            PlistValue::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            PlistValue::Data(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            PlistValue::Dict(dict) => Some(dict),
            _ => None,
        }
    }
}

/// Key/value pairs in document order.
///
/// Uses `Vec<(String, PlistValue)>` rather than a hash map so iteration
/// follows the order keys appeared in the document. Re-inserting an existing
/// key replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict {
    entries: Vec<(String, PlistValue)>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: String, value: PlistValue) -> Option<PlistValue> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlistValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, PlistValue)> for Dict {
    fn from_iter<I: IntoIterator<Item = (String, PlistValue)>>(iter: I) -> Self {
        let mut dict = Dict::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}

impl IntoIterator for Dict {
    type Item = (String, PlistValue);
    type IntoIter = std::vec::IntoIter<(String, PlistValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
