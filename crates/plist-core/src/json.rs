//! JSON projection of decoded plists.
//!
//! `PlistValue` implements `serde::Serialize`, so any serde format works; this
//! module fixes the JSON mapping:
//!
//! - `integer` and `real` both become JSON numbers (non-finite reals become `null`)
//! - `date` becomes an RFC 3339 string in UTC (`2011-05-12T14:20:00Z`)
//! - `data` becomes a standard base64 string
//! - `dict` becomes an object with keys in document order

use crate::types::{Dict, PlistValue};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::SecondsFormat;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

impl Serialize for PlistValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PlistValue::String(s) => serializer.serialize_str(s),
            PlistValue::Integer(n) => serializer.serialize_i64(*n),
            PlistValue::UnsignedInteger(n) => serializer.serialize_u64(*n),
            PlistValue::Real(f) => serializer.serialize_f64(*f),
            PlistValue::Boolean(b) => serializer.serialize_bool(*b),
            PlistValue::Date(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            PlistValue::Data(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            PlistValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PlistValue::Dict(dict) => dict.serialize(serializer),
        }
    }
}

impl Serialize for Dict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl PlistValue {
    /// Convert to a `serde_json::Value`.
    pub fn to_json(&self) -> Value {
        // Serializing into `Value` only fails for non-string map keys, and
        // dict keys are always strings.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<PlistValue> for Value {
    fn from(value: PlistValue) -> Self {
        value.to_json()
    }
}

/// Serialize a value to JSON text, optionally pretty-printed.
pub fn to_json_string(value: &PlistValue, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
