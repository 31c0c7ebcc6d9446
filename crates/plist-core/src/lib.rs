//! # plist-core
//!
//! Decoder for **XML property lists** (plists), plus the request-body glue
//! that decides when to run it.
//!
//! A plist is an XML document with a fixed vocabulary: `<plist>` wraps exactly
//! one value, which is a `dict`, `array`, `string`, `integer`, `real`, `date`,
//! `true`, `false` or `data` element. Dicts hold alternating `<key>`/value pairs.
//!
//! ## Quick start
//!
//! ```rust
//! use plist_core::{decode_str, PlistValue};
//!
//! let xml = "<plist><dict><key>names</key><array><string>deepak</string></array>\
//!            <key>enabled</key><true/></dict></plist>";
//! let value = decode_str(xml).unwrap();
//!
//! let dict = value.as_dict().unwrap();
//! assert_eq!(dict.get("enabled"), Some(&PlistValue::Boolean(true)));
//! assert_eq!(
//!     value.to_json(),
//!     serde_json::json!({"names": ["deepak"], "enabled": true})
//! );
//! ```
//!
//! ## Modules
//!
//! - [`tree`] — XML text → element tree (`quick-xml`)
//! - [`decoder`] — element tree → [`PlistValue`]
//! - [`types`] — [`PlistValue`] and [`Dict`]
//! - [`json`] — JSON projection of decoded values
//! - [`mime`] — content-type matching
//! - [`body`] — header gating, size limit, status mapping
//! - [`error`] — Error types for tree and decode failures

pub mod body;
pub mod decoder;
pub mod error;
pub mod json;
pub mod mime;
mod scalar;
pub mod tree;
pub mod types;

pub use body::{BodyError, BodyParser};
pub use decoder::{decode_document, decode_element, decode_str, decode_str_with};
pub use error::{ErrorKind, PlistError};
pub use json::to_json_string;
pub use mime::MimeMatcher;
pub use tree::{parse_document, Document, Element, Node, TreeOptions, DEFAULT_MAX_DEPTH};
pub use types::{Dict, PlistValue};
