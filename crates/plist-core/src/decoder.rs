//! XML plist decoder — converts an element tree into a [`PlistValue`].
//!
//! The walk is a single top-down recursion over an immutable [`Document`]:
//!
//! - The root decoder checks for `<plist>` and decodes exactly one value inside it.
//! - The object dispatcher routes each element by tag to a scalar, array or dict decoder.
//! - Arrays and dicts recurse back into the dispatcher for every element they contain.
//!
//! # Whitespace
//!
//! Text between sibling elements is only allowed when it is whitespace. Every
//! container walks its children through [`Children::next_element`], which skips
//! whitespace-only text nodes and rejects any other text with
//! `PlistError::UnexpectedText`. Text inside scalar elements is read through
//! `Element::text_content` and never passes through that filter.

use crate::error::{PlistError, Result};
use crate::scalar;
use crate::tree::{parse_document, Document, Element, Node, TreeOptions};
use crate::types::{Dict, PlistValue};
use tracing::{debug, trace};

const ROOT_TAG: &str = "plist";
const KEY_TAG: &str = "key";

/// The closed set of tags allowed in a value position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectTag {
    Dict,
    Array,
    String,
    Integer,
    Real,
    Date,
    True,
    False,
    Data,
}

impl ObjectTag {
    fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "dict" => ObjectTag::Dict,
            "array" => ObjectTag::Array,
            "string" => ObjectTag::String,
            "integer" => ObjectTag::Integer,
            "real" => ObjectTag::Real,
            "date" => ObjectTag::Date,
            "true" => ObjectTag::True,
            "false" => ObjectTag::False,
            "data" => ObjectTag::Data,
            _ => return None,
        };
        Some(tag)
    }
}

/// Parse XML text and decode it as a plist, using default tree options.
///
/// # Errors
/// Returns `PlistError::Xml` for malformed XML and a structural variant
/// (`InvalidRoot`, `MissingObject`, ...) when the XML breaks the plist grammar.
pub fn decode_str(xml: &str) -> Result<PlistValue> {
    decode_str_with(xml, &TreeOptions::default())
}

/// Parse XML text with the given tree options and decode it as a plist.
pub fn decode_str_with(xml: &str, options: &TreeOptions) -> Result<PlistValue> {
    let document = parse_document(xml, options)?;
    decode_document(&document)
}

/// Decode a parsed document whose root must be `<plist>`.
///
/// The root must hold exactly one value. Whitespace around it is ignored; an
/// empty root fails with `MissingObject` and a second value fails with
/// `TrailingObject`.
pub fn decode_document(document: &Document) -> Result<PlistValue> {
    let root = match &document.root {
        Some(root) if root.name == ROOT_TAG => root,
        other => {
            return Err(PlistError::InvalidRoot {
                found: other.as_ref().map(|root| root.name.clone()),
            })
        }
    };
    debug!(children = root.children.len(), "decoding plist document");

    let mut children = Children::new(root);
    let value = dispatch(children.next_element()?, "plist root has no value")?;

    if let Some(extra) = children.next_element()? {
        return Err(PlistError::TrailingObject {
            found: extra.name.clone(),
        });
    }

    debug!(kind = value.type_name(), "decoded plist document");
    Ok(value)
}

/// Decode a single value element (`<dict>`, `<array>`, `<string>`, ...).
///
/// # Errors
/// Returns `PlistError::UnknownObjectType` naming the tag when it is not part
/// of the plist vocabulary.
pub fn decode_element(element: &Element) -> Result<PlistValue> {
    let tag = ObjectTag::from_name(&element.name).ok_or_else(|| PlistError::UnknownObjectType {
        tag: element.name.clone(),
    })?;
    trace!(tag = %element.name, "decoding object");

    match tag {
        ObjectTag::Dict => decode_dict(element).map(PlistValue::Dict),
        ObjectTag::Array => decode_array(element).map(PlistValue::Array),
        ObjectTag::String => Ok(PlistValue::String(element.text_content())),
        ObjectTag::Integer => scalar::parse_integer(&element.text_content()),
        ObjectTag::Real => scalar::parse_real(&element.text_content()).map(PlistValue::Real),
        ObjectTag::Date => scalar::parse_date(&element.text_content()).map(PlistValue::Date),
        ObjectTag::True => Ok(PlistValue::Boolean(true)),
        ObjectTag::False => Ok(PlistValue::Boolean(false)),
        ObjectTag::Data => scalar::parse_data(&element.text_content()).map(PlistValue::Data),
    }
}

/// Object dispatcher entry for a position that may be empty.
fn dispatch(element: Option<&Element>, context: &'static str) -> Result<PlistValue> {
    match element {
        Some(element) => decode_element(element),
        None => Err(PlistError::MissingObject { context }),
    }
}

/// Decode every element child in order. An array with no element children
/// is an empty array, not an error.
fn decode_array(element: &Element) -> Result<Vec<PlistValue>> {
    let mut items = Vec::new();
    let mut children = Children::new(element);
    while let Some(child) = children.next_element()? {
        items.push(decode_element(child)?);
    }
    Ok(items)
}

/// Decode alternating `<key>`/value children.
///
/// A repeated key replaces the earlier value (last one wins).
fn decode_dict(element: &Element) -> Result<Dict> {
    let mut dict = Dict::new();
    let mut children = Children::new(element);

    while let Some(key_element) = children.next_element()? {
        if key_element.name != KEY_TAG {
            return Err(PlistError::KeyExpected {
                found: key_element.name.clone(),
            });
        }
        let key = key_element.text_content();

        let value_element = match children.next_element()? {
            Some(value_element) => value_element,
            None => return Err(PlistError::ValueExpected { key }),
        };
        let value = decode_element(value_element)?;

        if dict.insert(key, value).is_some() {
            trace!("duplicate dict key, keeping the last value");
        }
    }

    Ok(dict)
}

/// Cursor over a container's children.
struct Children<'a> {
    nodes: std::slice::Iter<'a, Node>,
}

impl<'a> Children<'a> {
    fn new(parent: &'a Element) -> Self {
        Self {
            nodes: parent.children.iter(),
        }
    }

    /// Advance to the next element, skipping whitespace-only text.
    ///
    /// Returns `Ok(None)` once the children are exhausted.
    fn next_element(&mut self) -> Result<Option<&'a Element>> {
        for node in self.nodes.by_ref() {
            match node {
                Node::Element(element) => return Ok(Some(element)),
                Node::Text(text) if text.trim().is_empty() => continue,
                Node::Text(text) => {
                    return Err(PlistError::UnexpectedText { text: text.clone() });
                }
            }
        }
        Ok(None)
    }
}
