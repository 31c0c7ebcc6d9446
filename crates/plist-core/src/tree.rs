//! XML element tree consumed by the decoder.
//!
//! [`parse_document`] turns XML text into a [`Document`] using `quick-xml`.
//! Everything the plist grammar does not care about (declarations, DOCTYPE,
//! comments, processing instructions, attributes) is dropped, but the input
//! must still be well-formed: mismatched or unclosed tags, stray text outside
//! the document element and bad entity references all fail here, before the
//! decoder ever sees a tree.
//!
//! Nesting depth is capped by [`TreeOptions::max_depth`], so the recursive
//! decoder never walks a tree deeper than the caller allowed.
//!
//! Whitespace text nodes are kept as-is. Deciding which text is insignificant
//! is the decoder's job.

use crate::error::{PlistError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Display;
use std::str;

/// Default cap on element nesting, counting `<plist>` itself.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options controlling tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    /// Lowercase element names, so `<Dict>` and `<dict>` decode the same.
    pub normalize_tags: bool,
    /// Deepest element nesting accepted. Opening an element below this
    /// depth fails with `PlistError::NestingTooDeep`.
    pub max_depth: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            normalize_tags: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TreeOptions {
    /// Set whether element names are lowercased.
    pub fn with_normalize_tags(mut self, normalize_tags: bool) -> Self {
        self.normalize_tags = normalize_tags;
        self
    }

    /// Set the maximum element nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A parsed XML document. `root` is `None` when the input held no element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub root: Option<Element>,
}

/// A child of an element: either a nested element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A named element with its children in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child element (builder style).
    pub fn with_element(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append a text child (builder style). Adjacent text is merged.
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        self.push_text(text.as_ref());
        self
    }

    /// Concatenated text of this element and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.children.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(text),
            _ => self.children.push(Node::Text(text.to_string())),
        }
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) => collect_text(inner, out),
        }
    }
}

/// Parse XML text into an element tree.
///
/// # Errors
/// Returns `PlistError::Xml` if the input is not well-formed XML.
pub fn parse_document(xml: &str, options: &TreeOptions) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder::new(options.max_depth);

    loop {
        let position = reader.buffer_position() as u64;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => return Err(xml_error(reader.buffer_position() as u64, err)),
        };

        match event {
            Event::Start(e) => {
                let element = open_element(&e, options, position)?;
                builder.open(element, position)?;
            }
            Event::Empty(e) => {
                let element = open_element(&e, options, position)?;
                builder.open(element, position)?;
                builder.close(position)?;
            }
            Event::End(_) => builder.close(position)?,
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| xml_error(position, err))?;
                builder.text(&text, position)?;
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                let text = str::from_utf8(&raw).map_err(|err| xml_error(position, err))?;
                builder.text(text, position)?;
            }
            Event::Eof => break,
            // Declarations, DOCTYPE, comments and processing instructions carry
            // nothing the decoder needs.
            _ => {}
        }
    }

    builder.finish(reader.buffer_position() as u64)
}

/// Builds the tree from a stream of open/close/text events.
struct TreeBuilder {
    open: Vec<Element>,
    root: Option<Element>,
    max_depth: usize,
}

impl TreeBuilder {
    fn new(max_depth: usize) -> Self {
        Self {
            open: Vec::new(),
            root: None,
            max_depth,
        }
    }

    fn open(&mut self, element: Element, position: u64) -> Result<()> {
        if self.open.is_empty() && self.root.is_some() {
            return Err(xml_error(
                position,
                format!("second document element <{}>", element.name),
            ));
        }
        if self.open.len() >= self.max_depth {
            return Err(PlistError::NestingTooDeep {
                limit: self.max_depth,
                position,
            });
        }
        self.open.push(element);
        Ok(())
    }

    fn close(&mut self, position: u64) -> Result<()> {
        let element = self
            .open
            .pop()
            .ok_or_else(|| xml_error(position, "closing tag without matching open tag"))?;
        match self.open.last_mut() {
            Some(parent) => parent.children.push(Node::Element(element)),
            None => self.root = Some(element),
        }
        Ok(())
    }

    fn text(&mut self, text: &str, position: u64) -> Result<()> {
        match self.open.last_mut() {
            Some(parent) => parent.push_text(text),
            None if text.trim().is_empty() => {}
            None => {
                return Err(xml_error(
                    position,
                    "text content outside the document element",
                ))
            }
        }
        Ok(())
    }

    fn finish(self, position: u64) -> Result<Document> {
        if let Some(unclosed) = self.open.last() {
            return Err(xml_error(
                position,
                format!("unclosed element <{}>", unclosed.name),
            ));
        }
        Ok(Document { root: self.root })
    }
}

fn open_element(start: &BytesStart<'_>, options: &TreeOptions, position: u64) -> Result<Element> {
    let raw = start.name();
    let name = str::from_utf8(raw.as_ref()).map_err(|err| xml_error(position, err))?;
    if name.is_empty() {
        return Err(xml_error(position, "element with empty name"));
    }
    // Attributes are ignored, but must still be well-formed.
    for attr in start.attributes() {
        attr.map_err(|err| xml_error(position, err))?;
    }
    let name = if options.normalize_tags {
        name.to_lowercase()
    } else {
        name.to_string()
    };
    Ok(Element::new(name))
}

fn xml_error(position: u64, err: impl Display) -> PlistError {
    PlistError::Xml {
        position,
        message: err.to_string(),
    }
}
