//! Error types for plist decoding and request-body parsing.

use thiserror::Error;

/// Errors that can occur while building the XML tree or decoding a plist.
///
/// Every variant is terminal: decoding stops at the first failure and no
/// partial value is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlistError {
    /// The input was not well-formed XML (tree construction path).
    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// Elements were nested deeper than the configured limit.
    #[error("element nesting exceeds {limit} levels at byte {position}")]
    NestingTooDeep { limit: usize, position: u64 },

    /// The document element is missing or is not `<plist>`.
    #[error("invalid root element: expected <plist>, found {}", describe_tag(.found))]
    InvalidRoot { found: Option<String> },

    /// A value position had nothing to decode.
    #[error("missing object: {context}")]
    MissingObject { context: &'static str },

    /// The `<plist>` root held more than one value.
    #[error("unexpected second root object <{found}>")]
    TrailingObject { found: String },

    /// Non-whitespace text appeared where only elements are allowed.
    #[error("unexpected text content: {text:?}")]
    UnexpectedText { text: String },

    /// A dict child in key position was not a `<key>` element.
    #[error("key expected in dict, found <{found}>")]
    KeyExpected { found: String },

    /// A `<key>` element had no value element after it.
    #[error("value expected for key {key:?}")]
    ValueExpected { key: String },

    /// An element tag outside the plist vocabulary.
    #[error("unknown plist object type <{tag}>")]
    UnknownObjectType { tag: String },

    /// The text of a scalar element could not be converted.
    #[error("invalid <{tag}> content {text:?}: {reason}")]
    ScalarParse {
        tag: &'static str,
        text: String,
        reason: String,
    },

    /// A custom MIME pattern failed to compile.
    #[error("invalid MIME pattern: {0}")]
    Pattern(String),
}

/// Coarse classification of a [`PlistError`], for callers that only need
/// to branch on the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedXml,
    NestingTooDeep,
    InvalidRoot,
    MissingObject,
    TrailingObject,
    UnexpectedText,
    KeyExpected,
    ValueExpected,
    UnknownObjectType,
    ScalarParseError,
    InvalidPattern,
}

impl PlistError {
    /// The failure kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlistError::Xml { .. } => ErrorKind::MalformedXml,
            PlistError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            PlistError::InvalidRoot { .. } => ErrorKind::InvalidRoot,
            PlistError::MissingObject { .. } => ErrorKind::MissingObject,
            PlistError::TrailingObject { .. } => ErrorKind::TrailingObject,
            PlistError::UnexpectedText { .. } => ErrorKind::UnexpectedText,
            PlistError::KeyExpected { .. } => ErrorKind::KeyExpected,
            PlistError::ValueExpected { .. } => ErrorKind::ValueExpected,
            PlistError::UnknownObjectType { .. } => ErrorKind::UnknownObjectType,
            PlistError::ScalarParse { .. } => ErrorKind::ScalarParseError,
            PlistError::Pattern(_) => ErrorKind::InvalidPattern,
        }
    }

    /// Whether the document was well-formed XML but broke the plist grammar.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::MalformedXml | ErrorKind::NestingTooDeep | ErrorKind::InvalidPattern
        )
    }
}

fn describe_tag(tag: &Option<String>) -> String {
    match tag {
        Some(name) => format!("<{name}>"),
        None => "no element".to_string(),
    }
}

/// Convenience alias used throughout plist-core.
pub type Result<T> = std::result::Result<T, PlistError>;
