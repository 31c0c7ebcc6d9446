//! Request-body boundary: gate on headers, then decode the buffered body.
//!
//! This is the only layer that knows about HTTP. It decides from the request
//! headers whether the body is a plist at all, enforces a size limit, and maps
//! each failure to a status code via [`BodyError::status`].

use crate::decoder::decode_str_with;
use crate::error::{PlistError, Result};
use crate::mime::MimeMatcher;
use crate::tree::TreeOptions;
use crate::types::PlistValue;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING};
use http::{HeaderMap, StatusCode};
use thiserror::Error;
use tracing::debug;

/// Default maximum body size: 1 MiB.
pub const DEFAULT_LIMIT: usize = 1024 * 1024;

/// Errors from [`BodyParser::parse`].
#[derive(Error, Debug)]
pub enum BodyError {
    /// The body was empty or whitespace only.
    #[error("request body is empty")]
    LengthRequired,

    #[error("request body of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("request body is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Malformed XML or a plist structural error.
    #[error(transparent)]
    Plist(#[from] PlistError),
}

impl BodyError {
    /// The HTTP status a server should answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            BodyError::LengthRequired => StatusCode::LENGTH_REQUIRED,
            BodyError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            BodyError::Encoding(_) | BodyError::Plist(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Configured plist body parser.
///
/// ```
/// use http::{header::CONTENT_TYPE, HeaderMap, HeaderValue};
/// use plist_core::BodyParser;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
/// headers.insert("content-length", HeaderValue::from_static("35"));
///
/// let parser = BodyParser::new();
/// let value = parser.parse(&headers, b"<plist><integer>6</integer></plist>").unwrap();
/// assert_eq!(value.and_then(|v| v.as_i64()), Some(6));
/// ```
#[derive(Debug, Clone)]
pub struct BodyParser {
    mime: MimeMatcher,
    limit: usize,
    tree: TreeOptions,
}

impl Default for BodyParser {
    fn default() -> Self {
        Self {
            mime: MimeMatcher::new(),
            limit: DEFAULT_LIMIT,
            tree: TreeOptions::default(),
        }
    }
}

impl BodyParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum accepted body size in bytes.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_mime(mut self, mime: MimeMatcher) -> Self {
        self.mime = mime;
        self
    }

    /// Replace the content-type pattern.
    ///
    /// # Errors
    /// Returns `PlistError::Pattern` if the regex does not compile.
    pub fn with_mime_pattern(self, pattern: &str) -> Result<Self> {
        Ok(self.with_mime(MimeMatcher::with_pattern(pattern)?))
    }

    pub fn with_tree_options(mut self, tree: TreeOptions) -> Self {
        self.tree = tree;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn mime(&self) -> &MimeMatcher {
        &self.mime
    }

    /// Whether a request with these headers should be decoded.
    pub fn accepts(&self, headers: &HeaderMap) -> bool {
        has_body(headers) && self.mime.matches(content_type(headers))
    }

    /// Decode the body if the headers say it is a plist.
    ///
    /// Returns `Ok(None)` when the request has no body or its content type
    /// does not match, leaving the body for another parser.
    pub fn parse(
        &self,
        headers: &HeaderMap,
        body: &[u8],
    ) -> std::result::Result<Option<PlistValue>, BodyError> {
        if !self.accepts(headers) {
            debug!(
                content_type = content_type(headers),
                "skipping body: no body or content type not matched"
            );
            return Ok(None);
        }
        self.parse_bytes(body).map(Some)
    }

    /// Decode a buffered body without looking at any headers.
    pub fn parse_bytes(&self, body: &[u8]) -> std::result::Result<PlistValue, BodyError> {
        if body.len() > self.limit {
            return Err(BodyError::TooLarge {
                size: body.len(),
                limit: self.limit,
            });
        }
        let text = std::str::from_utf8(body)?;
        if text.trim().is_empty() {
            return Err(BodyError::LengthRequired);
        }

        decode_str_with(text, &self.tree).map_err(|err| {
            debug!(kind = ?err.kind(), error = %err, "rejecting plist body");
            BodyError::from(err)
        })
    }
}

/// A request has a body when it is chunked or declares a non-zero length.
pub fn has_body(headers: &HeaderMap) -> bool {
    let chunked = headers.contains_key(TRANSFER_ENCODING);
    let sized = headers
        .get(CONTENT_LENGTH)
        .is_some_and(|len| len.as_bytes() != b"0");
    chunked || sized
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
