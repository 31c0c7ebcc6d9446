//! Content-type gating: decides whether a request body should be decoded.

use crate::error::{PlistError, Result};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Matches `text/xml`, `application/xml` and any `application/<subtype>+xml`.
pub const DEFAULT_XML_MIME_PATTERN: &str =
    r"^(text/xml|application/([\w!#$%&*`\-.^~]+\+)?xml)$";

/// Compiled once per process; every default matcher shares it.
static DEFAULT_XML_MIME: LazyLock<Regex> = LazyLock::new(|| {
    compile(DEFAULT_XML_MIME_PATTERN).expect("DEFAULT_XML_MIME_PATTERN is a valid regex")
});

/// A case-insensitive regular expression over MIME essences.
#[derive(Debug, Clone)]
pub struct MimeMatcher {
    pattern: Regex,
}

impl MimeMatcher {
    /// Matcher for the standard XML media types.
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_XML_MIME.clone(),
        }
    }

    /// Matcher for a custom pattern, compiled case-insensitively.
    ///
    /// # Errors
    /// Returns `PlistError::Pattern` if the regex does not compile.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = compile(pattern).map_err(|err| PlistError::Pattern(err.to_string()))?;
        Ok(Self { pattern })
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Test a `Content-Type` value. Parameters such as `; charset=utf-8`
    /// are stripped before matching.
    pub fn matches(&self, content_type: &str) -> bool {
        self.pattern.is_match(essence(content_type))
    }
}

impl Default for MimeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// The media type without parameters: `"text/xml; charset=utf-8"` → `"text/xml"`.
pub fn essence(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}
