//! Leaf converters for the text-carrying plist elements.

use crate::error::{PlistError, Result};
use crate::types::PlistValue;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::Display;

/// Standard alphabet; trailing `=` padding is optional on decode.
const DATA_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Parse `<integer>` text. Surrounding whitespace is ignored, one leading
/// sign is allowed and a `0x` prefix selects hexadecimal.
///
/// Values in `i64` range become `Integer`; larger positive values up to
/// `u64::MAX` become `UnsignedInteger`.
pub(crate) fn parse_integer(text: &str) -> Result<PlistValue> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (digits, radix) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (unsigned, 10),
    };

    // `from_str_radix` takes its own sign, which must not stack on ours.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(scalar_error("integer", text, "invalid digit found in string"));
    }
    let magnitude =
        u64::from_str_radix(digits, radix).map_err(|err| scalar_error("integer", text, err))?;

    if negative {
        let signed = -i128::from(magnitude);
        return i64::try_from(signed)
            .map(PlistValue::Integer)
            .map_err(|err| scalar_error("integer", text, err));
    }
    Ok(match i64::try_from(magnitude) {
        Ok(n) => PlistValue::Integer(n),
        Err(_) => PlistValue::UnsignedInteger(magnitude),
    })
}

/// Parse `<real>` text as an `f64`.
pub(crate) fn parse_real(text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|err| scalar_error("real", text, err))
}

/// Parse `<date>` text.
///
/// Accepts RFC 3339 (`2011-05-12T14:20:00Z`, offsets allowed), and falls back
/// to a zone-less `YYYY-MM-DDTHH:MM:SS` or a bare `YYYY-MM-DD`, both taken as UTC.
pub(crate) fn parse_date(text: &str) -> Result<DateTime<Utc>> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }

    let day =
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|err| scalar_error("date", text, err))?;
    day.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| scalar_error("date", text, "date out of range"))
}

/// Decode `<data>` text. Line breaks and indentation inside the payload
/// are common in real plists, so all ASCII whitespace is dropped first.
pub(crate) fn parse_data(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    DATA_ENGINE
        .decode(compact.as_bytes())
        .map_err(|err| scalar_error("data", text, err))
}

fn scalar_error(tag: &'static str, text: &str, reason: impl Display) -> PlistError {
    PlistError::ScalarParse {
        tag,
        text: text.to_string(),
        reason: reason.to_string(),
    }
}
