use chrono::{TimeZone, Utc};
use plist_core::{decode_str, Dict, ErrorKind, PlistError, PlistValue};

/// Helper: wrap a value element in a `<plist>` root and decode it.
fn decode_value(inner: &str) -> Result<PlistValue, PlistError> {
    decode_str(&format!("<plist>{inner}</plist>"))
}

fn assert_kind(result: Result<PlistValue, PlistError>, expected: ErrorKind) {
    match result {
        Ok(value) => panic!("expected {expected:?}, decoded {value:?}"),
        Err(err) => assert_eq!(err.kind(), expected, "unexpected error: {err}"),
    }
}

// ============================================================================
// Scalars (Root-Level)
// ============================================================================

#[test]
fn decode_integer() {
    assert_eq!(decode_value("<integer>6</integer>").unwrap(), PlistValue::Integer(6));
}

#[test]
fn decode_negative_integer() {
    assert_eq!(decode_value("<integer>-42</integer>").unwrap(), PlistValue::Integer(-42));
}

#[test]
fn decode_hex_integer() {
    assert_eq!(decode_value("<integer>0x1F</integer>").unwrap(), PlistValue::Integer(31));
}

#[test]
fn decode_signed_hex_integer() {
    assert_eq!(decode_value("<integer>-0x10</integer>").unwrap(), PlistValue::Integer(-16));
    assert_eq!(decode_value("<integer>+0XfF</integer>").unwrap(), PlistValue::Integer(255));
}

#[test]
fn decode_integer_range_limits() {
    assert_eq!(
        decode_value("<integer>-9223372036854775808</integer>").unwrap(),
        PlistValue::Integer(i64::MIN)
    );
    assert_eq!(
        decode_value("<integer>9223372036854775807</integer>").unwrap(),
        PlistValue::Integer(i64::MAX)
    );
}

#[test]
fn decode_unsigned_64_bit_integer() {
    let value = decode_value("<integer>18446744073709551615</integer>").unwrap();
    assert_eq!(value, PlistValue::UnsignedInteger(u64::MAX));
    assert_eq!(value.type_name(), "integer");
    assert_eq!(value.as_u64(), Some(u64::MAX));
    assert_eq!(value.as_i64(), None);

    assert_eq!(
        decode_value("<integer>0x8000000000000000</integer>").unwrap(),
        PlistValue::UnsignedInteger(1 << 63)
    );
}

#[test]
fn decode_integer_with_padding() {
    assert_eq!(decode_value("<integer>\n  7\n</integer>").unwrap(), PlistValue::Integer(7));
}

#[test]
fn decode_real() {
    assert_eq!(decode_value("<real>0.6</real>").unwrap(), PlistValue::Real(0.6));
}

#[test]
fn decode_real_exponent() {
    assert_eq!(decode_value("<real>1.5e3</real>").unwrap(), PlistValue::Real(1500.0));
}

#[test]
fn decode_string() {
    assert_eq!(
        decode_value("<string>deepak</string>").unwrap(),
        PlistValue::String("deepak".to_string())
    );
}

#[test]
fn decode_string_keeps_whitespace_verbatim() {
    assert_eq!(
        decode_value("<string>  two  words \n</string>").unwrap(),
        PlistValue::String("  two  words \n".to_string())
    );
}

#[test]
fn decode_string_unescapes_entities() {
    assert_eq!(
        decode_value("<string>a &lt;b&gt; &amp; c</string>").unwrap(),
        PlistValue::String("a <b> & c".to_string())
    );
}

#[test]
fn decode_string_cdata() {
    assert_eq!(
        decode_value("<string><![CDATA[<raw> & text]]></string>").unwrap(),
        PlistValue::String("<raw> & text".to_string())
    );
}

#[test]
fn decode_empty_string() {
    assert_eq!(
        decode_value("<string/>").unwrap(),
        PlistValue::String(String::new())
    );
}

#[test]
fn decode_true() {
    assert_eq!(decode_value("<true/>").unwrap(), PlistValue::Boolean(true));
}

#[test]
fn decode_false() {
    assert_eq!(decode_value("<false/>").unwrap(), PlistValue::Boolean(false));
}

#[test]
fn decode_boolean_ignores_text() {
    assert_eq!(decode_value("<true>no</true>").unwrap(), PlistValue::Boolean(true));
    assert_eq!(decode_value("<false> yes </false>").unwrap(), PlistValue::Boolean(false));
}

#[test]
fn decode_date_rfc3339() {
    let expected = Utc.with_ymd_and_hms(2011, 5, 12, 14, 20, 0).unwrap();
    assert_eq!(
        decode_value("<date>2011-05-12T14:20:00Z</date>").unwrap(),
        PlistValue::Date(expected)
    );
}

#[test]
fn decode_date_with_offset_normalizes_to_utc() {
    let expected = Utc.with_ymd_and_hms(2011, 5, 12, 12, 20, 0).unwrap();
    assert_eq!(
        decode_value("<date>2011-05-12T14:20:00+02:00</date>").unwrap(),
        PlistValue::Date(expected)
    );
}

#[test]
fn decode_date_without_zone_is_utc() {
    let expected = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(
        decode_value("<date>2020-01-02T03:04:05</date>").unwrap(),
        PlistValue::Date(expected)
    );
}

#[test]
fn decode_date_only() {
    let expected = Utc.with_ymd_and_hms(1965, 7, 1, 0, 0, 0).unwrap();
    assert_eq!(
        decode_value("<date>1965-07-01</date>").unwrap(),
        PlistValue::Date(expected)
    );
}

#[test]
fn decode_data() {
    assert_eq!(
        decode_value("<data>aGVsbG8=</data>").unwrap(),
        PlistValue::Data(b"hello".to_vec())
    );
}

#[test]
fn decode_data_with_line_breaks() {
    assert_eq!(
        decode_value("<data>\n\taGVs\n\tbG8=\n</data>").unwrap(),
        PlistValue::Data(b"hello".to_vec())
    );
}

#[test]
fn decode_empty_data() {
    assert_eq!(decode_value("<data></data>").unwrap(), PlistValue::Data(Vec::new()));
}

// ============================================================================
// Scalar parse failures
// ============================================================================

#[test]
fn reject_non_numeric_integer() {
    assert_kind(decode_value("<integer>six</integer>"), ErrorKind::ScalarParseError);
}

#[test]
fn reject_empty_integer() {
    assert_kind(decode_value("<integer/>"), ErrorKind::ScalarParseError);
}

#[test]
fn reject_fractional_integer() {
    assert_kind(decode_value("<integer>1.5</integer>"), ErrorKind::ScalarParseError);
}

#[test]
fn reject_overflowing_integer() {
    assert_kind(
        decode_value("<integer>99999999999999999999</integer>"),
        ErrorKind::ScalarParseError,
    );
}

#[test]
fn reject_below_i64_range() {
    assert_kind(
        decode_value("<integer>-9223372036854775809</integer>"),
        ErrorKind::ScalarParseError,
    );
    assert_kind(
        decode_value("<integer>-18446744073709551615</integer>"),
        ErrorKind::ScalarParseError,
    );
}

#[test]
fn reject_signed_hex_digits() {
    for text in ["-0x-5", "0x-5", "0x+5", "+0x+5", "--5", "+-5", "0x", "-"] {
        assert_kind(
            decode_value(&format!("<integer>{text}</integer>")),
            ErrorKind::ScalarParseError,
        );
    }
}

#[test]
fn reject_invalid_real() {
    assert_kind(decode_value("<real>0.6.1</real>"), ErrorKind::ScalarParseError);
}

#[test]
fn reject_invalid_date() {
    assert_kind(decode_value("<date>yesterday</date>"), ErrorKind::ScalarParseError);
}

#[test]
fn decode_unpadded_data() {
    assert_eq!(
        decode_value("<data>aGVsbG8</data>").unwrap(),
        PlistValue::Data(b"hello".to_vec())
    );
    assert_eq!(
        decode_value("<data>aGVsbG8=</data>").unwrap(),
        PlistValue::Data(b"hello".to_vec())
    );
}

#[test]
fn reject_invalid_base64() {
    assert_kind(decode_value("<data>not base64!</data>"), ErrorKind::ScalarParseError);
}

#[test]
fn scalar_error_names_tag_and_text() {
    let err = decode_value("<integer>six</integer>").unwrap_err();
    match err {
        PlistError::ScalarParse { tag, text, .. } => {
            assert_eq!(tag, "integer");
            assert_eq!(text, "six");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn decode_mixed_array_preserves_order() {
    let value =
        decode_value("<array><true/><integer>5</integer><string>deepak</string></array>").unwrap();
    assert_eq!(
        value,
        PlistValue::Array(vec![
            PlistValue::Boolean(true),
            PlistValue::Integer(5),
            PlistValue::String("deepak".to_string()),
        ])
    );
}

#[test]
fn decode_empty_array() {
    assert_eq!(decode_value("<array/>").unwrap(), PlistValue::Array(vec![]));
    assert_eq!(decode_value("<array>\n  </array>").unwrap(), PlistValue::Array(vec![]));
}

#[test]
fn decode_nested_arrays() {
    let value = decode_value("<array><array><integer>1</integer></array><array/></array>").unwrap();
    assert_eq!(
        value,
        PlistValue::Array(vec![
            PlistValue::Array(vec![PlistValue::Integer(1)]),
            PlistValue::Array(vec![]),
        ])
    );
}

#[test]
fn array_length_ignores_whitespace_nodes() {
    let value = decode_value("<array>\n  <true/>\n  <false/>\n  <true/>\n</array>").unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
}

#[test]
fn reject_text_inside_array() {
    assert_kind(
        decode_value("<array><true/>stray<false/></array>"),
        ErrorKind::UnexpectedText,
    );
}

#[test]
fn reject_key_inside_array() {
    assert_kind(
        decode_value("<array><key>k</key></array>"),
        ErrorKind::UnknownObjectType,
    );
}

// ============================================================================
// Dicts
// ============================================================================

#[test]
fn decode_dict_pairs_keys_with_values() {
    let value = decode_value(
        "<dict><key>names</key><array><string>deepak</string></array><key>enabled</key><true/></dict>",
    )
    .unwrap();

    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(
        dict.get("names"),
        Some(&PlistValue::Array(vec![PlistValue::String("deepak".to_string())]))
    );
    assert_eq!(dict.get("enabled"), Some(&PlistValue::Boolean(true)));
}

#[test]
fn decode_dict_preserves_document_order() {
    let value =
        decode_value("<dict><key>z</key><true/><key>a</key><false/><key>m</key><true/></dict>")
            .unwrap();
    let keys: Vec<&str> = value.as_dict().unwrap().keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn decode_empty_dict() {
    assert_eq!(decode_value("<dict/>").unwrap(), PlistValue::Dict(Dict::new()));
    assert_eq!(decode_value("<dict>  </dict>").unwrap(), PlistValue::Dict(Dict::new()));
}

#[test]
fn decode_nested_dicts() {
    let value = decode_value(
        "<dict><key>outer</key><dict><key>inner</key><integer>1</integer></dict></dict>",
    )
    .unwrap();
    let inner = value
        .as_dict()
        .and_then(|d| d.get("outer"))
        .and_then(|v| v.as_dict())
        .unwrap();
    assert_eq!(inner.get("inner"), Some(&PlistValue::Integer(1)));
}

#[test]
fn decode_dict_key_keeps_inner_whitespace() {
    let value = decode_value("<dict><key>Year Of Birth</key><integer>1965</integer></dict>").unwrap();
    assert_eq!(
        value.as_dict().unwrap().get("Year Of Birth"),
        Some(&PlistValue::Integer(1965))
    );
}

#[test]
fn duplicate_dict_key_last_value_wins() {
    // Repeated keys are accepted; the later value replaces the earlier one
    // and the key keeps its first position.
    let value = decode_value(
        "<dict><key>a</key><integer>1</integer><key>b</key><integer>2</integer><key>a</key><integer>3</integer></dict>",
    )
    .unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get("a"), Some(&PlistValue::Integer(3)));
    assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn reject_dict_value_without_key() {
    let err = decode_value("<dict><string>orphan</string></dict>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyExpected);
    assert_eq!(
        err,
        PlistError::KeyExpected {
            found: "string".to_string()
        }
    );
}

#[test]
fn reject_dict_key_without_value() {
    let err = decode_value("<dict><key>lonely</key></dict>").unwrap_err();
    assert_eq!(
        err,
        PlistError::ValueExpected {
            key: "lonely".to_string()
        }
    );
}

#[test]
fn reject_dict_key_followed_by_whitespace_only() {
    assert_kind(
        decode_value("<dict><key>lonely</key>\n   \n</dict>"),
        ErrorKind::ValueExpected,
    );
}

#[test]
fn reject_dict_key_followed_by_key() {
    // The second <key> lands in value position, where it is not a plist object.
    assert_kind(
        decode_value("<dict><key>a</key><key>b</key><true/></dict>"),
        ErrorKind::UnknownObjectType,
    );
}

#[test]
fn reject_text_inside_dict() {
    assert_kind(
        decode_value("<dict><key>a</key>junk<true/></dict>"),
        ErrorKind::UnexpectedText,
    );
}

// ============================================================================
// Root
// ============================================================================

#[test]
fn reject_empty_root() {
    assert_kind(decode_str("<plist></plist>"), ErrorKind::MissingObject);
    assert_kind(decode_str("<plist/>"), ErrorKind::MissingObject);
}

#[test]
fn reject_whitespace_only_root() {
    assert_kind(decode_str("<plist>\n    \n</plist>"), ErrorKind::MissingObject);
}

#[test]
fn reject_non_plist_root() {
    let err = decode_str("<xml><true/></xml>").unwrap_err();
    assert_eq!(
        err,
        PlistError::InvalidRoot {
            found: Some("xml".to_string())
        }
    );
}

#[test]
fn reject_document_without_element() {
    assert_kind(decode_str("<?xml version=\"1.0\"?>"), ErrorKind::InvalidRoot);
    assert_kind(decode_str(""), ErrorKind::InvalidRoot);
}

#[test]
fn reject_text_in_root() {
    assert_kind(decode_str("<plist>hello</plist>"), ErrorKind::UnexpectedText);
    assert_kind(decode_str("<plist><true/>tail</plist>"), ErrorKind::UnexpectedText);
}

#[test]
fn reject_second_root_value() {
    let err = decode_str("<plist><true/><false/></plist>").unwrap_err();
    assert_eq!(
        err,
        PlistError::TrailingObject {
            found: "false".to_string()
        }
    );
}

#[test]
fn root_whitespace_is_ignored() {
    assert_eq!(
        decode_str("<plist>                                  <true/></plist>").unwrap(),
        PlistValue::Boolean(true)
    );
    assert_eq!(
        decode_str("<plist>\n  <true/>\n</plist>\n").unwrap(),
        PlistValue::Boolean(true)
    );
}

#[test]
fn root_attributes_are_ignored() {
    assert_eq!(
        decode_str(r#"<plist version="1.0"><integer>1</integer></plist>"#).unwrap(),
        PlistValue::Integer(1)
    );
}

// ============================================================================
// Unknown tags
// ============================================================================

#[test]
fn unknown_tag_is_named_in_error() {
    let err = decode_value("<float>1.0</float>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownObjectType);
    assert_eq!(
        err,
        PlistError::UnknownObjectType {
            tag: "float".to_string()
        }
    );
    assert!(err.to_string().contains("float"));
}

#[test]
fn unknown_tag_nested_in_dict() {
    let err = decode_value("<dict><key>x</key><null/></dict>").unwrap_err();
    assert_eq!(
        err,
        PlistError::UnknownObjectType {
            tag: "null".to_string()
        }
    );
}

#[test]
fn tags_are_case_normalized() {
    assert_eq!(
        decode_str("<PLIST><Dict><KEY>a</KEY><TRUE/></Dict></PLIST>").unwrap(),
        PlistValue::Dict([("a".to_string(), PlistValue::Boolean(true))].into_iter().collect())
    );
}

// ============================================================================
// Structural error classification
// ============================================================================

#[test]
fn structural_errors_are_not_xml_errors() {
    let err = decode_str("<plist></plist>").unwrap_err();
    assert!(err.is_structural());

    let err = decode_str("<plist><true/>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedXml);
    assert!(!err.is_structural());
}

#[test]
fn decoding_twice_gives_equal_values() {
    let xml = "<plist><dict><key>a</key><array><real>1.25</real><data>AAEC</data></array></dict></plist>";
    assert_eq!(decode_str(xml).unwrap(), decode_str(xml).unwrap());
}
