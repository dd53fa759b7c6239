//! Scalar codec tests
//!
//! Tests for wire-layout encoding/decoding, invariant numeric parsing and the
//! strict fixed-width string policy.

use std::time::Duration;

use adsbridge::codec::{scalar, ScalarKind, Value};
use adsbridge::BridgeError;

fn roundtrip(kind: ScalarKind, value: Value) -> Value {
    let mut buf = Vec::new();
    scalar::encode(kind, &value, &mut buf).unwrap();
    assert_eq!(buf.len(), kind.width());
    let mut cursor = buf.as_slice();
    scalar::decode(kind, &mut cursor).unwrap()
}

// =============================================================================
// Round-Trips
// =============================================================================

#[test]
fn test_roundtrip_bool() {
    assert_eq!(roundtrip(ScalarKind::Bool, Value::Bool(true)), Value::Bool(true));
    assert_eq!(roundtrip(ScalarKind::Bool, Value::Bool(false)), Value::Bool(false));
}

#[test]
fn test_roundtrip_integers() {
    assert_eq!(roundtrip(ScalarKind::Byte, Value::UInt(0xAB)), Value::UInt(0xAB));
    assert_eq!(roundtrip(ScalarKind::Sint, Value::Int(-12345)), Value::Int(-12345));
    assert_eq!(roundtrip(ScalarKind::Usint, Value::UInt(54321)), Value::UInt(54321));
    assert_eq!(roundtrip(ScalarKind::Int, Value::Int(-123_456_789)), Value::Int(-123_456_789));
    assert_eq!(roundtrip(ScalarKind::Uint, Value::UInt(4_000_000_000)), Value::UInt(4_000_000_000));
    assert_eq!(roundtrip(ScalarKind::Dint, Value::Int(i64::MIN)), Value::Int(i64::MIN));
    assert_eq!(roundtrip(ScalarKind::Udint, Value::UInt(u64::MAX)), Value::UInt(u64::MAX));
}

#[test]
fn test_roundtrip_floats() {
    assert_eq!(roundtrip(ScalarKind::Real, Value::Float(1.5)), Value::Float(1.5));
    assert_eq!(roundtrip(ScalarKind::Lreal, Value::Float(-2.25e10)), Value::Float(-2.25e10));
}

#[test]
fn test_roundtrip_time_and_date() {
    let span = Value::Duration(Duration::from_millis(93_784_500));
    assert_eq!(roundtrip(ScalarKind::Time, span.clone()), span);

    let instant = Value::Timestamp(1_700_000_000);
    assert_eq!(roundtrip(ScalarKind::Date, instant.clone()), instant);
}

#[test]
fn test_roundtrip_string() {
    let text = Value::Text("Hello PLC".to_string());
    assert_eq!(roundtrip(ScalarKind::String(20), text.clone()), text);
}

// =============================================================================
// Wire Layout
// =============================================================================

#[test]
fn test_wire_layout_is_little_endian() {
    let mut buf = Vec::new();
    scalar::encode(ScalarKind::Int, &Value::Int(1), &mut buf).unwrap();
    assert_eq!(buf, [0x01, 0x00, 0x00, 0x00]);

    buf.clear();
    scalar::encode(ScalarKind::Real, &Value::Float(1.0), &mut buf).unwrap();
    assert_eq!(buf, [0x00, 0x00, 0x80, 0x3F]);

    buf.clear();
    scalar::encode(ScalarKind::Uint, &Value::UInt(0x1122_3344), &mut buf).unwrap();
    assert_eq!(buf, [0x44, 0x33, 0x22, 0x11]);
}

#[test]
fn test_decode_string_stops_at_terminator() {
    // Trailing content past the first NUL is ignored
    let slot = *b"abc\0garbage\0\0\0\0\0\0\0\0\0";
    let mut cursor = &slot[..];
    let value = scalar::decode(ScalarKind::String(20), &mut cursor).unwrap();
    assert_eq!(value, Value::Text("abc".to_string()));
    assert!(cursor.is_empty(), "cursor must advance over the full slot");
}

#[test]
fn test_decode_underrun_is_an_error() {
    let short = [0x01, 0x02];
    let mut cursor = &short[..];
    assert!(matches!(
        scalar::decode(ScalarKind::Int, &mut cursor),
        Err(BridgeError::Codec(_))
    ));
}

// =============================================================================
// Fixed-Width String Policy
// =============================================================================

#[test]
fn test_string_exactly_capacity_fits() {
    // N-1 characters encode into an N-byte slot, zero padded
    let text = "x".repeat(9);
    let mut buf = Vec::new();
    scalar::encode(ScalarKind::String(10), &Value::Text(text.clone()), &mut buf).unwrap();
    assert_eq!(buf.len(), 10);
    assert_eq!(&buf[..9], text.as_bytes());
    assert_eq!(buf[9], 0);
}

#[test]
fn test_string_overflow_is_an_error_not_truncation() {
    let text = "x".repeat(10);
    let mut buf = Vec::new();
    let result = scalar::encode(ScalarKind::String(10), &Value::Text(text), &mut buf);
    match result {
        Err(BridgeError::StringOverflow { capacity, got }) => {
            assert_eq!(capacity, 9);
            assert_eq!(got, 10);
        }
        other => panic!("expected StringOverflow, got {:?}", other),
    }
}

#[test]
fn test_string_rejects_non_text_values() {
    let mut buf = Vec::new();
    assert!(matches!(
        scalar::encode(ScalarKind::String(10), &Value::Int(7), &mut buf),
        Err(BridgeError::TypeMismatch { .. })
    ));
}

// =============================================================================
// Invariant Numeric Parsing
// =============================================================================

#[test]
fn test_numeric_tokens_accept_invariant_text() {
    let mut buf = Vec::new();
    scalar::encode(ScalarKind::Int, &Value::Text("-42".to_string()), &mut buf).unwrap();
    assert_eq!(buf, (-42i32).to_le_bytes());

    buf.clear();
    scalar::encode(ScalarKind::Lreal, &Value::Text("3.25".to_string()), &mut buf).unwrap();
    assert_eq!(buf, 3.25f64.to_le_bytes());
}

#[test]
fn test_grouped_or_comma_formatted_text_fails() {
    // Locale-invariant format only: decimal point, no grouping separators
    for text in ["1,5", "1.000,5", "1_000"] {
        let mut buf = Vec::new();
        assert!(
            matches!(
                scalar::encode(ScalarKind::Lreal, &Value::Text(text.to_string()), &mut buf),
                Err(BridgeError::Parse { .. })
            ),
            "text {:?}",
            text
        );
    }
}

#[test]
fn test_out_of_range_values_fail() {
    let mut buf = Vec::new();
    assert!(matches!(
        scalar::encode(ScalarKind::Sint, &Value::Int(40_000), &mut buf),
        Err(BridgeError::Parse { .. })
    ));
    assert!(matches!(
        scalar::encode(ScalarKind::Usint, &Value::UInt(70_000), &mut buf),
        Err(BridgeError::Parse { .. })
    ));
    assert!(matches!(
        scalar::encode(ScalarKind::Uint, &Value::Int(-1), &mut buf),
        Err(BridgeError::Parse { .. })
    ));
}

#[test]
fn test_bool_accepts_invariant_text() {
    let mut buf = Vec::new();
    scalar::encode(ScalarKind::Bool, &Value::Text("True".to_string()), &mut buf).unwrap();
    assert_eq!(buf, [1]);

    buf.clear();
    scalar::encode(ScalarKind::Bool, &Value::Text("false".to_string()), &mut buf).unwrap();
    assert_eq!(buf, [0]);

    assert!(matches!(
        scalar::encode(ScalarKind::Bool, &Value::Text("yes".to_string()), &mut buf),
        Err(BridgeError::Parse { .. })
    ));
}

// =============================================================================
// Strict Byte Semantics
// =============================================================================

#[test]
fn test_byte_rejects_textual_values() {
    // byte is raw 8-bit: no textual parsing
    let mut buf = Vec::new();
    assert!(matches!(
        scalar::encode(ScalarKind::Byte, &Value::Text("7".to_string()), &mut buf),
        Err(BridgeError::TypeMismatch { .. })
    ));
}

#[test]
fn test_byte_rejects_out_of_range() {
    let mut buf = Vec::new();
    assert!(matches!(
        scalar::encode(ScalarKind::Byte, &Value::UInt(256), &mut buf),
        Err(BridgeError::Parse { .. })
    ));
}

// =============================================================================
// Time/Date Text Forms
// =============================================================================

#[test]
fn test_time_accepts_clock_text() {
    let mut buf = Vec::new();
    scalar::encode(
        ScalarKind::Time,
        &Value::Text("01:02:03.500".to_string()),
        &mut buf,
    )
    .unwrap();
    let millis = (1 * 3600 + 2 * 60 + 3) * 1000 + 500u32;
    assert_eq!(buf, millis.to_le_bytes());

    buf.clear();
    scalar::encode(ScalarKind::Time, &Value::Text("1500".to_string()), &mut buf).unwrap();
    assert_eq!(buf, 1500u32.to_le_bytes());
}

#[test]
fn test_time_accepts_day_component() {
    let mut buf = Vec::new();
    scalar::encode(
        ScalarKind::Time,
        &Value::Text("1.00:00:01".to_string()),
        &mut buf,
    )
    .unwrap();
    assert_eq!(buf, (86_401_000u32).to_le_bytes());
}

#[test]
fn test_date_accepts_civil_text() {
    let mut buf = Vec::new();
    scalar::encode(
        ScalarKind::Date,
        &Value::Text("2000-01-01".to_string()),
        &mut buf,
    )
    .unwrap();
    assert_eq!(buf, 946_684_800u32.to_le_bytes());

    buf.clear();
    scalar::encode(
        ScalarKind::Date,
        &Value::Text("1970-01-02 00:00:01".to_string()),
        &mut buf,
    )
    .unwrap();
    assert_eq!(buf, 86_401u32.to_le_bytes());
}

#[test]
fn test_huge_time_and_date_components_fail_cleanly() {
    // Unbounded day/hour/year components must land in a Parse error, never
    // overflow the span arithmetic
    let mut buf = Vec::new();
    for (kind, text) in [
        (ScalarKind::Time, "18446744073709551615.00:00:01"),
        (ScalarKind::Time, "18446744073709551615:00:00"),
        (ScalarKind::Date, "9223372036854775807-01-01"),
        (ScalarKind::Date, "10000-01-01"),
    ] {
        buf.clear();
        assert!(
            matches!(
                scalar::encode(kind, &Value::Text(text.to_string()), &mut buf),
                Err(BridgeError::Parse { .. })
            ),
            "{:?} {:?}",
            kind,
            text
        );
    }
}

#[test]
fn test_sub_millisecond_fraction_rejected() {
    // Finer than millisecond resolution does not fit the wire payload;
    // rejected rather than quietly rounded
    let mut buf = Vec::new();
    assert!(matches!(
        scalar::encode(
            ScalarKind::Time,
            &Value::Text("00:00:00.1234".to_string()),
            &mut buf,
        ),
        Err(BridgeError::Parse { .. })
    ));

    buf.clear();
    scalar::encode(ScalarKind::Time, &Value::Text("00:00:00.5".to_string()), &mut buf).unwrap();
    assert_eq!(buf, 500u32.to_le_bytes());
}

#[test]
fn test_malformed_time_and_date_text_fail() {
    let mut buf = Vec::new();
    for (kind, text) in [
        (ScalarKind::Time, "1:2"),
        (ScalarKind::Time, "aa:bb:cc"),
        (ScalarKind::Time, "00:61:00"),
        (ScalarKind::Date, "2000-13-01"),
        (ScalarKind::Date, "someday"),
    ] {
        buf.clear();
        assert!(
            matches!(
                scalar::encode(kind, &Value::Text(text.to_string()), &mut buf),
                Err(BridgeError::Parse { .. })
            ),
            "{:?} {:?}",
            kind,
            text
        );
    }
}
