//! Array codec tests
//!
//! Tests for contiguous element decoding and the strict declared-length
//! contract on encode.

use adsbridge::codec::{array, ScalarKind, Value};
use adsbridge::BridgeError;

// =============================================================================
// Decoding
// =============================================================================

#[test]
fn test_decode_elements_in_order() {
    let mut image = Vec::new();
    for v in [10i32, -20, 30] {
        image.extend_from_slice(&v.to_le_bytes());
    }

    let mut cursor = image.as_slice();
    let values = array::decode(ScalarKind::Int, 3, &mut cursor).unwrap();
    assert_eq!(
        values,
        vec![Value::Int(10), Value::Int(-20), Value::Int(30)]
    );
    assert!(cursor.is_empty());
}

#[test]
fn test_decode_string_elements() {
    let mut image = Vec::new();
    for text in ["one", "two"] {
        let mut slot = text.as_bytes().to_vec();
        slot.resize(10, 0);
        image.extend_from_slice(&slot);
    }

    let mut cursor = image.as_slice();
    let values = array::decode(ScalarKind::String(10), 2, &mut cursor).unwrap();
    assert_eq!(
        values,
        vec![Value::Text("one".to_string()), Value::Text("two".to_string())]
    );
}

#[test]
fn test_decode_short_buffer_fails() {
    let image = [0u8; 10]; // room for 2.5 ints
    let mut cursor = &image[..];
    assert!(matches!(
        array::decode(ScalarKind::Int, 3, &mut cursor),
        Err(BridgeError::Codec(_))
    ));
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn test_encode_matches_scalar_concatenation() {
    let values = vec![Value::UInt(1), Value::UInt(2)];
    let mut buf = Vec::new();
    array::encode(ScalarKind::Uint, 2, &values, &mut buf).unwrap();
    assert_eq!(buf, [1, 0, 0, 0, 2, 0, 0, 0]);
}

#[test]
fn test_encode_length_mismatch_carries_both_counts() {
    let values = vec![Value::Int(1), Value::Int(2)];
    let mut buf = Vec::new();
    let result = array::encode(ScalarKind::Int, 3, &values, &mut buf);
    match result {
        Err(BridgeError::LengthMismatch { supplied, declared }) => {
            assert_eq!(supplied, 2);
            assert_eq!(declared, 3);
        }
        other => panic!("expected LengthMismatch, got {:?}", other),
    }
    assert!(buf.is_empty(), "nothing may be written on a length mismatch");
}

#[test]
fn test_encode_element_error_propagates() {
    let values = vec![Value::Int(1), Value::Text("oops".to_string())];
    let mut buf = Vec::new();
    assert!(matches!(
        array::encode(ScalarKind::Int, 2, &values, &mut buf),
        Err(BridgeError::Parse { .. })
    ));
}
