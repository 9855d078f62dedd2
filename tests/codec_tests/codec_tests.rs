//! Tests for the record codec
//!
//! These tests verify:
//! - Known encodings
//! - Round-trips through awkward byte strings
//! - Encoded output never contains the record delimiters
//! - Rejection of malformed encoded text

use linekv::codec::{decode, decode_utf8, encode};
use linekv::LineKvError;

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_known_values() {
    assert_eq!(encode(b"hello"), "aGVsbG8");
    assert_eq!(encode(b"k1"), "azE");
    assert_eq!(encode(b"v1"), "djE");
}

#[test]
fn test_encode_empty() {
    assert_eq!(encode(b""), "");
    assert_eq!(decode("").unwrap(), Vec::<u8>::new());
}

#[test]
fn test_encode_omits_delimiters() {
    let inputs: Vec<Vec<u8>> = vec![
        b"=".to_vec(),
        b"\n".to_vec(),
        b"a=b\nc=d\n".to_vec(),
        b"==\n\n==".to_vec(),
        vec![0, 255, 61, 10, 13],
    ];

    for input in inputs {
        let encoded = encode(&input);
        assert!(!encoded.contains('='), "{:?} -> {}", input, encoded);
        assert!(!encoded.contains('\n'), "{:?} -> {}", input, encoded);
    }
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_roundtrip_delimiter_bytes() {
    let raw = b"key=with=equals\nand\nnewlines\n".to_vec();
    assert_eq!(decode(&encode(&raw)).unwrap(), raw);
}

#[test]
fn test_roundtrip_all_byte_values() {
    let raw: Vec<u8> = (0..=255u8).collect();
    assert_eq!(decode(&encode(&raw)).unwrap(), raw);
}

#[test]
fn test_roundtrip_every_length_remainder() {
    // Lengths 1..=3 cover all unpadded tail shapes
    for len in 1..=3 {
        let raw = vec![b'='; len];
        assert_eq!(decode(&encode(&raw)).unwrap(), raw);
    }
}

#[test]
fn test_decode_utf8() {
    assert_eq!(decode_utf8(&encode("héllo wörld")).unwrap(), "héllo wörld");
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_decode_rejects_padding() {
    let result = decode("YQ==");
    assert!(matches!(result, Err(LineKvError::Decode(_))));
}

#[test]
fn test_decode_rejects_foreign_characters() {
    assert!(matches!(decode("ab!d"), Err(LineKvError::Decode(_))));
    assert!(matches!(decode("ab\nd"), Err(LineKvError::Decode(_))));
    assert!(matches!(decode("ab-_"), Err(LineKvError::Decode(_))));
}

#[test]
fn test_decode_rejects_impossible_length() {
    // A single symbol carries only 6 bits, never a whole byte
    assert!(matches!(decode("A"), Err(LineKvError::Decode(_))));
    assert!(matches!(decode("AAAAA"), Err(LineKvError::Decode(_))));
}

#[test]
fn test_decode_utf8_rejects_invalid_utf8() {
    let encoded = encode([0xffu8, 0xfe, 0xfd]);
    assert!(decode(&encoded).is_ok());
    assert!(matches!(decode_utf8(&encoded), Err(LineKvError::Decode(_))));
}
