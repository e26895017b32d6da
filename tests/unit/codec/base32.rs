use super::*;

#[test]
fn rfc4648_vectors_without_padding() {
    assert_eq!(encode(b""), "");
    assert_eq!(encode(b"f"), "MY");
    assert_eq!(encode(b"fo"), "MZXQ");
    assert_eq!(encode(b"foo"), "MZXW6");
    assert_eq!(encode(b"foob"), "MZXW6YQ");
    assert_eq!(encode(b"fooba"), "MZXW6YTB");
    assert_eq!(encode(b"foobar"), "MZXW6YTBOI");
}

#[test]
fn decode_inverts_encode() {
    let data: Vec<u8> = (0u8..=255).collect();
    assert_eq!(decode(&encode(&data)).unwrap(), data);
    assert_eq!(decode("MZXW6YTBOI").unwrap(), b"foobar");
}

#[test]
fn eight_chars_are_five_bytes() {
    assert_eq!(decode(&"A".repeat(40)).unwrap(), vec![0u8; 25]);
}

#[test]
fn trailing_partial_bits_are_dropped() {
    // 41 chars = 205 bits -> 25 whole bytes.
    assert_eq!(decode(&"A".repeat(41)).unwrap().len(), 25);
}

#[test]
fn rejects_characters_outside_alphabet() {
    let err = decode("MZ1W").unwrap_err();
    assert!(err.to_string().contains("invalid base32 character"));
    assert!(decode("mzxw").is_err());
    assert!(decode("MZXW=").is_err());
}
