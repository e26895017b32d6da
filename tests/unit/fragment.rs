use super::*;

fn valid() -> String {
    format!("B$2S0100{}", "A".repeat(40))
}

#[test]
fn absent_and_empty_are_no_hash() {
    assert_eq!(parse(None), FragmentInput::Absent);
    assert_eq!(parse(Some("")), FragmentInput::Absent);
    assert_eq!(parse(Some("#")), FragmentInput::Absent);
    assert_eq!(parse(Some("https://example.com/view#")), FragmentInput::Absent);
}

#[test]
fn valid_fragment_exposes_header_fields() {
    let FragmentInput::Valid(p) = parse(Some(&valid())) else {
        panic!("expected valid fragment");
    };
    assert_eq!(p.encoding, Encoding::Base32);
    assert_eq!(p.file_type.as_char(), 'S');
    assert_eq!(p.header(), "B$2S0100");
    assert_eq!(p.payload().len(), 40);
}

#[test]
fn url_and_hash_prefix_are_stripped() {
    let url = format!("https://example.com/view#{}", valid());
    assert!(matches!(parse(Some(&url)), FragmentInput::Valid(_)));
    let hashed = format!("#{}", valid());
    assert!(matches!(parse(Some(&hashed)), FragmentInput::Valid(p) if p.text == valid()));
    assert_eq!(parse(Some("https://viewer.test/page")), FragmentInput::Absent);
    assert_eq!(extract("https://viewer.test/page"), "");
}

#[test]
fn zlib_and_other_types_are_accepted() {
    assert!(matches!(parse(Some("B$ZE0100MZXW6")), FragmentInput::Valid(p) if p.encoding == Encoding::Zlib));
    assert!(matches!(parse(Some("B$2R1Z0AA")), FragmentInput::Valid(_)));
}

#[test]
fn grammar_violations_are_invalid() {
    let cases = [
        "not-a-bbqr-string",
        "B$2S0100",          // no payload
        "B$HS0100AAAA",      // unsupported encoding
        "B$2P0100AAAA",      // unsupported type
        "B$2S01a0AAAA",      // lowercase header digit
        "B$2S0100AA1A",      // '1' is not base32
        "B$2S0100aaaa",      // lowercase payload
        "B$2S0100AAAA=",     // padding
        "C$2S0100AAAA",      // wrong marker
        "B$2S0100ÄAAA",      // non-ascii
    ];
    for case in cases {
        assert_eq!(parse(Some(case)), FragmentInput::Invalid, "{case}");
    }
}

#[test]
fn payload_starting_with_zero_is_invalid() {
    // '0' and '1' are header digits only.
    assert_eq!(
        parse(Some(&format!("B$2S112200{}", "A".repeat(40)))),
        FragmentInput::Invalid
    );
}
