//! URL-fragment parsing and validation.
//!
//! Grammar: `B$` `[2Z]` `[SRE]` `[0-9A-Z]{2}` `[0-9A-Z]{2}` `[2-7A-Z]+`.

use crate::foundation::core::{Encoding, FileType, HEADER_LEN};

/// A fragment that passed the grammar check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedFragment {
    /// The full fragment, header included. This is the single frame handed to the decoder.
    pub text: String,
    pub encoding: Encoding,
    pub file_type: FileType,
}

impl ParsedFragment {
    pub fn header(&self) -> &str {
        &self.text[..HEADER_LEN]
    }

    pub fn payload(&self) -> &str {
        &self.text[HEADER_LEN..]
    }
}

/// What a fragment change asks the viewer to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentInput {
    Absent,
    Invalid,
    Valid(ParsedFragment),
}

/// Accepts a bare fragment, a `#`-prefixed fragment, or a full URL.
pub fn parse(input: Option<&str>) -> FragmentInput {
    let Some(raw) = input.map(extract).filter(|s| !s.is_empty()) else {
        return FragmentInput::Absent;
    };
    if !matches_grammar(raw) {
        return FragmentInput::Invalid;
    }

    let mut chars = raw[2..4].chars();
    let (Some(encoding), Some(file_type)) = (
        chars.next().and_then(Encoding::from_char),
        chars.next().and_then(FileType::from_char),
    ) else {
        return FragmentInput::Invalid;
    };
    FragmentInput::Valid(ParsedFragment {
        text: raw.to_owned(),
        encoding,
        file_type,
    })
}

/// The fragment part of `input`: whatever follows the first `#`. Without a `#`, a URL has no
/// fragment and anything else is taken as a bare fragment.
pub fn extract(input: &str) -> &str {
    let input = input.trim();
    match input.split_once('#') {
        Some((_, frag)) => frag,
        None if input.contains("://") => "",
        None => input,
    }
}

fn matches_grammar(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() <= HEADER_LEN {
        return false;
    }
    let alnum = |c: u8| c.is_ascii_digit() || c.is_ascii_uppercase();
    let base32 = |c: u8| matches!(c, b'2'..=b'7' | b'A'..=b'Z');

    b.starts_with(b"B$")
        && matches!(b[2], b'2' | b'Z')
        && matches!(b[3], b'S' | b'R' | b'E')
        && b[4..HEADER_LEN].iter().all(|&c| alnum(c))
        && b[HEADER_LEN..].iter().all(|&c| base32(c))
}

#[cfg(test)]
#[path = "../tests/unit/fragment.rs"]
mod tests;
