//! RFC 4648 base32 without padding.
//!
//! Decoding is lenient about trailing bits: a final partial group is accepted and any bits that do
//! not complete a byte are dropped. Every 8 characters map to exactly 5 bytes, which is what lets
//! frames split on 8-character boundaries decode independently.

use crate::foundation::error::{ViewerError, ViewerResult};

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(5) * 8);
    let mut acc: u32 = 0;
    let mut bits = 0u32;
    for &b in bytes {
        acc = (acc << 8) | u32::from(b);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((acc >> bits) & 0x1f) as usize] as char);
        }
        acc &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(ALPHABET[((acc << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

pub fn decode(text: &str) -> ViewerResult<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len() * 5 / 8);
    let mut acc: u32 = 0;
    let mut bits = 0u32;
    for (pos, c) in text.bytes().enumerate() {
        let v = value(c).ok_or_else(|| {
            ViewerError::codec(format!("invalid base32 character {:?} at {pos}", c as char))
        })?;
        acc = (acc << 5) | u32::from(v);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }
    Ok(out)
}

fn value(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'2'..=b'7' => Some(c - b'2' + 26),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/base32.rs"]
mod tests;
