use std::fmt;

/// Length of the fixed frame header (`B$` + encoding + file type + count + index).
pub const HEADER_LEN: usize = 8;

/// Largest number of frames a payload can be split into (two base36 digits).
pub const MAX_FRAMES: usize = 1295;

/// Smallest QR symbol version.
pub const MIN_QR_VERSION: u8 = 1;

/// Largest QR symbol version.
pub const MAX_QR_VERSION: u8 = 40;

/// Payloads shorter than this many bytes are presented as "small data".
pub const SMALL_DATA_BYTES: usize = 200;

/// Payload encoding carried in the third header character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Encoding {
    /// `2`: RFC 4648 base32, no padding.
    Base32,
    /// `Z`: raw deflate, then base32.
    Zlib,
}

impl Encoding {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '2' => Some(Self::Base32),
            'Z' => Some(Self::Zlib),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Base32 => '2',
            Self::Zlib => 'Z',
        }
    }

    /// Each frame's payload must be a multiple of this many characters so that frames decode
    /// independently (8 base32 chars = 5 bytes).
    pub fn split_mod(self) -> usize {
        8
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// File-type indicator carried in the fourth header character (`S`, `R` or `E`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FileType(char);

impl FileType {
    pub const ALLOWED: [char; 3] = ['S', 'R', 'E'];

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALLOWED.contains(&c).then_some(Self(c))
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a frame-count search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    /// Next count in this direction, or `None` on integer underflow.
    pub fn step(self, count: usize) -> Option<usize> {
        match self {
            Self::Increase => count.checked_add(1),
            Self::Decrease => count.checked_sub(1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increase => f.write_str("increase"),
            Self::Decrease => f.write_str("decrease"),
        }
    }
}

const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Two-digit uppercase base36, as used for the count and index header fields.
pub fn to_base36_2(n: usize) -> Option<String> {
    if n > MAX_FRAMES {
        return None;
    }
    let hi = BASE36_DIGITS[n / 36] as char;
    let lo = BASE36_DIGITS[n % 36] as char;
    Some(format!("{hi}{lo}"))
}

/// Inverse of [`to_base36_2`]. Lowercase digits are rejected.
pub fn from_base36_2(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let digit = |b: u8| BASE36_DIGITS.iter().position(|&d| d == b);
    Some(digit(bytes[0])? * 36 + digit(bytes[1])?)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
