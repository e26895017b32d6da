//! Splitting bytes into BBQr frames and joining them back.
//!
//! ```text
//! B$ Z S 03 01 <payload>
//! |  | | |  |
//! |  | | |  +-- part index, base36
//! |  | | +----- part count, base36
//! |  | +------- file type
//! |  +--------- encoding
//! +------------ marker
//! ```

use std::io::{Read as _, Write as _};

use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::foundation::core::{
    Encoding, FileType, HEADER_LEN, MAX_FRAMES, from_base36_2, to_base36_2,
};
use crate::foundation::error::{ViewerError, ViewerResult};

use super::{FrameCodec, SplitOpts, SplitResult, base32, capacity};

/// Largest inflated `Z` payload accepted: every frame full at version 40, at a 10:1 ratio.
pub const MAX_INFLATED_BYTES: usize = MAX_FRAMES * capacity::MAX_FRAME_PAYLOAD_BYTES * 10;

/// Parsed fixed-width frame header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    pub encoding: Encoding,
    pub file_type: FileType,
    pub count: usize,
    pub index: usize,
}

impl FrameHeader {
    pub fn parse(frame: &str) -> ViewerResult<Self> {
        let header = frame
            .get(..HEADER_LEN)
            .ok_or_else(|| ViewerError::codec("frame shorter than header"))?;
        if !header.is_ascii() || !header.starts_with("B$") {
            return Err(ViewerError::codec("frame does not start with B$"));
        }
        let mut chars = header[2..4].chars();
        let encoding = chars
            .next()
            .and_then(Encoding::from_char)
            .ok_or_else(|| ViewerError::codec("unsupported encoding"))?;
        let file_type = chars
            .next()
            .and_then(FileType::from_char)
            .ok_or_else(|| ViewerError::codec("unsupported file type"))?;
        let count = from_base36_2(&header[4..6])
            .ok_or_else(|| ViewerError::codec("bad part count"))?;
        let index = from_base36_2(&header[6..8])
            .ok_or_else(|| ViewerError::codec("bad part index"))?;
        Ok(Self {
            encoding,
            file_type,
            count,
            index,
        })
    }
}

/// Split `raw` into frames at the version `codec` estimates for the encoded payload.
pub fn split<C: FrameCodec + ?Sized>(
    codec: &C,
    raw: &[u8],
    file_type: FileType,
    opts: &SplitOpts,
) -> ViewerResult<SplitResult> {
    opts.validate()?;
    if raw.is_empty() {
        return Err(ViewerError::codec("nothing to encode"));
    }

    let (encoding, encoded) = encode_payload(raw, opts.encoding)?;
    let choice = codec.estimate_version(encoded.len(), encoding.split_mod(), opts)?;
    if choice.data_per_frame == 0
        || encoded.len().div_ceil(choice.data_per_frame) != choice.count
    {
        return Err(ViewerError::codec(format!(
            "version estimate of {} frames does not match the {}-char payload",
            choice.count,
            encoded.len()
        )));
    }
    let count = to_base36_2(choice.count)
        .ok_or_else(|| ViewerError::validation("part count out of range"))?;

    let frames = encoded
        .as_bytes()
        .chunks(choice.data_per_frame)
        .enumerate()
        .map(|(idx, chunk)| {
            let idx = to_base36_2(idx)
                .ok_or_else(|| ViewerError::validation("part index out of range"))?;
            // Payload is pure base32 ASCII, so byte chunks are valid str slices.
            let chunk = String::from_utf8_lossy(chunk);
            Ok(format!("B${encoding}{file_type}{count}{idx}{chunk}"))
        })
        .collect::<ViewerResult<Vec<_>>>()?;

    Ok(SplitResult {
        frames,
        version: choice.version,
        encoding,
    })
}

/// Join a complete, consistent frame set back into bytes.
pub fn join(frames: &[String]) -> ViewerResult<Vec<u8>> {
    let first = frames
        .first()
        .ok_or_else(|| ViewerError::codec("no frames to join"))?;
    let expected = FrameHeader::parse(first)?;
    if expected.count != frames.len() {
        return Err(ViewerError::codec(format!(
            "header announces {} parts, got {}",
            expected.count,
            frames.len()
        )));
    }

    let mut ordered: Vec<Option<&str>> = vec![None; expected.count];
    for frame in frames {
        let h = FrameHeader::parse(frame)?;
        if (h.encoding, h.file_type, h.count)
            != (expected.encoding, expected.file_type, expected.count)
        {
            return Err(ViewerError::codec("frames disagree on encoding, type or count"));
        }
        let slot = ordered
            .get_mut(h.index)
            .ok_or_else(|| ViewerError::codec(format!("part index {} out of range", h.index)))?;
        if slot.replace(&frame[HEADER_LEN..]).is_some() {
            return Err(ViewerError::codec(format!("duplicate part {}", h.index)));
        }
    }

    let mut payload = String::new();
    for (idx, part) in ordered.into_iter().enumerate() {
        payload.push_str(part.ok_or_else(|| ViewerError::codec(format!("missing part {idx}")))?);
    }
    decode_payload(&payload, expected.encoding)
}

fn encode_payload(raw: &[u8], encoding: Encoding) -> ViewerResult<(Encoding, String)> {
    match encoding {
        Encoding::Base32 => Ok((Encoding::Base32, base32::encode(raw))),
        Encoding::Zlib => {
            let mut enc = DeflateEncoder::new(Vec::new(), Compression::best());
            enc.write_all(raw)
                .map_err(|e| ViewerError::codec(format!("deflate: {e}")))?;
            let compressed = enc
                .finish()
                .map_err(|e| ViewerError::codec(format!("deflate: {e}")))?;
            if compressed.len() >= raw.len() {
                tracing::debug!(
                    raw = raw.len(),
                    compressed = compressed.len(),
                    "compression does not help, using base32"
                );
                return Ok((Encoding::Base32, base32::encode(raw)));
            }
            Ok((Encoding::Zlib, base32::encode(&compressed)))
        }
    }
}

fn decode_payload(payload: &str, encoding: Encoding) -> ViewerResult<Vec<u8>> {
    let bytes = base32::decode(payload)?;
    match encoding {
        Encoding::Base32 => Ok(bytes),
        Encoding::Zlib => inflate(&bytes, MAX_INFLATED_BYTES),
    }
}

fn inflate(bytes: &[u8], limit: usize) -> ViewerResult<Vec<u8>> {
    let mut out = Vec::new();
    DeflateDecoder::new(bytes)
        .take(limit as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|e| ViewerError::codec(format!("inflate: {e}")))?;
    if out.len() > limit {
        return Err(ViewerError::codec(format!(
            "inflated payload exceeds {limit} bytes"
        )));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/frames.rs"]
mod tests;
