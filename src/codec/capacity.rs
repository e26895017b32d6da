//! QR capacity model and version estimation.
//!
//! Frames are always made of characters from the QR alphanumeric set (`B$`, base36 digits and the
//! base32 alphabet), so capacity is taken from the alphanumeric column at error-correction level L.

use crate::foundation::core::{HEADER_LEN, MAX_FRAMES, MAX_QR_VERSION, MIN_QR_VERSION};
use crate::foundation::error::{ViewerError, ViewerResult};

use super::SplitOpts;

/// Alphanumeric-mode character capacity at error-correction level L, versions 1..=40.
const ALNUM_CAPACITY_L: [usize; 40] = [
    25, 47, 77, 114, 154, 195, 224, 279, 335, 395, //
    468, 535, 619, 667, 758, 854, 938, 1046, 1153, 1249, //
    1352, 1460, 1588, 1704, 1853, 1990, 2132, 2223, 2369, 2520, //
    2677, 2840, 3009, 3183, 3351, 3537, 3729, 3927, 4087, 4296,
];

/// Bytes one version-40 frame carries once its base32 payload is decoded.
pub const MAX_FRAME_PAYLOAD_BYTES: usize = (ALNUM_CAPACITY_L[39] - HEADER_LEN) / 8 * 5;

/// Result of [`estimate_version`]: the chosen symbol version and the resulting split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionChoice {
    pub version: u8,
    /// Number of frames needed at `version`.
    pub count: usize,
    /// Payload characters carried by each frame (the last frame may carry fewer).
    pub data_per_frame: usize,
}

/// Payload characters one frame can carry at `version`, rounded down to `split_mod`.
///
/// `None` for versions outside 1..=40 or when the header leaves no room.
pub fn payload_capacity(version: u8, split_mod: usize) -> Option<usize> {
    if !(MIN_QR_VERSION..=MAX_QR_VERSION).contains(&version) || split_mod == 0 {
        return None;
    }
    let base = ALNUM_CAPACITY_L[usize::from(version - 1)].checked_sub(HEADER_LEN)?;
    let adjusted = base - base % split_mod;
    (adjusted > 0).then_some(adjusted)
}

/// Frames needed to carry `payload_len` characters at `version`.
pub fn frames_needed(version: u8, payload_len: usize, split_mod: usize) -> Option<VersionChoice> {
    let data_per_frame = payload_capacity(version, split_mod)?;
    Some(VersionChoice {
        version,
        count: payload_len.div_ceil(data_per_frame).max(1),
        data_per_frame,
    })
}

/// Pick the version giving the fewest frames within the option bounds, lowest version on ties.
///
/// Fails with [`ViewerError::NoFit`] when no version in `[min_version, max_version]` yields a
/// count in `[min_split, max_split]`.
pub fn estimate_version(
    payload_len: usize,
    split_mod: usize,
    opts: &SplitOpts,
) -> ViewerResult<VersionChoice> {
    opts.validate()?;
    (opts.min_version..=opts.max_version)
        .filter_map(|v| frames_needed(v, payload_len, split_mod))
        .filter(|c| (opts.min_split..=opts.max_split).contains(&c.count))
        .min_by_key(|c| (c.count, c.version))
        .ok_or_else(|| {
            ViewerError::no_fit(format!(
                "{payload_len} chars do not fit {}..={} frames at versions {}..={}",
                opts.min_split, opts.max_split, opts.min_version, opts.max_version
            ))
        })
}

impl SplitOpts {
    pub fn validate(&self) -> ViewerResult<()> {
        if self.min_split < 1 || self.max_split > MAX_FRAMES || self.min_split > self.max_split {
            return Err(ViewerError::validation(format!(
                "split bounds must satisfy 1 <= min <= max <= {MAX_FRAMES}, got {}..={}",
                self.min_split, self.max_split
            )));
        }
        if self.min_version < MIN_QR_VERSION
            || self.max_version > MAX_QR_VERSION
            || self.min_version > self.max_version
        {
            return Err(ViewerError::validation(format!(
                "version bounds must satisfy {MIN_QR_VERSION} <= min <= max <= {MAX_QR_VERSION}, got {}..={}",
                self.min_version, self.max_version
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/capacity.rs"]
mod tests;
