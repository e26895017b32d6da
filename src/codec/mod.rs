//! Boundary to the BBQr frame encoder.
//!
//! The session logic only talks to [`FrameCodec`]. [`BbqrCodec`] is the shipped implementation;
//! tests substitute their own to script feasibility and failures.

pub mod base32;
pub mod capacity;
pub mod frames;
pub mod raster;

use crate::foundation::core::{Encoding, FileType, MAX_FRAMES, MAX_QR_VERSION, MIN_QR_VERSION};
use crate::foundation::error::ViewerResult;

pub use capacity::VersionChoice;

/// Bounds for a split request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitOpts {
    pub encoding: Encoding,
    pub min_split: usize,
    pub max_split: usize,
    pub min_version: u8,
    pub max_version: u8,
}

impl SplitOpts {
    /// Any count from 1 up to the maximum, any version.
    pub fn open(encoding: Encoding) -> Self {
        Self::between(encoding, 1, MAX_FRAMES)
    }

    /// Exactly `count` frames, any version.
    pub fn exact(encoding: Encoding, count: usize) -> Self {
        Self::between(encoding, count, count)
    }

    fn between(encoding: Encoding, min_split: usize, max_split: usize) -> Self {
        Self {
            encoding,
            min_split,
            max_split,
            min_version: MIN_QR_VERSION,
            max_version: MAX_QR_VERSION,
        }
    }
}

/// Frames produced by [`FrameCodec::split_into_frames`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitResult {
    pub frames: Vec<String>,
    pub version: u8,
    /// Encoding actually used; `Zlib` falls back to `Base32` when compression does not help.
    pub encoding: Encoding,
}

/// Which artifact to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Frames played in order, looping forever.
    Animated,
    /// All frames in one static image.
    Stacked,
}

/// Image options for [`FrameCodec::render_image`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOpts {
    /// Pixels per QR module.
    pub scale: u32,
    /// Quiet zone, in modules.
    pub margin: u32,
    pub mode: RenderMode,
    /// Delay between animated frames.
    pub frame_delay_ms: u16,
}

/// The external encoder collaborator.
///
/// `Sync` because the render coordinator issues two renders concurrently against one codec.
pub trait FrameCodec: Sync {
    /// Join frames back into the bytes they carry.
    fn decode_frames(&self, frames: &[String]) -> ViewerResult<Vec<u8>>;

    /// Split `raw` into frames within `opts`. Fails with `NoFit` when nothing fits.
    fn split_into_frames(
        &self,
        raw: &[u8],
        file_type: FileType,
        opts: &SplitOpts,
    ) -> ViewerResult<SplitResult>;

    /// Best version for `payload_len` encoded characters within `opts`. [`frames::split`] asks this
    /// for the frame size, so an implementation can narrow the versions it will emit.
    fn estimate_version(
        &self,
        payload_len: usize,
        split_mod: usize,
        opts: &SplitOpts,
    ) -> ViewerResult<VersionChoice>;

    /// Encoded image bytes (PNG or APNG) for `frames` at `version`.
    fn render_image(&self, frames: &[String], version: u8, opts: &RenderOpts)
    -> ViewerResult<Vec<u8>>;
}

/// Default [`FrameCodec`]: BBQr framing, `qrcode` symbols, `image`/`png` output.
#[derive(Clone, Copy, Debug, Default)]
pub struct BbqrCodec;

impl FrameCodec for BbqrCodec {
    fn decode_frames(&self, frames: &[String]) -> ViewerResult<Vec<u8>> {
        frames::join(frames)
    }

    fn split_into_frames(
        &self,
        raw: &[u8],
        file_type: FileType,
        opts: &SplitOpts,
    ) -> ViewerResult<SplitResult> {
        frames::split(self, raw, file_type, opts)
    }

    fn estimate_version(
        &self,
        payload_len: usize,
        split_mod: usize,
        opts: &SplitOpts,
    ) -> ViewerResult<VersionChoice> {
        capacity::estimate_version(payload_len, split_mod, opts)
    }

    fn render_image(
        &self,
        frames: &[String],
        version: u8,
        opts: &RenderOpts,
    ) -> ViewerResult<Vec<u8>> {
        raster::render(frames, version, opts)
    }
}
