//! Frame-count search.
//!
//! Feasibility is not monotonic in the count: whether `n` frames fit depends on whether some
//! version's capacity lands `ceil(len / capacity)` exactly on `n`, so a count can be infeasible
//! while both neighbours fit. Searches therefore probe every count in order.

use crate::codec::{FrameCodec, SplitOpts};
use crate::foundation::core::{Direction, Encoding, FileType, MAX_FRAMES};
use crate::foundation::error::{ViewerError, ViewerResult};

use super::state::QrSession;

/// A feasible split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSet {
    pub frames: Vec<String>,
    pub qr_version: u8,
}

/// Result of the first split of a freshly decoded payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitialSplit {
    pub set: FrameSet,
    pub min_frame_count: usize,
    /// Encoding the frames actually carry; a requested `Zlib` may have fallen back to `Base32`.
    pub encoding: Encoding,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExactSplit {
    Fit(FrameSet),
    Infeasible { count: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(FrameSet),
    Exhausted(Direction),
}

/// Maps payload + target count (or direction) to a feasible frame set.
pub struct FrameSearch<'a, C: FrameCodec + ?Sized> {
    codec: &'a C,
}

impl<'a, C: FrameCodec + ?Sized> FrameSearch<'a, C> {
    pub fn new(codec: &'a C) -> Self {
        Self { codec }
    }

    /// Smallest split the encoder can produce; its count becomes the session's floor.
    pub fn compute_initial(
        &self,
        raw: &[u8],
        file_type: FileType,
        encoding: Encoding,
    ) -> ViewerResult<InitialSplit> {
        let out = self
            .codec
            .split_into_frames(raw, file_type, &SplitOpts::open(encoding))?;
        let min_frame_count = out.frames.len();
        if min_frame_count == 0 || min_frame_count > MAX_FRAMES {
            return Err(ViewerError::codec(format!(
                "encoder produced {min_frame_count} frames"
            )));
        }
        tracing::debug!(
            min_frame_count,
            version = out.version,
            encoding = %out.encoding,
            "initial split"
        );
        Ok(InitialSplit {
            set: FrameSet {
                frames: out.frames,
                qr_version: out.version,
            },
            min_frame_count,
            encoding: out.encoding,
        })
    }

    /// Split into exactly `count` frames. Only "does not fit" becomes `Infeasible`; any other
    /// encoder failure is returned as an error.
    pub fn set_exact(
        &self,
        raw: &[u8],
        file_type: FileType,
        encoding: Encoding,
        count: usize,
    ) -> ViewerResult<ExactSplit> {
        if !(1..=MAX_FRAMES).contains(&count) {
            return Ok(ExactSplit::Infeasible { count });
        }
        match self
            .codec
            .split_into_frames(raw, file_type, &SplitOpts::exact(encoding, count))
        {
            Ok(out) if out.frames.len() == count => Ok(ExactSplit::Fit(FrameSet {
                frames: out.frames,
                qr_version: out.version,
            })),
            Ok(out) => Err(ViewerError::codec(format!(
                "asked for {count} frames, encoder produced {}",
                out.frames.len()
            ))),
            Err(e) if e.is_no_fit() => Ok(ExactSplit::Infeasible { count }),
            Err(e) => Err(e),
        }
    }

    /// Nearest feasible count strictly beyond the current one in `direction`, never leaving
    /// `[min_frame_count, MAX_FRAMES]`.
    #[tracing::instrument(skip(self, session), fields(current = session.frame_count()))]
    pub fn search_directional(
        &self,
        session: &QrSession,
        direction: Direction,
    ) -> ViewerResult<SearchOutcome> {
        let mut next = direction.step(session.frame_count());
        while let Some(count) = next.filter(|c| (session.min_frame_count..=MAX_FRAMES).contains(c))
        {
            match self.set_exact(
                &session.raw_bytes,
                session.file_type,
                session.encoding,
                count,
            )? {
                ExactSplit::Fit(set) => {
                    tracing::debug!(count, version = set.qr_version, "feasible");
                    return Ok(SearchOutcome::Found(set));
                }
                ExactSplit::Infeasible { .. } => {
                    tracing::trace!(count, "infeasible, skipping");
                    next = direction.step(count);
                }
            }
        }
        tracing::debug!(%direction, "search exhausted");
        Ok(SearchOutcome::Exhausted(direction))
    }

    /// Back to one frame. Only meaningful when the payload fits a single frame at all.
    pub fn collapse_to_single(&self, session: &QrSession) -> ViewerResult<ExactSplit> {
        if session.min_frame_count > 1 {
            return Ok(ExactSplit::Infeasible { count: 1 });
        }
        self.set_exact(&session.raw_bytes, session.file_type, session.encoding, 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/search.rs"]
mod tests;
