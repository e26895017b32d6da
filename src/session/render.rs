//! Render coordination and the presentation state derived from a session.

use crate::codec::{FrameCodec, RenderMode, RenderOpts};
use crate::foundation::core::SMALL_DATA_BYTES;
use crate::foundation::error::ViewerResult;

use super::state::{LoadedPage, QrSession};

/// Image bytes for both artifacts of one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImages {
    pub animated: Vec<u8>,
    pub stacked: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PresentationFlags {
    pub small_data: bool,
    pub multi_frame: bool,
}

/// Disabled state of the frame-count controls (`true` = disabled).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Controls {
    pub no_animation_disabled: bool,
    pub decrease_disabled: bool,
    pub increase_disabled: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            no_animation_disabled: true,
            decrease_disabled: true,
            increase_disabled: true,
        }
    }
}

pub fn presentation_flags(session: &QrSession) -> PresentationFlags {
    PresentationFlags {
        small_data: session.raw_bytes.len() < SMALL_DATA_BYTES,
        multi_frame: session.frame_count() > 1,
    }
}

pub fn controls(page: &LoadedPage) -> Controls {
    let s = &page.session;
    let at_floor = s.frame_count() == s.min_frame_count || s.min_frame_count > 1;
    Controls {
        no_animation_disabled: at_floor,
        decrease_disabled: at_floor,
        increase_disabled: page.increase_exhausted,
    }
}

/// Issues the animated and stacked renders for a session.
#[derive(Clone, Copy, Debug)]
pub struct RenderCoordinator {
    base: RenderOpts,
}

impl RenderCoordinator {
    /// `base.mode` is ignored; each request sets its own.
    pub fn new(base: RenderOpts) -> Self {
        Self { base }
    }

    pub fn opts(&self, mode: RenderMode) -> RenderOpts {
        RenderOpts { mode, ..self.base }
    }

    /// Both renders run concurrently and both must succeed; nothing partial is returned.
    #[tracing::instrument(skip(self, codec, session), fields(frames = session.frame_count(), version = session.qr_version))]
    pub fn render<C: FrameCodec + ?Sized>(
        &self,
        codec: &C,
        session: &QrSession,
    ) -> ViewerResult<RenderedImages> {
        let animated_opts = self.opts(RenderMode::Animated);
        let stacked_opts = self.opts(RenderMode::Stacked);
        let (animated, stacked) = rayon::join(
            || codec.render_image(&session.frames, session.qr_version, &animated_opts),
            || codec.render_image(&session.frames, session.qr_version, &stacked_opts),
        );
        let images = RenderedImages {
            animated: animated?,
            stacked: stacked?,
        };
        tracing::debug!(
            animated_bytes = images.animated.len(),
            stacked_bytes = images.stacked.len(),
            "rendered"
        );
        Ok(images)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render.rs"]
mod tests;
