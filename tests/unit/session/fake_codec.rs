//! Scripted [`FrameCodec`] for session and viewer tests.

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::codec::{FrameCodec, RenderOpts, SplitOpts, SplitResult, VersionChoice, capacity};
use crate::foundation::core::FileType;
use crate::foundation::error::{ViewerError, ViewerResult};

pub(crate) struct ScriptedCodec {
    pub(crate) feasible: BTreeSet<usize>,
    pub(crate) raw: Vec<u8>,
    pub(crate) fail_render: AtomicBool,
    pub(crate) fail_split: AtomicBool,
    pub(crate) renders: AtomicUsize,
    pub(crate) probes: Mutex<Vec<usize>>,
}

impl ScriptedCodec {
    pub(crate) fn new(feasible: impl IntoIterator<Item = usize>) -> Self {
        Self {
            feasible: feasible.into_iter().collect(),
            raw: vec![7u8; 64],
            fail_render: AtomicBool::new(false),
            fail_split: AtomicBool::new(false),
            renders: AtomicUsize::new(0),
            probes: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn probed(&self) -> Vec<usize> {
        self.probes.lock().unwrap().clone()
    }

    pub(crate) fn version_for(count: usize) -> u8 {
        (40 / count).clamp(1, 40) as u8
    }
}

impl FrameCodec for ScriptedCodec {
    fn decode_frames(&self, _frames: &[String]) -> ViewerResult<Vec<u8>> {
        Ok(self.raw.clone())
    }

    fn split_into_frames(
        &self,
        _raw: &[u8],
        _file_type: FileType,
        opts: &SplitOpts,
    ) -> ViewerResult<SplitResult> {
        if self.fail_split.load(Ordering::SeqCst) {
            return Err(ViewerError::codec("scripted split failure"));
        }
        if opts.min_split == opts.max_split {
            self.probes.lock().unwrap().push(opts.min_split);
        }
        let count = self
            .feasible
            .range(opts.min_split..=opts.max_split)
            .next()
            .copied()
            .ok_or_else(|| ViewerError::no_fit("scripted"))?;
        Ok(SplitResult {
            frames: (0..count).map(|i| format!("F{i}/{count}")).collect(),
            version: Self::version_for(count),
            encoding: opts.encoding,
        })
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
        self.renders.fetch_add(1, Ordering::SeqCst);
        if self.fail_render.load(Ordering::SeqCst) {
            return Err(ViewerError::render("scripted render failure"));
        }
        Ok(format!("{:?}:{}:v{version}", opts.mode, frames.len()).into_bytes())
    }
}
