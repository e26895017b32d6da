use std::collections::HashMap;
use std::sync::Arc;

use crate::codec::RenderMode;
use crate::foundation::core::{Encoding, FileType};

use super::view::UiView;

/// Everything known about the currently loaded payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrSession {
    /// Frame strings in playback order.
    pub frames: Vec<String>,
    /// Bytes the frames jointly encode. Shared across the sessions derived from one fragment.
    pub raw_bytes: Arc<[u8]>,
    /// Encoding carried in every frame header.
    pub encoding: Encoding,
    pub file_type: FileType,
    pub qr_version: u8,
    /// Smallest count the payload can be split into; fixed for the fragment.
    pub min_frame_count: usize,
}

impl QrSession {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Opaque reference to a published image, comparable to an object URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactHandle(u64);

/// The pair of images published for one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublishedArtifacts {
    pub animated: ArtifactHandle,
    pub stacked: ArtifactHandle,
}

impl PublishedArtifacts {
    pub fn get(&self, mode: RenderMode) -> ArtifactHandle {
        match mode {
            RenderMode::Animated => self.animated,
            RenderMode::Stacked => self.stacked,
        }
    }
}

/// Payload of [`PageState::Loaded`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedPage {
    pub session: QrSession,
    pub artifacts: PublishedArtifacts,
    /// Set once an increase search came back exhausted for this frame set.
    pub increase_exhausted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageState {
    Loading,
    NoHash,
    InvalidHash,
    Loaded(LoadedPage),
}

impl PageState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::NoHash => "no-hash",
            Self::InvalidHash => "invalid-hash",
            Self::Loaded(_) => "loaded",
        }
    }

    pub fn loaded(&self) -> Option<&LoadedPage> {
        match self {
            Self::Loaded(page) => Some(page),
            _ => None,
        }
    }

    fn handles(&self) -> Vec<ArtifactHandle> {
        match self {
            Self::Loaded(page) => vec![page.artifacts.animated, page.artifacts.stacked],
            _ => Vec::new(),
        }
    }
}

/// Proof that a load was started at a given generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Registry of live image bytes keyed by handle.
#[derive(Debug, Default)]
struct ArtifactStore {
    next: u64,
    live: HashMap<ArtifactHandle, Vec<u8>>,
}

impl ArtifactStore {
    fn register(&mut self, bytes: Vec<u8>) -> ArtifactHandle {
        self.next += 1;
        let handle = ArtifactHandle(self.next);
        self.live.insert(handle, bytes);
        handle
    }

    fn revoke(&mut self, handle: ArtifactHandle) -> bool {
        self.live.remove(&handle).is_some()
    }
}

/// Holder of the single current [`PageState`].
///
/// All changes go through [`transition`](Self::transition) or [`commit`](Self::commit). Each
/// replaces the state wholesale, revokes the outgoing images that the incoming state does not
/// carry over, and recomputes the [`UiView`] from the new state alone.
#[derive(Debug)]
pub struct StateStore {
    current: PageState,
    view: UiView,
    generation: u64,
    artifacts: ArtifactStore,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        let current = PageState::Loading;
        Self {
            view: UiView::derive(&current),
            current,
            generation: 0,
            artifacts: ArtifactStore::default(),
        }
    }

    pub fn read(&self) -> &PageState {
        &self.current
    }

    pub fn view(&self) -> &UiView {
        &self.view
    }

    /// Start a new load; completions holding older tickets are discarded from now on.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Ticket for work that belongs to the current load (user commands).
    pub fn current_ticket(&self) -> LoadTicket {
        LoadTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Store rendered image bytes and hand back their handles.
    pub fn publish(&mut self, animated: Vec<u8>, stacked: Vec<u8>) -> PublishedArtifacts {
        PublishedArtifacts {
            animated: self.artifacts.register(animated),
            stacked: self.artifacts.register(stacked),
        }
    }

    /// Bytes behind a live handle.
    pub fn artifact(&self, handle: ArtifactHandle) -> Option<&[u8]> {
        self.artifacts.live.get(&handle).map(Vec::as_slice)
    }

    pub fn live_artifacts(&self) -> usize {
        self.artifacts.live.len()
    }

    /// Apply `next` unconditionally.
    pub fn transition(&mut self, next: PageState) {
        let incoming = next.handles();
        for handle in self.current.handles() {
            if !incoming.contains(&handle) {
                self.artifacts.revoke(handle);
            }
        }
        tracing::debug!(from = self.current.name(), to = next.name(), "page state transition");
        self.view = UiView::derive(&next);
        self.current = next;
    }

    /// Apply `next` only if `ticket` is still current. A stale state is dropped and the images it
    /// carried are revoked. Returns whether the state was applied.
    pub fn commit(&mut self, ticket: LoadTicket, next: PageState) -> bool {
        if !self.is_current(ticket) {
            tracing::info!(
                stale = ticket.generation,
                current = self.generation,
                state = next.name(),
                "discarding stale completion"
            );
            let kept = self.current.handles();
            for handle in next.handles() {
                if !kept.contains(&handle) {
                    self.artifacts.revoke(handle);
                }
            }
            return false;
        }
        self.transition(next);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
