//! The page controller: fragment changes in, commands in, one [`PageState`] out.
//!
//! Loading is split into [`Viewer::begin_load`] and [`Viewer::finish_load`] so that a caller
//! driving loads from an event loop can start a newer load before an older one completes; the
//! older completion is then discarded by the state store instead of overwriting the newer page.

use std::sync::Arc;

use crate::codec::{BbqrCodec, FrameCodec, RenderMode};
use crate::config::ViewerConfig;
use crate::foundation::core::Direction;
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::fragment::{self, FragmentInput, ParsedFragment};
use crate::session::naming::download_filename;
use crate::session::render::RenderCoordinator;
use crate::session::search::{ExactSplit, FrameSearch, FrameSet, SearchOutcome};
use crate::session::state::{LoadTicket, LoadedPage, PageState, QrSession, StateStore};
use crate::session::view::UiView;

/// User actions available on a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    CopyLink,
    Download(RenderMode),
    IncreaseFrames,
    DecreaseFrames,
    CollapseToSingle,
}

/// What a [`Command`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A new frame set is loaded and rendered.
    Updated,
    /// No further feasible count in that direction; the page is otherwise unchanged.
    Exhausted(Direction),
    /// The command does not apply to the current state.
    Ignored(&'static str),
    Link(String),
    Download { filename: String, bytes: Vec<u8> },
    /// The command failed and the page fell back to [`PageState::InvalidHash`].
    Invalidated,
}

/// A load that has been started but not yet completed.
#[derive(Debug)]
#[must_use = "a pending load does nothing until passed to `finish_load`"]
pub struct PendingLoad {
    ticket: LoadTicket,
    input: FragmentInput,
}

pub struct Viewer<C: FrameCodec = BbqrCodec> {
    codec: C,
    config: ViewerConfig,
    store: StateStore,
    coordinator: RenderCoordinator,
    fragment: Option<String>,
}

impl Viewer<BbqrCodec> {
    pub fn with_config(config: ViewerConfig) -> Self {
        Self::new(BbqrCodec, config)
    }
}

impl<C: FrameCodec> Viewer<C> {
    pub fn new(codec: C, config: ViewerConfig) -> Self {
        let coordinator = RenderCoordinator::new(config.render_opts(RenderMode::Animated));
        Self {
            codec,
            config,
            store: StateStore::new(),
            coordinator,
            fragment: None,
        }
    }

    pub fn state(&self) -> &PageState {
        self.store.read()
    }

    pub fn view(&self) -> &UiView {
        self.store.view()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Handle a fragment change to completion.
    pub fn on_fragment_change(&mut self, input: Option<&str>) -> &PageState {
        let pending = self.begin_load(input);
        self.finish_load(pending);
        self.store.read()
    }

    /// Validate the fragment and, when it is well-formed, show the spinner.
    pub fn begin_load(&mut self, input: Option<&str>) -> PendingLoad {
        let ticket = self.store.begin_load();
        self.fragment = input
            .map(fragment::extract)
            .filter(|f| !f.is_empty())
            .map(str::to_owned);
        let input = fragment::parse(input);
        if matches!(input, FragmentInput::Valid(_)) {
            self.store.commit(ticket, PageState::Loading);
        }
        PendingLoad { ticket, input }
    }

    /// Decode, split and render. Returns whether the result became the current page.
    pub fn finish_load(&mut self, pending: PendingLoad) -> bool {
        let next = match pending.input {
            FragmentInput::Absent => PageState::NoHash,
            FragmentInput::Invalid => {
                tracing::info!("fragment does not match the BBQr grammar");
                PageState::InvalidHash
            }
            FragmentInput::Valid(parsed) => match self.load(&parsed) {
                Ok(page) => {
                    tracing::info!(
                        bytes = page.session.raw_bytes.len(),
                        frames = page.session.frame_count(),
                        min_frames = page.session.min_frame_count,
                        version = page.session.qr_version,
                        "loaded"
                    );
                    PageState::Loaded(page)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "fragment could not be loaded");
                    PageState::InvalidHash
                }
            },
        };
        self.store.commit(pending.ticket, next)
    }

    /// Dispatch a user action.
    pub fn handle(&mut self, command: Command) -> Outcome {
        tracing::debug!(?command, state = self.store.read().name(), "command");
        match command {
            Command::CopyLink => Outcome::Link(self.config.link(self.fragment.as_deref())),
            Command::Download(mode) => self.download(mode),
            Command::IncreaseFrames => self.adjust(Direction::Increase),
            Command::DecreaseFrames => self.adjust(Direction::Decrease),
            Command::CollapseToSingle => self.collapse(),
        }
    }

    #[tracing::instrument(skip(self, parsed), fields(header = parsed.header()))]
    fn load(&mut self, parsed: &ParsedFragment) -> ViewerResult<LoadedPage> {
        let raw = self
            .codec
            .decode_frames(std::slice::from_ref(&parsed.text))?;
        let init = FrameSearch::new(&self.codec).compute_initial(
            &raw,
            parsed.file_type,
            parsed.encoding,
        )?;
        if init.encoding != parsed.encoding {
            tracing::debug!(
                requested = %parsed.encoding,
                used = %init.encoding,
                "encoding fell back"
            );
        }
        let session = QrSession {
            frames: init.set.frames,
            raw_bytes: Arc::from(raw),
            encoding: init.encoding,
            file_type: parsed.file_type,
            qr_version: init.set.qr_version,
            min_frame_count: init.min_frame_count,
        };
        self.render_page(session)
    }

    fn render_page(&mut self, session: QrSession) -> ViewerResult<LoadedPage> {
        let images = self.coordinator.render(&self.codec, &session)?;
        let artifacts = self.store.publish(images.animated, images.stacked);
        Ok(LoadedPage {
            session,
            artifacts,
            increase_exhausted: false,
        })
    }

    /// The published image for `mode` and its download name. Does not mutate the page.
    pub fn download(&self, mode: RenderMode) -> Outcome {
        let Some(page) = self.store.read().loaded() else {
            return Outcome::Ignored("nothing loaded");
        };
        let Some(bytes) = self.store.artifact(page.artifacts.get(mode)) else {
            return Outcome::Ignored("artifact no longer available");
        };
        Outcome::Download {
            filename: download_filename(&page.session, mode),
            bytes: bytes.to_vec(),
        }
    }

    fn adjust(&mut self, direction: Direction) -> Outcome {
        let Some(page) = self.store.read().loaded().cloned() else {
            return Outcome::Ignored("nothing loaded");
        };
        let controls = self.store.view().controls;
        let disabled = match direction {
            Direction::Increase => controls.increase_disabled,
            Direction::Decrease => controls.decrease_disabled,
        };
        if disabled {
            tracing::debug!(%direction, "frame-count control disabled, ignoring");
            return Outcome::Ignored("control disabled");
        }

        let ticket = self.store.current_ticket();
        let searched = FrameSearch::new(&self.codec).search_directional(&page.session, direction);
        match searched {
            Ok(SearchOutcome::Found(set)) => self.apply(ticket, page.session, set),
            Ok(SearchOutcome::Exhausted(direction)) => {
                if direction == Direction::Increase {
                    let page = LoadedPage {
                        increase_exhausted: true,
                        ..page
                    };
                    self.store.commit(ticket, PageState::Loaded(page));
                }
                Outcome::Exhausted(direction)
            }
            Err(err) => self.fail(ticket, err),
        }
    }

    fn collapse(&mut self) -> Outcome {
        let Some(page) = self.store.read().loaded().cloned() else {
            return Outcome::Ignored("nothing loaded");
        };
        if self.store.view().controls.no_animation_disabled {
            tracing::debug!("no-animation control disabled, ignoring");
            return Outcome::Ignored("control disabled");
        }

        let ticket = self.store.current_ticket();
        let collapsed = FrameSearch::new(&self.codec).collapse_to_single(&page.session);
        match collapsed {
            Ok(ExactSplit::Fit(set)) => self.apply(ticket, page.session, set),
            Ok(ExactSplit::Infeasible { .. }) => Outcome::Ignored("single frame does not fit"),
            Err(err) => self.fail(ticket, err),
        }
    }

    fn apply(&mut self, ticket: LoadTicket, session: QrSession, set: FrameSet) -> Outcome {
        let session = QrSession {
            frames: set.frames,
            qr_version: set.qr_version,
            ..session
        };
        match self.render_page(session) {
            Ok(page) => {
                tracing::info!(
                    frames = page.session.frame_count(),
                    version = page.session.qr_version,
                    "frame count changed"
                );
                if self.store.commit(ticket, PageState::Loaded(page)) {
                    Outcome::Updated
                } else {
                    Outcome::Ignored("superseded by a newer load")
                }
            }
            Err(err) => self.fail(ticket, err),
        }
    }

    fn fail(&mut self, ticket: LoadTicket, err: ViewerError) -> Outcome {
        tracing::warn!(error = %err, "command failed");
        self.store.commit(ticket, PageState::InvalidHash);
        Outcome::Invalidated
    }
}

#[cfg(test)]
#[path = "../tests/unit/viewer.rs"]
mod tests;
