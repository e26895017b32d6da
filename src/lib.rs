//! bbqr-view reconstructs animated, multi-part BBQr QR codes from a URL fragment.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: fragment or URL -> [`FragmentInput`] (grammar check, header fields)
//! 2. **Decode**: the fragment is a complete single-part BBQr frame -> raw bytes
//! 3. **Split**: raw bytes -> the smallest feasible frame set ([`FrameSearch::compute_initial`])
//! 4. **Render**: animated APNG + stacked PNG, concurrently ([`RenderCoordinator`])
//! 5. **Adjust**: user [`Command`]s grow, shrink or collapse the frame count by linear probing
//!
//! Everything the page shows is derived from the single [`PageState`] held by the [`StateStore`];
//! [`Viewer`] is the only thing that mutates it.
#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
mod foundation;
pub mod fragment;
pub mod session;
pub mod viewer;

pub use codec::{BbqrCodec, FrameCodec, RenderMode, RenderOpts, SplitOpts, SplitResult};
pub use config::ViewerConfig;
pub use foundation::core::{
    Direction, Encoding, FileType, HEADER_LEN, MAX_FRAMES, MAX_QR_VERSION, MIN_QR_VERSION,
    SMALL_DATA_BYTES,
};
pub use foundation::error::{ViewerError, ViewerResult};
pub use fragment::{FragmentInput, ParsedFragment};
pub use session::naming::{content_fingerprint, download_filename};
pub use session::render::{Controls, PresentationFlags, RenderCoordinator, RenderedImages};
pub use session::search::{ExactSplit, FrameSearch, FrameSet, InitialSplit, SearchOutcome};
pub use session::state::{
    ArtifactHandle, LoadTicket, LoadedPage, PageState, PublishedArtifacts, QrSession, StateStore,
};
pub use session::view::UiView;
pub use viewer::{Command, Outcome, PendingLoad, Viewer};
