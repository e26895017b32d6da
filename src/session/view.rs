use super::render::{Controls, PresentationFlags, controls, presentation_flags};
use super::state::PageState;

/// Everything a front end needs to draw the page, derived from one [`PageState`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct UiView {
    pub spinner: bool,
    pub info: bool,
    pub error: bool,
    pub qr_code: bool,
    pub action_buttons: bool,
    pub frame_controls: bool,
    #[serde(flatten)]
    pub flags: PresentationFlags,
    pub controls: Controls,
}

impl UiView {
    /// Pure function of `state`; never diffs against a previous view.
    pub fn derive(state: &PageState) -> Self {
        match state {
            PageState::Loading => Self {
                spinner: true,
                ..Self::default()
            },
            PageState::NoHash => Self {
                info: true,
                ..Self::default()
            },
            PageState::InvalidHash => Self {
                error: true,
                ..Self::default()
            },
            PageState::Loaded(page) => Self {
                qr_code: true,
                action_buttons: true,
                frame_controls: true,
                flags: presentation_flags(&page.session),
                controls: controls(page),
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/view.rs"]
mod tests;
