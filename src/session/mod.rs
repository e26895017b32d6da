//! Page state, frame-count search, render coordination and export naming.

pub mod naming;
pub mod render;
pub mod search;
pub mod state;
pub mod view;

#[cfg(test)]
#[path = "../../tests/unit/session/fake_codec.rs"]
pub(crate) mod fake_codec;
