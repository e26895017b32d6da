/// Convenience result type used across the viewer.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Top-level error taxonomy used by library APIs.
///
/// None of these reach the user directly: the viewer folds every failure on the load path into
/// [`PageState::InvalidHash`](crate::PageState::InvalidHash).
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    /// Invalid caller-provided options or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed or mutually inconsistent frames, or an undecodable payload.
    #[error("codec error: {0}")]
    Codec(String),

    /// No split count within the requested bounds yields a QR version within the requested bounds.
    #[error("no fit: {0}")]
    NoFit(String),

    /// Rasterizing or encoding an image artifact failed.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ViewerError {
    /// Build a [`ViewerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ViewerError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Build a [`ViewerError::NoFit`] value.
    pub fn no_fit(msg: impl Into<String>) -> Self {
        Self::NoFit(msg.into())
    }

    /// Build a [`ViewerError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// `true` when the error only says "this split does not fit".
    pub fn is_no_fit(&self) -> bool {
        matches!(self, Self::NoFit(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
