/// Convenience result type used across the crate.
pub type TrackvizResult<T> = Result<T, TrackvizError>;

/// Top-level error taxonomy used by the visualization APIs.
///
/// All failures are synchronous and final; no operation retries internally.
#[derive(thiserror::Error, Debug)]
pub enum TrackvizError {
    /// Invalid caller-provided data (palette, stroke width, font, coordinates).
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame was requested that the frame source does not contain.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Errors while rendering a frame (canvas limits, geometry, glyph coverage).
    #[error("render error: {0}")]
    Render(String),

    /// Errors reading frames or fonts, or writing rendered output.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackvizError {
    /// Build a [`TrackvizError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrackvizError::Lookup`] value.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Build a [`TrackvizError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TrackvizError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../tests/unit/error.rs"]
mod tests;
