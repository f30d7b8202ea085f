use thiserror::Error;

/// Errors that can occur in the viewport engine and its presentation surface
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Failed to initialize pixels surface: {0}")]
    Initialization(#[source] pixels::Error),

    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Surface resize failed: {0}")]
    Surface(#[from] pixels::TextureError),

    #[error("Presenting frame failed: {0}")]
    Present(#[source] pixels::Error),

    #[error("Frame buffer is {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DisplayError {
    /// True for errors caused by a caller passing bad values rather than by the
    /// graphics backend.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::FrameSize { .. })
    }
}
