//! Error types shared by signals, transforms and filters.

use thiserror::Error;

/// Errors raised by the denoising core.
///
/// All of them are terminal for the call that produced them; nothing in
/// sordino retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed filter parameters (unknown mode, bad band edges, cutoff at or above Nyquist).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A zero-length sample sequence was supplied.
    #[error("signal contains no samples")]
    EmptySignal,

    /// A sample sequence contained NaN or infinity.
    #[error("non-finite sample at index {index}")]
    NonFiniteSample {
        /// Position of the first offending sample.
        index: usize,
    },
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidArgument(reason.into())
    }
}

/// Convenience result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
