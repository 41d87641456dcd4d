//! Result and Error types for voxmerge-utils

/// Type alias for `Result<T, utils::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `voxmerge_utils`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No values to search
    EmptySlice,

    /// NaN or an infinity was found at `index`
    NonFinite { index: usize },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptySlice => write!(f, "slice contains no values"),
            Self::NonFinite { index } => write!(f, "non-finite value at index {index}"),
        }
    }
}

impl std::error::Error for Error {}
