use std::path::PathBuf;

use crate::options::MIN_OPEN_BANDS;

/// A failure reported by a [`BlockStore`](crate::BlockStore).
///
/// Stores report a plain diagnostic message, which is surfaced verbatim by [`BundleError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::new(value.to_string())
    }
}

/// Errors that can occur when working with a [`Bundle`](crate::Bundle)
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// The options passed when opening were rejected, nothing was opened
    #[error("max_open_bands has to be at least {min}, got {0}", min = MIN_OPEN_BANDS)]
    MaxOpenBands(usize),

    /// The bundle was closed, or never opened
    #[error("bundle not opened")]
    NotOpen,

    /// A raw whence value that is not one of the lseek codes
    #[error("seek: invalid whence {0}")]
    InvalidWhence(i32),

    /// The seek would have moved the cursor before the start of the image
    #[error("seek: invalid offset {0}")]
    InvalidOffset(i128),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error("failed to read: {0}")]
    Read(#[source] StoreError),

    #[error("failed to write: {0}")]
    Write(#[source] StoreError),

    #[error("failed to flush: {0}")]
    Flush(#[source] StoreError),

    #[error("failed to trim: {0}")]
    Trim(#[source] StoreError),

    #[error("failed to close: {0}")]
    Close(#[source] StoreError),
}

impl From<BundleError> for std::io::Error {
    fn from(value: BundleError) -> Self {
        use std::io::ErrorKind;

        let kind = match &value {
            BundleError::MaxOpenBands(_)
            | BundleError::InvalidWhence(_)
            | BundleError::InvalidOffset(_) => ErrorKind::InvalidInput,
            BundleError::NotOpen => ErrorKind::NotConnected,
            BundleError::Open { .. } => ErrorKind::NotFound,
            _ => ErrorKind::Other,
        };
        std::io::Error::new(kind, value)
    }
}
