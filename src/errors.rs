use std::{io, path::Path};

/// Error returned by every trash backend.
///
/// Status codes are the raw platform values (`OSStatus` on macOS, shell
/// file-operation codes on Windows, `errno` elsewhere) and carry no
/// cross-platform meaning.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TrashError {
    /// The path could not be encoded for the platform call.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The shell would permanently delete a relative path instead of recycling it.
    #[error("path is not fully qualified: {0:?}")]
    PathNotAbsolute(String),

    /// The path does not name an entry the platform can resolve.
    #[error("cannot resolve {path:?} (status {code})")]
    ResolutionFailed { path: String, code: i32 },

    /// The platform trash operation reported failure.
    #[error("{message} (code {code})")]
    OsOperationFailed { code: i32, message: String },
}

impl TrashError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn resolution(path: impl Into<String>, code: i32) -> Self {
        Self::ResolutionFailed {
            path: path.into(),
            code,
        }
    }

    /// Builds an operation failure, falling back to a code-only description
    /// when the platform has no text for `code`.
    pub fn os_failure(code: i32, message: Option<String>) -> Self {
        let message = message
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| format!("trash operation failed with status code {code}"));
        Self::OsOperationFailed { code, message }
    }

    pub fn io(path: impl AsRef<Path>, error: io::Error) -> Self {
        Self::OsOperationFailed {
            code: error.raw_os_error().unwrap_or(-1),
            message: format!("{}: {error}", path.as_ref().display()),
        }
    }

    /// Raw platform status code, when the failure came from the OS.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::ResolutionFailed { code, .. } | Self::OsOperationFailed { code, .. } => Some(*code),
            Self::InvalidPath { .. } | Self::PathNotAbsolute(_) => None,
        }
    }
}

/// Shared result alias for the crate.
pub type Result<T> = std::result::Result<T, TrashError>;
