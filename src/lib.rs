//! Send files and directories to the operating system's trash instead of
//! deleting them.
//!
//! The backend is chosen at compile time: the Finder trash on macOS, the
//! Recycle Bin on Windows, and the freedesktop.org trash on other Unix
//! systems. Every call is synchronous and independent of the others.
//!
//! On Windows the path must be fully qualified; relative paths are refused
//! with [`TrashError::PathNotAbsolute`] because the shell would delete them
//! permanently.

pub mod encoding;
pub mod errors;
pub mod fs;
pub mod helpers;
pub mod models;
mod platform;
pub mod status;

use std::path::Path;

pub use encoding::{WidePathBuffer, MAX_PATH};
pub use errors::{Result, TrashError};
pub use fs::{FileSystem, RealFileSystem};
pub use models::{TrashDirectory, TrashedItem};

#[cfg(all(unix, not(target_os = "macos")))]
pub use platform::freedesktop::{FreedesktopTrash, TrashEnvironment};

/// Moves `path` to the trash.
///
/// A trailing symlink is trashed itself, never its target. Failures leave the
/// entry where it was; nothing is retried.
pub fn send_to_trash(path: &str) -> Result<()> {
    log::debug!("sending {path:?} to trash");
    platform::send(path)
}

/// [`send_to_trash`] for a [`Path`]; non-Unicode paths are rejected.
pub fn send_path_to_trash(path: &Path) -> Result<()> {
    let text = path
        .to_str()
        .ok_or_else(|| TrashError::invalid_path(path.to_string_lossy(), "path is not valid Unicode"))?;
    send_to_trash(text)
}

/// Re-export a small stable API surface for callers.
pub mod prelude {
    pub use crate::{
        errors::{Result, TrashError},
        send_path_to_trash, send_to_trash,
    };
}
