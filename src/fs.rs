use crate::errors::TrashError;
use std::fs::{self, Metadata, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Filesystem boundary for the freedesktop trash backend.
///
/// Keeping this trait narrow makes failure paths (a rename refused halfway
/// through, a full disk) easy to reproduce in tests.
pub trait FileSystem: Send + Sync {
    /// Returns the current time in wall-clock format.
    fn now(&self) -> SystemTime;

    /// Returns true when something exists at `path`, including dangling symlinks.
    fn exists(&self, path: &Path) -> bool;

    /// Reads file metadata, following symlinks.
    fn metadata(&self, path: &Path) -> crate::Result<Metadata>;

    /// Reads symlink metadata.
    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata>;

    /// Resolves every symlink and `..` in an existing `path`.
    fn canonicalize(&self, path: &Path) -> crate::Result<PathBuf>;

    /// Creates a directory and all missing parents, private to the owner on Unix.
    fn create_dir_all(&self, path: &Path) -> crate::Result<()>;

    /// Creates `path` and writes `data` into it. Returns `Ok(false)` without
    /// touching anything when `path` already exists. A file that could not be
    /// fully written is removed again.
    fn write_new(&self, path: &Path, data: &[u8]) -> crate::Result<bool>;

    /// Removes a file.
    fn remove_file(&self, path: &Path) -> crate::Result<()>;

    /// Renames/moves a path.
    fn rename(&self, from: &Path, to: &Path) -> crate::Result<()>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn metadata(&self, path: &Path) -> crate::Result<Metadata> {
        fs::metadata(path).map_err(|err| TrashError::io(path, err))
    }

    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata> {
        fs::symlink_metadata(path).map_err(|err| TrashError::io(path, err))
    }

    fn canonicalize(&self, path: &Path) -> crate::Result<PathBuf> {
        fs::canonicalize(path).map_err(|err| TrashError::io(path, err))
    }

    fn create_dir_all(&self, path: &Path) -> crate::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(path).map_err(|err| TrashError::io(path, err))
    }

    fn write_new(&self, path: &Path, data: &[u8]) -> crate::Result<bool> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = match options.open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(err) => return Err(TrashError::io(path, err)),
        };
        let written = file.write_all(data).and_then(|()| file.sync_all());
        drop(file);
        discard_on_error(path, written)?;
        Ok(true)
    }

    fn remove_file(&self, path: &Path) -> crate::Result<()> {
        fs::remove_file(path).map_err(|err| TrashError::io(path, err))
    }

    fn rename(&self, from: &Path, to: &Path) -> crate::Result<()> {
        fs::rename(from, to).map_err(|err| TrashError::io(from, err))
    }
}

/// Removes the partially written `path` when `result` failed.
fn discard_on_error<T>(path: &Path, result: io::Result<T>) -> crate::Result<T> {
    result.map_err(|err| {
        if let Err(cleanup) = fs::remove_file(path) {
            log::warn!("could not remove {}: {cleanup}", path.display());
        }
        TrashError::io(path, err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_new_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claim.trashinfo");

        assert!(RealFileSystem.write_new(&path, b"first").unwrap());
        assert!(!RealFileSystem.write_new(&path, b"second").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn failed_write_removes_the_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.trashinfo");
        fs::write(&path, b"[Trash In").unwrap();

        // ENOSPC
        let err = discard_on_error::<()>(&path, Err(io::Error::from_raw_os_error(28))).unwrap_err();

        assert_eq!(err.code(), Some(28));
        assert!(!path.exists());
    }

    #[test]
    fn successful_write_keeps_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("done.trashinfo");
        fs::write(&path, b"[Trash Info]").unwrap();

        discard_on_error(&path, Ok(())).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn exists_sees_dangling_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("dangling");
        #[cfg(unix)]
        std::os::unix::fs::symlink(dir.path().join("missing"), &link).unwrap();
        #[cfg(not(unix))]
        fs::write(&link, b"").unwrap();

        assert!(RealFileSystem.exists(&link));
        assert!(!RealFileSystem.exists(&dir.path().join("missing")));
    }

    #[test]
    fn io_failures_report_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = RealFileSystem.remove_file(&missing).unwrap_err();

        match err {
            TrashError::OsOperationFailed { message, .. } => {
                assert!(message.contains("missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn created_dirs_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let trash = dir.path().join("Trash").join("files");
        RealFileSystem.create_dir_all(&trash).unwrap();

        let mode = fs::metadata(&trash).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}
