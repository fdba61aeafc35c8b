use send2trash::{send_path_to_trash, send_to_trash, TrashError};

#[test]
fn empty_path_is_invalid() {
    assert!(matches!(send_to_trash(""), Err(TrashError::InvalidPath { .. })));
}

#[test]
fn nul_in_path_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = format!("{}\0evil", dir.path().display());
    assert!(matches!(send_to_trash(&path), Err(TrashError::InvalidPath { .. })));
    assert!(dir.path().exists());
}

#[test]
fn missing_path_never_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.txt");

    let err = send_path_to_trash(&missing).unwrap_err();

    assert!(matches!(
        err,
        TrashError::ResolutionFailed { .. } | TrashError::OsOperationFailed { .. }
    ));
    assert!(err.code().is_some());
}

#[cfg(unix)]
#[test]
fn non_unicode_paths_are_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    use std::path::Path;

    let path = Path::new(OsStr::from_bytes(b"/tmp/\xff\xfe"));
    assert!(matches!(
        send_path_to_trash(path),
        Err(TrashError::InvalidPath { .. })
    ));
}

#[cfg(windows)]
mod windows_backend {
    use super::*;
    use std::fs;

    #[test]
    fn relative_paths_are_refused_and_left_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sample.txt");
        fs::write(&file, b"keep me").unwrap();

        for relative in [r"temp\sample.txt", "sample.txt", r"\temp\sample.txt", "C:sample.txt"] {
            assert!(matches!(
                send_to_trash(relative),
                Err(TrashError::PathNotAbsolute(_))
            ));
        }
        assert!(file.exists());
    }

    #[test]
    fn overlong_paths_are_invalid() {
        let long = format!(r"C:\{}", "a".repeat(send2trash::MAX_PATH));
        assert!(matches!(send_to_trash(&long), Err(TrashError::InvalidPath { .. })));
    }
}

/// These move real files into the user's trash.
#[cfg(any(windows, target_os = "macos"))]
mod native_trash {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let file = dir.path().join(name);
        fs::write(&file, b"send2trash test").unwrap();
        file
    }

    #[test]
    fn existing_file_leaves_its_location() {
        let dir = tempfile::tempdir().unwrap();
        let file = scratch_file(&dir, "sample.txt");

        send_path_to_trash(&file).unwrap();

        assert!(!file.exists());
    }

    #[test]
    fn unicode_names_are_trashed() {
        let dir = tempfile::tempdir().unwrap();
        let file = scratch_file(&dir, "send2trash_tést1 ✓.txt");

        send_path_to_trash(&file).unwrap();

        assert!(!file.exists());
    }

    #[test]
    fn trashing_twice_fails_the_second_time() {
        let dir = tempfile::tempdir().unwrap();
        let file = scratch_file(&dir, "twice.txt");

        send_path_to_trash(&file).unwrap();
        let err = send_path_to_trash(&file).unwrap_err();

        assert!(matches!(
            err,
            TrashError::ResolutionFailed { .. } | TrashError::OsOperationFailed { .. }
        ));
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn trailing_symlink_is_trashed_not_its_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = scratch_file(&dir, "target.txt");
        let link = dir.path().join("link.txt");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        send_path_to_trash(&link).unwrap();

        assert!(target.exists());
        assert!(fs::symlink_metadata(&link).is_err());
    }
}
