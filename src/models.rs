use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A freedesktop.org trash root with its `files/` and `info/` halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashDirectory {
    pub path: PathBuf,
    pub files_dir: PathBuf,
    pub info_dir: PathBuf,
    /// Top directory served by a per-volume trash; `None` for the home trash.
    pub mount_point: Option<PathBuf>,
}

impl TrashDirectory {
    pub fn new(path: PathBuf) -> Self {
        Self {
            files_dir: path.join("files"),
            info_dir: path.join("info"),
            path,
            mount_point: None,
        }
    }

    pub fn with_mount_point(mut self, mount_point: PathBuf) -> Self {
        self.mount_point = Some(mount_point);
        self
    }

    /// Value recorded in `Path=`: absolute for the home trash, relative to
    /// the top directory otherwise.
    pub fn info_location<'a>(&self, original: &'a Path) -> &'a Path {
        self.mount_point
            .as_deref()
            .and_then(|topdir| original.strip_prefix(topdir).ok())
            .unwrap_or(original)
    }
}

/// Where a single entry went when it was trashed.
#[derive(Debug, Clone)]
pub struct TrashedItem {
    pub original_path: PathBuf,
    pub trashed_path: PathBuf,
    pub info_path: PathBuf,
    pub trash_dir: PathBuf,
    pub deleted_at: SystemTime,
}
