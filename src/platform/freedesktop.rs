//! freedesktop.org Trash specification backend used on Linux and the other
//! non-Apple Unix targets.
//!
//! Entries on the home volume go to the home trash
//! (`$XDG_DATA_HOME/Trash`). Entries on other volumes go to a trash at the
//! top of that volume: `$topdir/.Trash/$uid` when the administrator provided
//! a sticky `.Trash`, `$topdir/.Trash-$uid` otherwise.

use std::collections::HashMap;
use std::env;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use crate::encoding;
use crate::errors::{Result, TrashError};
use crate::fs::{FileSystem, RealFileSystem};
use crate::helpers::{
    build_unique_basename, format_trashinfo, sanitize_user_path, TRASHINFO_EXTENSION,
};
use crate::models::{TrashDirectory, TrashedItem};

type EnvVarMap = HashMap<String, String>;

const STICKY_BIT: u32 = 0o1000;

/// Process configuration the backend depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashEnvironment {
    pub data_home: Option<PathBuf>,
    pub home: Option<PathBuf>,
    /// Explicit volume roots replacing device-based mount point detection.
    pub volumes: Option<Vec<PathBuf>>,
    pub uid: u32,
}

impl TrashEnvironment {
    pub fn from_process() -> Self {
        let environ = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect::<EnvVarMap>();
        let uid = unsafe { libc::geteuid() };
        Self::from_vars(&environ, uid)
    }

    pub fn from_vars(environ: &EnvVarMap, uid: u32) -> Self {
        let non_empty = |key: &str| {
            environ
                .get(key)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        let volumes = environ.get("TRASH_VOLUMES").map(|volumes| {
            volumes
                .split(':')
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect()
        });

        Self {
            data_home: non_empty("XDG_DATA_HOME"),
            home: non_empty("HOME"),
            volumes,
            uid,
        }
    }

    pub fn home_trash(&self) -> Option<PathBuf> {
        if let Some(data_home) = &self.data_home {
            return Some(data_home.join("Trash"));
        }
        self.home
            .as_ref()
            .map(|home| home.join(".local").join("share").join("Trash"))
    }

    /// Longest configured volume root containing `path`.
    fn volume_of(&self, path: &Path) -> Option<&Path> {
        self.volumes
            .as_ref()?
            .iter()
            .filter(|volume| path.starts_with(volume))
            .max_by_key(|volume| volume.components().count())
            .map(PathBuf::as_path)
    }
}

pub fn send(path: &str) -> Result<()> {
    FreedesktopTrash::new(RealFileSystem, TrashEnvironment::from_process())
        .trash(path)
        .map(|_| ())
}

pub struct FreedesktopTrash<F: FileSystem = RealFileSystem> {
    fs: F,
    env: TrashEnvironment,
}

impl<F: FileSystem> FreedesktopTrash<F> {
    pub fn new(fs: F, env: TrashEnvironment) -> Self {
        Self { fs, env }
    }

    /// Moves `path` into the matching trash directory and records where it came from.
    pub fn trash(&self, path: &str) -> Result<TrashedItem> {
        encoding::check_path_text(path)?;
        let original = self.resolve(path)?;

        let meta = self
            .fs
            .symlink_metadata(&original)
            .map_err(|err| TrashError::resolution(path, err.code().unwrap_or(-1)))?;

        let file_name = original
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| TrashError::invalid_path(path, "path has no file name"))?;

        let trash_dir = self.select_trash_dir(&original, &meta)?;
        log::debug!(
            "trashing {} into {}",
            sanitize_user_path(&original),
            sanitize_user_path(&trash_dir.path)
        );

        self.fs.create_dir_all(&trash_dir.files_dir)?;
        self.fs.create_dir_all(&trash_dir.info_dir)?;

        let deleted_at = self.fs.now();
        let location = trash_dir.info_location(&original).to_string_lossy().into_owned();
        let contents = format_trashinfo(&location, deleted_at);
        let (name, info_path) = self.claim_name(&trash_dir, file_name, contents.as_bytes())?;

        let trashed_path = trash_dir.files_dir.join(&name);
        if let Err(err) = self.fs.rename(&original, &trashed_path) {
            log::warn!("moving {} to trash failed, discarding its info file", original.display());
            if let Err(cleanup) = self.fs.remove_file(&info_path) {
                log::warn!("could not remove {}: {cleanup}", info_path.display());
            }
            return Err(err);
        }

        Ok(TrashedItem {
            original_path: original,
            trashed_path,
            info_path,
            trash_dir: trash_dir.path,
            deleted_at,
        })
    }

    /// Absolute location of `path` as the kernel sees it. Directory
    /// components are resolved (so `link/..` follows the link), the leaf is not.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let given = Path::new(path);
        let joined = if given.is_absolute() {
            given.to_path_buf()
        } else {
            env::current_dir()
                .map_err(|err| TrashError::io(".", err))?
                .join(given)
        };

        let unresolved = |err: TrashError| TrashError::resolution(path, err.code().unwrap_or(-1));
        match (joined.parent(), joined.file_name()) {
            (Some(parent), Some(leaf)) => {
                Ok(self.fs.canonicalize(parent).map_err(unresolved)?.join(leaf))
            }
            // `/` and paths ending in `..` have no leaf to keep unresolved.
            _ => self.fs.canonicalize(&joined).map_err(unresolved),
        }
    }

    fn select_trash_dir(&self, original: &Path, meta: &Metadata) -> Result<TrashDirectory> {
        let home_trash = self.env.home_trash().ok_or_else(|| {
            TrashError::os_failure(
                libc::ENOENT,
                Some("cannot locate the home trash: neither XDG_DATA_HOME nor HOME is set".into()),
            )
        })?;

        if self.on_home_volume(original, meta, &home_trash) {
            return Ok(TrashDirectory::new(home_trash));
        }

        let topdir = self.mount_point(original, meta);
        Ok(self.topdir_trash(&topdir))
    }

    fn on_home_volume(&self, original: &Path, meta: &Metadata, home_trash: &Path) -> bool {
        if self.env.volumes.is_some() {
            return self.env.volume_of(original) == self.env.volume_of(home_trash);
        }
        // The home trash may not exist yet; its closest existing ancestor is on the same device.
        home_trash
            .ancestors()
            .find_map(|ancestor| self.fs.metadata(ancestor).ok())
            .is_some_and(|home_meta| home_meta.dev() == meta.dev())
    }

    /// Highest ancestor of `original` on the same device.
    fn mount_point(&self, original: &Path, meta: &Metadata) -> PathBuf {
        if self.env.volumes.is_some() {
            return self
                .env
                .volume_of(original)
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("/"));
        }

        let mut topdir = original;
        while let Some(parent) = topdir.parent() {
            match self.fs.metadata(parent) {
                Ok(parent_meta) if parent_meta.dev() == meta.dev() => topdir = parent,
                _ => break,
            }
        }
        topdir.to_path_buf()
    }

    fn topdir_trash(&self, topdir: &Path) -> TrashDirectory {
        let uid = self.env.uid.to_string();
        let shared = topdir.join(".Trash");

        if let Ok(shared_meta) = self.fs.symlink_metadata(&shared) {
            if shared_meta.file_type().is_symlink() {
                log::warn!("ignoring {}: it is a symlink", shared.display());
            } else if !shared_meta.is_dir() || shared_meta.mode() & STICKY_BIT == 0 {
                log::warn!("ignoring {}: sticky bit not set", shared.display());
            } else {
                let user_trash = shared.join(&uid);
                match self.fs.create_dir_all(&user_trash) {
                    Ok(()) => {
                        return TrashDirectory::new(user_trash).with_mount_point(topdir.to_path_buf())
                    }
                    Err(err) => log::warn!("ignoring {}: {err}", shared.display()),
                }
            }
        }

        TrashDirectory::new(topdir.join(format!(".Trash-{uid}")))
            .with_mount_point(topdir.to_path_buf())
    }

    /// Reserves a name by creating its info file; the first free counter wins.
    fn claim_name(
        &self,
        trash_dir: &TrashDirectory,
        file_name: &str,
        contents: &[u8],
    ) -> Result<(String, PathBuf)> {
        let mut attempt = 0u64;
        loop {
            let name = build_unique_basename(file_name, attempt);
            attempt += 1;

            if self.fs.exists(&trash_dir.files_dir.join(&name)) {
                continue;
            }
            let info_path = trash_dir.info_dir.join(format!("{name}{TRASHINFO_EXTENSION}"));
            if self.fs.write_new(&info_path, contents)? {
                return Ok((name, info_path));
            }
        }
    }
}
