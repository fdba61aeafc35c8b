//! Conversion of caller-supplied paths into the exact form each platform
//! trash API consumes.
//!
//! Everything here is pure so the Windows buffer rules can be exercised on
//! any host.

use crate::errors::{Result, TrashError};
use std::borrow::Cow;
use std::ffi::CString;

/// Longest path, in UTF-16 code units, the shell file-operation buffer takes.
pub const MAX_PATH: usize = 260;

/// Number of zero units closing a shell path list: one ends the path, one ends the list.
pub const WIDE_TERMINATORS: usize = 2;

/// Rejects text that cannot name a filesystem entry on any platform.
pub fn check_path_text(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TrashError::invalid_path(path, "path is empty"));
    }
    if path.contains('\0') {
        return Err(TrashError::invalid_path(path, "path contains a NUL character"));
    }
    Ok(())
}

/// NUL-terminated UTF-8 form used by the macOS file manager calls.
pub fn encode_utf8(path: &str) -> Result<CString> {
    check_path_text(path)?;
    CString::new(path).map_err(|_| TrashError::invalid_path(path, "path contains a NUL character"))
}

/// UTF-16 path list holding a single path, as `SHFileOperationW` reads `pFrom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidePathBuffer {
    units: Vec<u16>,
}

impl WidePathBuffer {
    pub fn encode(path: &str, max_len: usize) -> Result<Self> {
        check_path_text(path)?;

        let len = path.encode_utf16().count();
        if len > max_len {
            return Err(TrashError::invalid_path(
                path,
                format!("path is {len} UTF-16 units long, the limit is {max_len}"),
            ));
        }

        let mut units = Vec::with_capacity(len + WIDE_TERMINATORS);
        units.extend(path.encode_utf16());
        units.extend_from_slice(&[0; WIDE_TERMINATORS]);
        Ok(Self { units })
    }

    /// Code units of the path itself, without terminators.
    pub fn content_len(&self) -> usize {
        self.units.len() - WIDE_TERMINATORS
    }

    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    pub fn as_ptr(&self) -> *const u16 {
        self.units.as_ptr()
    }
}

/// Drops a leading `\\?\` (or `\\?\UNC\`) since the shell API does not parse
/// verbatim paths.
pub fn strip_verbatim_prefix(path: &str) -> Cow<'_, str> {
    if let Some(rest) = path.strip_prefix(r"\\?\UNC\") {
        Cow::Owned(format!(r"\\{rest}"))
    } else if let Some(rest) = path.strip_prefix(r"\\?\") {
        Cow::Borrowed(rest)
    } else {
        Cow::Borrowed(path)
    }
}

/// Windows notion of a fully qualified path: `C:\...` or `\\server\share...`.
///
/// Drive-relative (`C:foo`) and root-relative (`\foo`) paths depend on
/// process state and do not qualify.
pub fn is_fully_qualified(path: &str) -> bool {
    let is_sep = |b: u8| b == b'\\' || b == b'/';
    let bytes = path.as_bytes();

    match bytes {
        [drive, b':', sep, ..] => drive.is_ascii_alphabetic() && is_sep(*sep),
        [a, b, rest @ ..] if is_sep(*a) && is_sep(*b) => {
            // UNC needs a server name; `\\` alone or `\\\x` is not a share.
            rest.first().is_some_and(|first| !is_sep(*first))
        }
        _ => false,
    }
}
