use std::ffi::{c_char, CStr};
use std::ptr;

use crate::encoding;
use crate::errors::{Result, TrashError};

type OSStatus = i32;
type OptionBits = u32;

const NO_ERR: OSStatus = 0;

#[allow(non_upper_case_globals)]
const kFSPathMakeRefDoNotFollowLeafSymlink: OptionBits = 0x01;
#[allow(non_upper_case_globals)]
const kFSFileOperationDefaultOptions: OptionBits = 0;

/// Opaque 80-byte file system reference.
#[repr(C)]
#[allow(dead_code)]
struct FSRef {
    hidden: [u8; 80],
}

#[link(name = "CoreServices", kind = "framework")]
extern "C" {
    fn FSPathMakeRefWithOptions(
        path: *const u8,
        options: OptionBits,
        fs_ref: *mut FSRef,
        is_directory: *mut u8,
    ) -> OSStatus;

    fn FSMoveObjectToTrashSync(
        source: *const FSRef,
        target: *mut FSRef,
        options: OptionBits,
    ) -> OSStatus;

    fn GetMacOSStatusCommentString(err: OSStatus) -> *const c_char;
}

pub fn send(path: &str) -> Result<()> {
    let encoded = encoding::encode_utf8(path)?;
    let mut fs_ref = FSRef { hidden: [0; 80] };

    // A trailing symlink is trashed itself, not its target.
    let status = unsafe {
        FSPathMakeRefWithOptions(
            encoded.as_ptr().cast(),
            kFSPathMakeRefDoNotFollowLeafSymlink,
            &mut fs_ref,
            ptr::null_mut(),
        )
    };
    if status != NO_ERR {
        log::debug!("FSPathMakeRefWithOptions returned {status} for {path:?}");
        return Err(TrashError::resolution(path, status));
    }

    let status = unsafe {
        FSMoveObjectToTrashSync(&fs_ref, ptr::null_mut(), kFSFileOperationDefaultOptions)
    };
    if status != NO_ERR {
        log::debug!("FSMoveObjectToTrashSync returned {status} for {path:?}");
        return Err(TrashError::os_failure(status, status_comment(status)));
    }

    Ok(())
}

fn status_comment(status: OSStatus) -> Option<String> {
    let comment = unsafe { GetMacOSStatusCommentString(status) };
    if comment.is_null() {
        return None;
    }
    let comment = unsafe { CStr::from_ptr(comment) };
    Some(comment.to_string_lossy().trim().to_string())
}
