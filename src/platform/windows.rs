use std::io;
use std::ptr::{null, null_mut};

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{ERROR_CANCELLED, FALSE, HWND},
        UI::Shell::{
            SHFileOperationW, FOF_ALLOWUNDO, FOF_NOCONFIRMATION, FOF_NOERRORUI, FOF_SILENT,
            FO_DELETE, SHFILEOPSTRUCTW,
        },
    },
};

use crate::encoding::{self, WidePathBuffer, MAX_PATH};
use crate::errors::{Result, TrashError};
use crate::status;

pub fn send(path: &str) -> Result<()> {
    let native = encoding::strip_verbatim_prefix(path).replace('/', "\\");
    let buffer = WidePathBuffer::encode(&native, MAX_PATH)?;

    // SHFileOperationW permanently deletes relative paths instead of recycling them.
    if !encoding::is_fully_qualified(&native) {
        return Err(TrashError::PathNotAbsolute(path.to_string()));
    }

    let mut file_op = SHFILEOPSTRUCTW {
        hwnd: HWND(null_mut()),
        wFunc: FO_DELETE,
        pFrom: PCWSTR(buffer.as_ptr()),
        pTo: PCWSTR(null()),
        fFlags: (FOF_ALLOWUNDO | FOF_NOCONFIRMATION | FOF_NOERRORUI | FOF_SILENT).0 as u16,
        fAnyOperationsAborted: FALSE,
        hNameMappings: null_mut(),
        lpszProgressTitle: PCWSTR(null()),
    };

    let result = unsafe { SHFileOperationW(&mut file_op) };

    if result != 0 {
        log::debug!("SHFileOperationW returned {result:#x} for {native:?}");
        return Err(TrashError::os_failure(result, Some(describe(result))));
    }
    if file_op.fAnyOperationsAborted.as_bool() {
        return Err(TrashError::os_failure(
            ERROR_CANCELLED.0 as i32,
            Some("the recycle operation was aborted".to_string()),
        ));
    }

    Ok(())
}

fn describe(code: i32) -> String {
    match status::describe_file_operation_code(code) {
        Some(text) => text.to_string(),
        None => io::Error::from_raw_os_error(code).to_string(),
    }
}
