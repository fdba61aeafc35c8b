//! Descriptions for the private error codes `SHFileOperationW` returns.
//!
//! The shell reports these instead of Win32 error codes for a handful of
//! conditions; anything not listed is an ordinary Win32 code.

const FILE_OPERATION_CODES: &[(i32, &str)] = &[
    (0x71, "the source and destination files are the same file"),
    (0x72, "multiple source paths were given with a single destination"),
    (0x73, "rename operation was given a different directory"),
    (0x74, "the source is a root directory, which cannot be moved or renamed"),
    (0x75, "the operation was cancelled by the user or silently by the shell"),
    (0x76, "the destination is a subtree of the source"),
    (0x78, "security settings denied access to the source"),
    (0x79, "the source or destination path exceeded MAX_PATH"),
    (0x7A, "the operation involved multiple destination paths"),
    (0x7C, "the path in the source or destination or both was invalid"),
    (0x7D, "the source and destination have the same parent folder"),
    (0x7E, "the destination path is an existing file"),
    (0x80, "the destination path is an existing folder"),
    (0x81, "the name of the file exceeds MAX_PATH"),
    (0x82, "the destination is a read-only CD-ROM"),
    (0x83, "the destination is a read-only DVD"),
    (0x84, "the destination is a writable CD-ROM"),
    (0x85, "the file involved is too large for the destination media or file system"),
    (0x86, "the source is a read-only CD-ROM"),
    (0x87, "the source is a read-only DVD"),
    (0x88, "the source is a writable CD-ROM"),
    (0xB7, "MAX_PATH was exceeded during the operation"),
    (0x402, "an unknown error occurred"),
    (0x10000, "an unspecified error occurred on the destination"),
    (0x10074, "the destination is a root directory and cannot be renamed"),
];

/// Shell-specific text for `code`, or `None` for plain Win32 codes.
pub fn describe_file_operation_code(code: i32) -> Option<&'static str> {
    FILE_OPERATION_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, text)| *text)
}
