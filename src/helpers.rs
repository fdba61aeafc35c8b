//! Shared helpers for trash metadata and path handling.

use chrono::{DateTime, Local};
use std::path::Path;
use std::time::SystemTime;

/// File extension used by trash info files.
pub const TRASHINFO_EXTENSION: &str = ".trashinfo";

/// Deletion date format used by Trash info metadata.
pub const TRASHINFO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Header line every trash info file starts with.
pub const TRASHINFO_HEADER: &str = "[Trash Info]";

/// Returns a user-safe, trimmed path string that can be used in logs and messages.
pub fn sanitize_user_path(path: &Path) -> String {
    path.display().to_string().trim().to_string()
}

/// Name to store `file_name` under in a trash `files/` directory.
///
/// Attempt 0 keeps the name; later attempts insert a counter before the
/// extension (`notes.txt` -> `notes 2.txt`). Leading-dot names have no
/// extension.
pub fn build_unique_basename(file_name: &str, attempt: u64) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => {
            let (stem, ext) = file_name.split_at(idx);
            format!("{stem} {attempt}{ext}")
        }
        _ => format!("{file_name} {attempt}"),
    }
}

/// Parses a trash info deletion date.
#[cfg(test)]
pub(crate) fn parse_trash_datetime(value: &str) -> Option<chrono::NaiveDateTime> {
    chrono::NaiveDateTime::parse_from_str(value, TRASHINFO_TIME_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_local()))
}

/// Serializes a time as local wall-clock time in the trash info format.
pub fn serialize_system_time(time: SystemTime) -> String {
    let dt = DateTime::<Local>::from(time);
    dt.format(TRASHINFO_TIME_FORMAT).to_string()
}

/// Percent-encodes a path for the `Path=` key, keeping separators readable.
pub fn encode_trashinfo_path(path: &str) -> String {
    urlencoding::encode(path).replace("%2F", "/")
}

/// Full contents of a trash info file.
pub fn format_trashinfo(path: &str, deleted_at: SystemTime) -> String {
    format!(
        "{TRASHINFO_HEADER}\nPath={}\nDeletionDate={}\n",
        encode_trashinfo_path(path),
        serialize_system_time(deleted_at)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn unique_basename_inserts_counter_before_extension() {
        assert_eq!(build_unique_basename("notes.txt", 0), "notes.txt");
        assert_eq!(build_unique_basename("notes.txt", 1), "notes 1.txt");
        assert_eq!(build_unique_basename("archive.tar.gz", 3), "archive.tar 3.gz");
        assert_eq!(build_unique_basename("Makefile", 2), "Makefile 2");
        assert_eq!(build_unique_basename(".bashrc", 1), ".bashrc 1");
    }

    #[test]
    fn trashinfo_paths_keep_slashes() {
        assert_eq!(encode_trashinfo_path("/home/me/a file.txt"), "/home/me/a%20file.txt");
        assert_eq!(encode_trashinfo_path("dir/tést"), "dir/t%C3%A9st");
        assert_eq!(encode_trashinfo_path("50%.txt"), "50%25.txt");
    }

    #[test]
    fn trashinfo_round_trips_the_deletion_date() {
        let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let contents = format_trashinfo("/tmp/x y", when);
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines[0], TRASHINFO_HEADER);
        assert_eq!(lines[1], "Path=/tmp/x%20y");
        let date = lines[2].strip_prefix("DeletionDate=").unwrap();
        let parsed = parse_trash_datetime(date).unwrap();
        assert_eq!(parsed, DateTime::<Local>::from(when).naive_local());
    }

    #[test]
    fn parse_accepts_rfc3339() {
        assert!(parse_trash_datetime("2024-02-29T10:11:12+00:00").is_some());
        assert!(parse_trash_datetime("yesterday").is_none());
    }

    #[test]
    fn sanitize_trims_whitespace() {
        assert_eq!(sanitize_user_path(Path::new(" /tmp/x ")), "/tmp/x");
    }
}
