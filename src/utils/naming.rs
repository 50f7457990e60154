use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Characters that are invalid in file names on at least one supported platform
const INVALID_CHARACTERS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\n', '\t'];

/// Placeholder for titles that are absent or blank after sanitizing
pub const PLACEHOLDER_NAME: &str = "noname";

/// Stand-in hashed in place of a missing `create_time`
pub const ABSENT_TIMESTAMP_MARKER: &str = "None";

const FINGERPRINT_LEN: usize = 6;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Strips file-system-invalid characters from a name
///
/// Absent names and names that are blank once stripped become [`PLACEHOLDER_NAME`].
/// Idempotent: `sanitize(Some(&sanitize(x))) == sanitize(x)`.
///
/// # Examples
///
/// ```
/// use chat_archive_organizer::sanitize;
///
/// assert_eq!(sanitize(Some("What is <html>?")), "What is html");
/// assert_eq!(sanitize(Some("  ")), "noname");
/// assert_eq!(sanitize(None), "noname");
/// ```
pub fn sanitize(name: Option<&str>) -> String {
    let cleaned: String =
        name.unwrap_or_default().chars().filter(|c| !INVALID_CHARACTERS.contains(c)).collect();

    if cleaned.trim().is_empty() { PLACEHOLDER_NAME.to_string() } else { cleaned }
}

/// Relative directory for a category; each `/`-separated level becomes a nested folder
///
/// Levels are sanitized one by one. Blank, `.` and `..` levels become
/// [`PLACEHOLDER_NAME`], so the result always stays below the output directory.
pub fn category_dir_name(category: &str) -> PathBuf {
    category
        .split('/')
        .map(|level| {
            let name = sanitize(Some(level));
            if name.trim().chars().all(|c| c == '.') { PLACEHOLDER_NAME.to_string() } else { name }
        })
        .collect()
}

/// First six hex characters of SHA-256 over the sanitized title and raw `create_time`
///
/// Same title and same raw timestamp always give the same fingerprint, so
/// re-running over an archive overwrites instead of duplicating.
pub fn fingerprint(sanitized_title: &str, raw_create_time: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sanitized_title.as_bytes());
    hasher.update(raw_create_time.unwrap_or(ABSENT_TIMESTAMP_MARKER).as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..FINGERPRINT_LEN].to_string()
}

/// Folder name `<YYYY-MM-DD>-<fingerprint>` for one conversation
pub fn folder_name(created: &DateTime<Utc>, fingerprint: &str) -> String {
    format!("{}-{}", created.format(DATE_FORMAT), fingerprint)
}

/// Transcript path `<base_dir>/<timestamp_iso>_<title>.md`
///
/// Two conversations sharing title and second-level timestamp map to the same path.
pub fn unique_path(base_dir: &Path, title: &str, timestamp_iso: &str) -> PathBuf {
    base_dir.join(format!("{}_{}.md", timestamp_iso, sanitize(Some(title))))
}

/// Replay prompt path that sits next to the transcript
pub fn prompt_path(base_dir: &Path, title: &str, timestamp_iso: &str) -> PathBuf {
    base_dir.join(format!("{}_{}_prompt.txt", timestamp_iso, sanitize(Some(title))))
}
