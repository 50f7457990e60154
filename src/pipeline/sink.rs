use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Destination for everything a run produces
pub trait OutputSink {
    /// Writes `contents` to `path`, replacing any existing file and creating
    /// parent directories as needed. Returns the file's modification time when known.
    fn write(&mut self, path: &Path, contents: &str) -> Result<Option<DateTime<Utc>>>;
}

/// Writes straight to the file system; no temp files, no retries
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn write(&mut self, path: &Path, contents: &str) -> Result<Option<DateTime<Utc>>> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            debug!(path = %parent.display(), "Created folder");
        }

        fs::write(path, contents)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        match fs::metadata(path).and_then(|metadata| metadata.modified()) {
            Ok(modified) => Ok(Some(DateTime::<Utc>::from(modified))),
            Err(e) => {
                warn!(path = %path.display(), "Error getting modified time: {}", e);
                Ok(None)
            }
        }
    }
}

/// Keeps written files in memory, keyed by path; used for dry runs and tests
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
    modified: Option<DateTime<Utc>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `modified` as the modification time of every write
    #[cfg(test)]
    pub fn with_modified_time(modified: DateTime<Utc>) -> Self {
        Self { files: BTreeMap::new(), modified: Some(modified) }
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, path: &Path, contents: &str) -> Result<Option<DateTime<Utc>>> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(self.modified)
    }
}
