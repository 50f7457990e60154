use std::num::NonZeroUsize;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::categorizer::{CategorizeOptions, OverrideMap, Taxonomy};

pub const DEFAULT_UNPROCESSED_FILE: &str = "unprocessed.txt";

/// Settings for one run, independent of how they were supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub categorize: CategorizeOptions,
    /// File name, relative to `output_dir`, for titles that fell back to the default category
    pub unprocessed_file: String,
    /// Titles per batch file; `None` writes no batch files
    pub split_titles: Option<NonZeroUsize>,
}

impl RunOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            categorize: CategorizeOptions::default(),
            unprocessed_file: DEFAULT_UNPROCESSED_FILE.to_string(),
            split_titles: None,
        }
    }
}

/// Read-only inputs shared by every conversation in a run
#[derive(Debug, Clone, Copy)]
pub struct ProcessContext<'a> {
    pub taxonomy: &'a Taxonomy,
    pub overrides: &'a OverrideMap,
    pub options: &'a RunOptions,
    /// Stand-in creation time for conversations without one, fixed for the run
    pub now: DateTime<Utc>,
}
