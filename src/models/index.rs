use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the generated index, created after a conversation has been written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: String,
    pub created: DateTime<Utc>,
    /// Modification time of the written transcript, when the sink could report one
    pub updated: Option<DateTime<Utc>>,
    pub message_count: usize,
    pub output_path: PathBuf,
}
