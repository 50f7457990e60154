use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::Conversation;

/// Fatal problems with a primary archive file
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Input file '{}' does not exist", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to open input file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error decoding JSON from file '{}': {source}", path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load every conversation from one exported archive file (a JSON array)
pub fn load_archive(path: &Path) -> Result<Vec<Conversation>, ArchiveError> {
    if !path.is_file() {
        return Err(ArchiveError::InputNotFound { path: path.to_path_buf() });
    }

    let file =
        File::open(path).map_err(|source| ArchiveError::Io { path: path.to_path_buf(), source })?;

    let conversations: Vec<Conversation> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| ArchiveError::MalformedJson { path: path.to_path_buf(), source })?;

    info!(path = %path.display(), count = conversations.len(), "Loaded conversations");
    Ok(conversations)
}

/// Load and concatenate several archive files, stopping at the first failure
pub fn load_archives(paths: &[PathBuf]) -> Result<Vec<Conversation>, ArchiveError> {
    let mut conversations = Vec::new();
    for path in paths {
        conversations.extend(load_archive(path)?);
    }
    Ok(conversations)
}
