use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{info, warn};

use crate::categorizer::OverrideMap;

/// Load title → category overrides from JSON object files
///
/// Files are applied in order, so later files win for a repeated title. A file
/// that is missing, unparsable or not a JSON object is skipped with a warning,
/// as are entries whose value is not a non-blank string.
pub fn load_overrides(paths: &[PathBuf]) -> OverrideMap {
    let mut overrides = OverrideMap::new();
    for path in paths {
        match load_override_file(path) {
            Ok(file_overrides) => {
                info!(path = %path.display(), entries = file_overrides.len(), "Loaded categories");
                overrides.extend(file_overrides);
            }
            Err(e) => {
                warn!(path = %path.display(), "Skipping categories file: {:#}", e);
            }
        }
    }
    overrides
}

fn load_override_file(path: &Path) -> Result<OverrideMap> {
    if !path.is_file() {
        bail!("file does not exist");
    }

    let content = fs::read_to_string(path).context("Failed to read categories file")?;
    let value: Value = serde_json::from_str(&content).context("Error decoding JSON")?;
    let Value::Object(object) = value else {
        bail!("file does not contain a JSON object");
    };

    let mut overrides = OverrideMap::new();
    for (title, category) in object {
        let accepted = category.as_str().is_some_and(|category| overrides.insert(&title, category));
        if !accepted {
            warn!(path = %path.display(), title = %title, "Ignoring override without a category name");
        }
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_load_overrides_sanitizes_titles() {
        let file = create_test_file(r#"{"Nginx: setup help?": " Infra ", "Other": "Misc"}"#);
        let overrides = load_overrides(&[file.path().to_path_buf()]);
        assert_eq!(overrides.get("Nginx setup help"), Some("Infra"));
        assert_eq!(overrides.get("Other"), Some("Misc"));
    }

    #[test]
    fn test_load_overrides_skips_bad_files() {
        let malformed = create_test_file("{not json");
        let array = create_test_file(r#"["a", "b"]"#);
        let good = create_test_file(r#"{"Title": "Cat"}"#);

        let overrides = load_overrides(&[
            PathBuf::from("/nonexistent/categories.json"),
            malformed.path().to_path_buf(),
            array.path().to_path_buf(),
            good.path().to_path_buf(),
        ]);
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("Title"), Some("Cat"));
    }

    #[test]
    fn test_load_overrides_skips_non_string_values() {
        let file = create_test_file(r#"{"A": 3, "B": null, "C": "", "D": "Kept"}"#);
        let overrides = load_overrides(&[file.path().to_path_buf()]);
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("D"), Some("Kept"));
    }

    #[test]
    fn test_load_overrides_later_file_wins() {
        let first = create_test_file(r#"{"Title": "First"}"#);
        let second = create_test_file(r#"{"Title": "Second"}"#);
        let overrides =
            load_overrides(&[first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(overrides.get("Title"), Some("Second"));
    }
}
