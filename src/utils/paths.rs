use std::path::{Component, Path};

/// Renders `path` relative to `base` with `/` separators, as used in index links
///
/// Paths outside `base` are rendered whole.
pub fn relative_link_path(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_relative_link_path_inside_base() {
        let base = PathBuf::from("/out");
        let path = base.join("System Administration").join("2023-11-14-abc123").join("x.md");
        assert_eq!(
            relative_link_path(&base, &path),
            "System Administration/2023-11-14-abc123/x.md"
        );
    }

    #[test]
    fn test_relative_link_path_relative_base() {
        let base = PathBuf::from("vault");
        let path = PathBuf::from("vault/Cat/f.md");
        assert_eq!(relative_link_path(&base, &path), "Cat/f.md");
    }

    #[test]
    fn test_relative_link_path_outside_base() {
        let base = PathBuf::from("/out");
        let path = PathBuf::from("/elsewhere/f.md");
        assert_eq!(relative_link_path(&base, &path), "elsewhere/f.md");
    }
}
