use std::collections::HashMap;

use crate::utils::sanitize;

/// Operator-supplied title → category assignments
///
/// Keys are stored sanitized so lookups use the same form as file names.
#[derive(Debug, Clone, Default)]
pub struct OverrideMap {
    entries: HashMap<String, String>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an assignment, replacing any earlier one for the same title.
    /// Returns `false` and records nothing when the category is blank.
    pub fn insert(&mut self, raw_title: &str, category: &str) -> bool {
        let category = category.trim();
        if category.is_empty() {
            return false;
        }
        self.entries.insert(sanitize(Some(raw_title)), category.to_string());
        true
    }

    pub fn get(&self, sanitized_title: &str) -> Option<&str> {
        self.entries.get(sanitized_title).map(String::as_str)
    }

    pub fn extend(&mut self, other: OverrideMap) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: AsRef<str>, C: AsRef<str>> FromIterator<(T, C)> for OverrideMap {
    fn from_iter<I: IntoIterator<Item = (T, C)>>(iter: I) -> Self {
        let mut map = OverrideMap::new();
        for (title, category) in iter {
            map.insert(title.as_ref(), category.as_ref());
        }
        map
    }
}
