//! Categorized summary index of every written conversation.
//!
//! Categories appear in the order they were first seen; rows within a category
//! keep insertion order. Links use wiki-link syntax relative to the output
//! directory, so the index works when the output directory is opened as a vault.

use std::path::{Path, PathBuf};

use crate::models::IndexEntry;
use crate::utils::naming::DISPLAY_TIMESTAMP_FORMAT;
use crate::utils::relative_link_path;

pub const INDEX_FILE_NAME: &str = "index.md";

const STATUS_CREATED: &str = "🤖";
const UNKNOWN_UPDATED: &str = "Unknown";

#[derive(Debug, Clone)]
struct CategoryGroup {
    category: String,
    entries: Vec<IndexEntry>,
}

/// Append-only accumulator for [`IndexEntry`] rows grouped by category
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    output_dir: PathBuf,
    groups: Vec<CategoryGroup>,
}

impl IndexBuilder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into(), groups: Vec::new() }
    }

    pub fn record(&mut self, category: &str, entry: IndexEntry) {
        match self.groups.iter_mut().find(|group| group.category == category) {
            Some(group) => group.entries.push(entry),
            None => self
                .groups
                .push(CategoryGroup { category: category.to_string(), entries: vec![entry] }),
        }
    }

    /// Categories in first-seen order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.category.as_str())
    }

    pub fn entries(&self, category: &str) -> &[IndexEntry] {
        self.groups
            .iter()
            .find(|group| group.category == category)
            .map(|group| group.entries.as_slice())
            .unwrap_or_default()
    }

    /// Total rows across all categories
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(INDEX_FILE_NAME)
    }

    pub fn render(&self) -> String {
        let mut out = String::from("# Conversation Index\n\n## Legend\n🤖 Created | 🔄 Updated\n\n");

        for group in &self.groups {
            out.push_str(&format!("## {}\n\n", group.category));
            out.push_str("| Status | Title | Created | Updated | Messages |\n");
            out.push_str("| :---: | :--- | :---: | :---: | :---: |\n");
            for entry in &group.entries {
                out.push_str(&render_row(&self.output_dir, entry));
            }
            out.push('\n');
        }

        out
    }
}

fn render_row(output_dir: &Path, entry: &IndexEntry) -> String {
    let link = format!(
        "[[{}\\|{}]]",
        escape_pipes(&relative_link_path(output_dir, &entry.output_path)),
        escape_pipes(&entry.title)
    );
    let updated = entry
        .updated
        .map(|updated| updated.format(DISPLAY_TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN_UPDATED.to_string());

    format!(
        "| {} | {} | {} | {} | {} |\n",
        STATUS_CREATED,
        link,
        entry.created.format(DISPLAY_TIMESTAMP_FORMAT),
        updated,
        entry.message_count
    )
}

/// `|` separates cells in tables and target from alias in wiki links
fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}
