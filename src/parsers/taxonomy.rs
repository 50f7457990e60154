use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::categorizer::Taxonomy;

#[derive(Debug, Deserialize)]
struct TaxonomyEntry {
    category: String,
    #[serde(default)]
    keywords: Vec<String>,
}

/// Parse a custom taxonomy: a JSON array of `{"category": ..., "keywords": [...]}`
///
/// Array order is the tie-break order.
pub fn parse_taxonomy_file(path: &Path) -> Result<Taxonomy> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read taxonomy file: {}", path.display()))?;
    let entries: Vec<TaxonomyEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse taxonomy file: {}", path.display()))?;

    let taxonomy = Taxonomy::new(entries.into_iter().map(|entry| (entry.category, entry.keywords)))
        .with_context(|| format!("Invalid taxonomy in {}", path.display()))?;

    info!(path = %path.display(), categories = taxonomy.len(), "Loaded taxonomy");
    Ok(taxonomy)
}
