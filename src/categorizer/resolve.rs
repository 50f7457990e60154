use tracing::debug;

use super::overrides::OverrideMap;
use super::scoring::categorize;
use super::taxonomy::{FALLBACK_CATEGORY, Taxonomy};
use crate::models::{CategoryAssignment, CategorySource};

/// Which keyword passes run after the override lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorizeOptions {
    pub by_content_keywords: bool,
    pub by_title_keywords: bool,
}

/// Chooses a category for one conversation
///
/// First success wins:
/// 1. override entry for the sanitized title
/// 2. content keywords over `content_text` (when enabled and provided)
/// 3. title keywords over the sanitized title (when enabled)
/// 4. [`FALLBACK_CATEGORY`]
pub fn resolve_category(
    conversation_id: &str,
    sanitized_title: &str,
    content_text: Option<&str>,
    taxonomy: &Taxonomy,
    overrides: &OverrideMap,
    options: CategorizeOptions,
) -> CategoryAssignment {
    let assign = |category: &str, source: CategorySource| {
        debug!(title = sanitized_title, category, %source, "Assigned category");
        CategoryAssignment {
            conversation_id: conversation_id.to_string(),
            category: category.to_string(),
            source,
        }
    };

    if let Some(category) = overrides.get(sanitized_title) {
        return assign(category, CategorySource::Override);
    }

    if options.by_content_keywords
        && let Some(text) = content_text
        && let Some(category) = categorize(text, taxonomy)
    {
        return assign(category, CategorySource::ContentKeywords);
    }

    if options.by_title_keywords
        && let Some(category) = categorize(sanitized_title, taxonomy)
    {
        return assign(category, CategorySource::TitleKeywords);
    }

    assign(FALLBACK_CATEGORY, CategorySource::Fallback)
}
