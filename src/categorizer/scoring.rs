use super::taxonomy::Taxonomy;

/// Total keyword hits for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryScore<'a> {
    pub category: &'a str,
    pub score: usize,
}

/// Scores every category of `taxonomy` against `text`, in taxonomy order
pub fn score_categories<'a>(text: &str, taxonomy: &'a Taxonomy) -> Vec<CategoryScore<'a>> {
    taxonomy
        .rules()
        .iter()
        .map(|rule| CategoryScore {
            category: rule.name(),
            score: rule.keywords().iter().map(|keyword| keyword.count_in(text)).sum(),
        })
        .collect()
}

/// Picks the category whose keywords occur most often in `text`
///
/// Returns `None` when no keyword occurs at all. Ties go to the category listed
/// first in the taxonomy; the choice carries no meaning beyond being stable.
///
/// # Examples
///
/// ```
/// use chat_archive_organizer::categorizer::{Taxonomy, categorize};
///
/// let taxonomy = Taxonomy::new([("Web", vec!["css"]), ("Ops", vec!["nginx"])])?;
/// assert_eq!(categorize("nginx and more nginx", &taxonomy), Some("Ops"));
/// assert_eq!(categorize("nothing relevant", &taxonomy), None);
/// # Ok::<(), chat_archive_organizer::categorizer::TaxonomyError>(())
/// ```
pub fn categorize<'a>(text: &str, taxonomy: &'a Taxonomy) -> Option<&'a str> {
    let mut best: Option<CategoryScore<'a>> = None;
    for candidate in score_categories(text, taxonomy) {
        if candidate.score == 0 {
            continue;
        }
        // strictly greater keeps the earliest category on ties
        if best.is_none_or(|current| candidate.score > current.score) {
            best = Some(candidate);
        }
    }
    best.map(|winner| winner.category)
}
