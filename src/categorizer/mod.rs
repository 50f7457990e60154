//! Keyword-frequency categorization with operator overrides
//!
//! A [`Taxonomy`] is an ordered list of categories with keyword sets, built once
//! per run. [`categorize`] scores text against it; [`resolve_category`] applies
//! the full override → content → title → fallback chain for one conversation.

pub mod overrides;
pub mod resolve;
pub mod scoring;
pub mod taxonomy;

pub use overrides::OverrideMap;
pub use resolve::{CategorizeOptions, resolve_category};
pub use scoring::{CategoryScore, categorize, score_categories};
pub use taxonomy::{
    CategoryRule, FALLBACK_CATEGORY, Keyword, MISCELLANEOUS_CATEGORY, Taxonomy, TaxonomyError,
};
