//! Run-level outputs built from every processed conversation
//!
//! - [`IndexBuilder`] collects one row per written conversation and renders
//!   `index.md` grouped by category.
//! - [`split_title_batches`] prepares title lists for an external classification
//!   step whose answers come back as override files.

pub mod builder;
pub mod title_batches;

pub use builder::{INDEX_FILE_NAME, IndexBuilder};
pub use title_batches::{TITLE_BATCH_PROMPT, TitleBatch, split_title_batches};
