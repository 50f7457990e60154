//! Chat Archive Organizer - Turn exported ChatGPT conversations into a categorized Markdown vault
//!
//! This library reads the `conversations.json` archives produced by ChatGPT's data export
//! and writes one folder per conversation under a category directory. It supports:
//!
//! - Reconstructing each conversation's chronology from its message tree
//! - Rendering transcripts as Markdown plus a plain-text replay prompt
//! - Categorizing by operator overrides, content keywords or title keywords
//! - Building a categorized `index.md` and a list of uncategorized titles
//!
//! # Example
//!
//! ```no_run
//! use chat_archive_organizer::{FsSink, OverrideMap, ProcessContext, RunOptions, Taxonomy};
//! use chat_archive_organizer::{load_archive, run};
//! use std::path::Path;
//!
//! let conversations = load_archive(Path::new("conversations.json"))?;
//! let taxonomy = Taxonomy::builtin()?;
//! let overrides = OverrideMap::new();
//! let options = RunOptions::new("vault");
//! let ctx = ProcessContext {
//!     taxonomy: &taxonomy,
//!     overrides: &overrides,
//!     options: &options,
//!     now: chrono::Utc::now(),
//! };
//! let report = run(&conversations, &ctx, &mut FsSink)?;
//! println!("Wrote {} conversations", report.indexed);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod categorizer;
pub mod cli;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod transcript;
pub mod utils;

// Re-export commonly used types
pub use categorizer::{OverrideMap, Taxonomy};
pub use models::{CategoryAssignment, Conversation, IndexEntry};
pub use parsers::{load_archive, load_archives};
pub use pipeline::{FsSink, MemorySink, ProcessContext, RunOptions, RunReport, run};
pub use utils::naming::sanitize;
