//! JSON loaders for conversation archives, category overrides and taxonomies
//!
//! # Error Handling Strategy
//!
//! - **Archives**: a missing file or malformed JSON is fatal and surfaces as an
//!   [`ArchiveError`]. A half-read archive would silently drop conversations.
//!
//! - **Override files**: operator-supplied hints. Missing, malformed or non-object
//!   files are logged as warnings and skipped so a bad hint file never blocks a run.
//!
//! - **Taxonomy files**: requested explicitly on the command line, so failures are fatal.

pub mod archive;
pub mod deserializers;
pub mod overrides;
pub mod taxonomy;

pub use archive::{ArchiveError, load_archive, load_archives};
pub use overrides::load_overrides;
pub use taxonomy::parse_taxonomy_file;
