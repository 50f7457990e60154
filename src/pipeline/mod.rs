//! Per-conversation processing and the run that drives it
//!
//! [`process_conversation`] turns one archive entry into a transcript, a replay
//! prompt and an index row. [`run`] does that for a whole archive and then
//! writes the run-level files. All writes go through an [`OutputSink`], so a
//! dry run swaps in [`MemorySink`] and touches nothing on disk.

pub mod context;
pub mod process;
pub mod run;
pub mod sink;

pub use context::{DEFAULT_UNPROCESSED_FILE, ProcessContext, RunOptions};
pub use process::{
    ConversationWarning, Outcome, ProcessedConversation, SkipReason, process_conversation,
};
pub use run::{RunReport, run};
pub use sink::{FsSink, MemorySink, OutputSink};
