//! Conversation tree traversal and transcript rendering
//!
//! [`walk`] visits a message tree in pre-order using the stored child order,
//! which reconstructs the conversation's chronology. Two collectors sit on top:
//! [`collect_plain_text`] for keyword scoring and [`collect_transcript`] for
//! rendering via [`render_markdown`] and [`render_prompt`].

pub mod collect;
pub mod render;
pub mod walker;

pub use collect::{
    Speaker, Transcript, TranscriptEntry, UNKNOWN_TOOL, collect_plain_text, collect_transcript,
};
pub use render::{render_markdown, render_prompt, strip_markup};
pub use walker::{WalkError, walk};
