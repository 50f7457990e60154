//! Data models for exported conversation archives.
//!
//! - [`Conversation`] - one archive entry with its node tree
//! - [`Node`] / [`Message`] - a slot in the tree and the message it may carry
//! - [`CategoryAssignment`] - the category chosen for a conversation and why
//! - [`IndexEntry`] - one row of the generated index
//!
//! Wire-level quirks (ordered node mapping, lenient `create_time`) are handled
//! by custom deserializers in [`crate::parsers::deserializers`].

pub mod category;
pub mod conversation;
pub mod index;

pub use category::{CategoryAssignment, CategorySource};
pub use conversation::{
    Author, ContentPart, Conversation, Message, MessageContent, Node, NodeMapping, RawTimestamp,
    Role,
};
pub use index::IndexEntry;
