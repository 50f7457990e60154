use crate::models::{Message, NodeMapping, Role};

use super::walker::{WalkError, walk};

/// Fallback label for tool messages without an author name
pub const UNKNOWN_TOOL: &str = "Unknown Tool";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Speaker {
    Human,
    Assistant,
    Tool(String),
    /// Roles other than user/assistant/tool keep their text without a label
    Unlabeled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptEntry {
    /// Builds an entry from a message, or `None` when the message has no text
    pub fn from_message(message: &Message) -> Option<Self> {
        let text = message.joined_text();
        if text.is_empty() {
            return None;
        }

        let speaker = match message.role() {
            Role::User => Speaker::Human,
            Role::Assistant => Speaker::Assistant,
            Role::Tool => Speaker::Tool(message.tool_name().unwrap_or(UNKNOWN_TOOL).to_string()),
            Role::Other => Speaker::Unlabeled,
        };

        Some(Self { speaker, text })
    }
}

/// Messages of one conversation in tree order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of nodes that carried at least one non-empty text part
    pub fn message_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TranscriptEntry> for Transcript {
    fn from_iter<I: IntoIterator<Item = TranscriptEntry>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Concatenates the plain text of every part under `root_id`, separated by spaces.
/// Roles are ignored; this is the input for keyword scoring.
pub fn collect_plain_text(root_id: &str, mapping: &NodeMapping) -> Result<String, WalkError> {
    let mut pieces: Vec<&str> = Vec::new();
    walk(root_id, mapping, |node| {
        if let Some(message) = &node.message {
            pieces.extend(message.part_texts());
        }
    })?;
    Ok(pieces.join(" "))
}

/// Collects the labeled transcript under `root_id`
pub fn collect_transcript(root_id: &str, mapping: &NodeMapping) -> Result<Transcript, WalkError> {
    let mut entries = Vec::new();
    walk(root_id, mapping, |node| {
        if let Some(entry) = node.message.as_ref().and_then(TranscriptEntry::from_message) {
            entries.push(entry);
        }
    })?;
    Ok(Transcript { entries })
}
