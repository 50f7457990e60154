use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use super::context::ProcessContext;
use super::sink::OutputSink;
use crate::categorizer::resolve_category;
use crate::models::{CategoryAssignment, Conversation, IndexEntry, RawTimestamp};
use crate::transcript::{
    WalkError, collect_plain_text, collect_transcript, render_markdown, render_prompt,
};
use crate::utils::naming::FILE_TIMESTAMP_FORMAT;
use crate::utils::{
    PLACEHOLDER_NAME, category_dir_name, fingerprint, folder_name, prompt_path, sanitize,
    unique_path,
};

/// Recoverable problems that were patched over while processing a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationWarning {
    /// `create_time` absent, null or zero; the run's start time was used
    MissingCreationTime,
    /// Title absent or blank; the placeholder name was used
    EmptyTitle,
}

/// Why a conversation produced no output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No node without a parent
    MissingRoot,
    /// The node tree reaches this node more than once
    CycleDetected(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingRoot => f.write_str("could not find root node"),
            SkipReason::CycleDetected(id) => write!(f, "cycle detected at node '{}'", id),
        }
    }
}

impl From<WalkError> for SkipReason {
    fn from(err: WalkError) -> Self {
        match err {
            // the root id comes from the mapping itself, so this only means a broken tree
            WalkError::NotFound(_) => SkipReason::MissingRoot,
            WalkError::CycleDetected(id) => SkipReason::CycleDetected(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedConversation {
    pub assignment: CategoryAssignment,
    pub entry: IndexEntry,
    pub prompt_path: PathBuf,
    pub warnings: Vec<ConversationWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Indexed(Box<ProcessedConversation>),
    Skipped { title: String, reason: SkipReason },
}

/// Categorizes, names, renders and writes one conversation
///
/// Skips (missing root, cycles) are returned as [`Outcome::Skipped`] before
/// anything is written. `Err` is reserved for sink failures, which end the run.
pub fn process_conversation(
    conversation: &Conversation,
    ctx: &ProcessContext<'_>,
    sink: &mut dyn OutputSink,
) -> Result<Outcome> {
    let mut warnings = Vec::new();

    let title = sanitize(conversation.title.as_deref());
    if conversation.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
        warn!("Conversation without a title, using '{}'", PLACEHOLDER_NAME);
        warnings.push(ConversationWarning::EmptyTitle);
    }

    let Some(root_id) = conversation.mapping.root_id() else {
        warn!(title = %title, "Could not find root node for conversation, skipping");
        return Ok(Outcome::Skipped { title, reason: SkipReason::MissingRoot });
    };

    let walked = collect_transcript(root_id, &conversation.mapping).and_then(|transcript| {
        let content_text = if ctx.options.categorize.by_content_keywords {
            Some(collect_plain_text(root_id, &conversation.mapping)?)
        } else {
            None
        };
        Ok((transcript, content_text))
    });
    let (transcript, content_text) = match walked {
        Ok(walked) => walked,
        Err(e) => {
            let reason = SkipReason::from(e);
            warn!(title = %title, "Skipping conversation: {}", reason);
            return Ok(Outcome::Skipped { title, reason });
        }
    };
    if transcript.is_empty() {
        debug!(title = %title, "Conversation has no text messages");
    }

    let created = match conversation.create_time.as_ref().and_then(RawTimestamp::to_datetime) {
        Some(created) => created,
        None => {
            warn!(title = %title, "'create_time' not found for conversation, using current time");
            warnings.push(ConversationWarning::MissingCreationTime);
            ctx.now
        }
    };

    let raw_create_time = conversation.create_time.as_ref().map(|ts| ts.raw.as_str());
    let fingerprint = fingerprint(&title, raw_create_time);
    let conversation_id =
        conversation.export_id().map(str::to_string).unwrap_or_else(|| fingerprint.clone());

    let assignment = resolve_category(
        &conversation_id,
        &title,
        content_text.as_deref(),
        ctx.taxonomy,
        ctx.overrides,
        ctx.options.categorize,
    );

    let folder = ctx
        .options
        .output_dir
        .join(category_dir_name(&assignment.category))
        .join(folder_name(&created, &fingerprint));
    let timestamp_iso = created.format(FILE_TIMESTAMP_FORMAT).to_string();
    let transcript_path = unique_path(&folder, &title, &timestamp_iso);
    let prompt_path = prompt_path(&folder, &title, &timestamp_iso);

    info!(title = %title, path = %transcript_path.display(), "Writing conversation");
    let updated = sink.write(&transcript_path, &render_markdown(&transcript))?;
    sink.write(&prompt_path, &render_prompt(&transcript))?;

    let entry = IndexEntry {
        title,
        created,
        updated,
        message_count: transcript.message_count(),
        output_path: transcript_path,
    };

    Ok(Outcome::Indexed(Box::new(ProcessedConversation { assignment, entry, prompt_path, warnings })))
}
