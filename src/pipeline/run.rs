use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use super::context::ProcessContext;
use super::process::{ConversationWarning, Outcome, SkipReason, process_conversation};
use super::sink::OutputSink;
use crate::indexer::{IndexBuilder, split_title_batches};
use crate::models::{CategorySource, Conversation};

/// What a run produced, for the summary printed at the end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub indexed: usize,
    pub skipped: Vec<(String, SkipReason)>,
    pub warnings: Vec<(String, ConversationWarning)>,
    /// Titles that fell back to the default category, in processing order
    pub unprocessed_titles: Vec<String>,
    pub index_path: PathBuf,
    pub unprocessed_path: Option<PathBuf>,
    pub title_batch_paths: Vec<PathBuf>,
    /// Categories with their conversation counts, in first-seen order
    pub categories: Vec<(String, usize)>,
}

/// Processes every conversation in archive order, then writes the index,
/// the unprocessed-title list and any title batch files
///
/// Per-conversation skips are collected in the report; the first write
/// failure aborts the run.
pub fn run(
    conversations: &[Conversation],
    ctx: &ProcessContext<'_>,
    sink: &mut dyn OutputSink,
) -> Result<RunReport> {
    let options = ctx.options;
    let mut index = IndexBuilder::new(&options.output_dir);
    let mut report = RunReport::default();
    let mut all_titles = Vec::new();

    for conversation in conversations {
        match process_conversation(conversation, ctx, sink)? {
            Outcome::Indexed(processed) => {
                let processed = *processed;
                let title = processed.entry.title.clone();
                report.warnings.extend(processed.warnings.iter().map(|w| (title.clone(), *w)));
                if processed.assignment.source == CategorySource::Fallback {
                    report.unprocessed_titles.push(title.clone());
                }
                all_titles.push(title);
                index.record(&processed.assignment.category, processed.entry);
                report.indexed += 1;
            }
            Outcome::Skipped { title, reason } => report.skipped.push((title, reason)),
        }
    }

    let index_path = index.index_path();
    sink.write(&index_path, &index.render())?;
    info!(path = %index_path.display(), entries = index.len(), "Wrote index");
    report.index_path = index_path;
    report.categories =
        index.categories().map(|c| (c.to_string(), index.entries(c).len())).collect();

    if !report.unprocessed_titles.is_empty() {
        let path = options.output_dir.join(&options.unprocessed_file);
        sink.write(&path, &report.unprocessed_titles.join("\n"))?;
        info!(
            path = %path.display(),
            count = report.unprocessed_titles.len(),
            "Wrote unprocessed titles"
        );
        report.unprocessed_path = Some(path);
    }

    if let Some(batch_size) = options.split_titles {
        for batch in split_title_batches(&all_titles, batch_size) {
            let path = options.output_dir.join(&batch.file_name);
            sink.write(&path, &batch.contents)?;
            report.title_batch_paths.push(path);
        }
        info!(files = report.title_batch_paths.len(), "Wrote title batches");
    }

    if !report.skipped.is_empty() {
        warn!(count = report.skipped.len(), "Some conversations were skipped");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;
    use std::path::Path;

    use chrono::DateTime;
    use serde_json::json;

    use super::*;
    use crate::categorizer::{CategorizeOptions, OverrideMap, Taxonomy};
    use crate::pipeline::context::RunOptions;
    use crate::pipeline::sink::MemorySink;

    fn conversation(title: &str, time: i64, text: &str) -> serde_json::Value {
        json!({
            "title": title,
            "create_time": time,
            "mapping": {
                "r": {"parent": null, "children": ["m"]},
                "m": {"parent": "r", "children": [], "message": {
                    "author": {"role": "user"},
                    "content": {"parts": [text]}
                }}
            }
        })
    }

    fn archive(values: Vec<serde_json::Value>) -> Vec<Conversation> {
        serde_json::from_value(serde_json::Value::Array(values)).unwrap()
    }

    fn execute(conversations: &[Conversation], options: &RunOptions) -> (RunReport, MemorySink) {
        let taxonomy = Taxonomy::builtin().unwrap();
        let overrides = OverrideMap::new();
        let ctx = ProcessContext {
            taxonomy: &taxonomy,
            overrides: &overrides,
            options,
            now: DateTime::from_timestamp(1_800_000_000, 0).unwrap(),
        };
        let mut sink = MemorySink::new();
        let report = run(conversations, &ctx, &mut sink).unwrap();
        (report, sink)
    }

    fn keyword_options() -> RunOptions {
        let mut options = RunOptions::new("/out");
        options.categorize = CategorizeOptions { by_content_keywords: true, by_title_keywords: true };
        options
    }

    #[test]
    fn test_run_writes_index_and_unprocessed() {
        let conversations = archive(vec![
            conversation("Nginx setup help", 1_700_000_000, "configure nginx please"),
            conversation("Random chat", 1_700_000_100, "hello there"),
        ]);

        let (report, sink) = execute(&conversations, &keyword_options());

        assert_eq!(report.indexed, 2);
        assert_eq!(report.unprocessed_titles, vec!["Random chat"]);
        assert_eq!(report.unprocessed_path, Some(PathBuf::from("/out/unprocessed.txt")));
        assert_eq!(sink.get(Path::new("/out/unprocessed.txt")), Some("Random chat"));
        assert_eq!(
            report.categories,
            vec![("System Administration".to_string(), 1), ("Unprocessed".to_string(), 1)]
        );

        let index = sink.get(Path::new("/out/index.md")).unwrap();
        assert!(index.starts_with("# Conversation Index"));
        assert!(index.contains("## System Administration"));
        assert!(index.contains("## Unprocessed"));
        // two conversations, each a transcript and a prompt, plus index and unprocessed list
        assert_eq!(sink.len(), 6);
    }

    #[test]
    fn test_run_without_fallbacks_writes_no_unprocessed_file() {
        let conversations =
            archive(vec![conversation("Nginx setup help", 1_700_000_000, "configure nginx")]);

        let (report, sink) = execute(&conversations, &keyword_options());

        assert!(report.unprocessed_path.is_none());
        assert!(sink.get(Path::new("/out/unprocessed.txt")).is_none());
    }

    #[test]
    fn test_run_collects_skips_and_continues() {
        let mut values = vec![json!({"title": "Rootless", "mapping": {}})];
        values.push(conversation("Kept", 1_700_000_000, "text"));
        let conversations = archive(values);

        let (report, sink) = execute(&conversations, &RunOptions::new("/out"));

        assert_eq!(report.indexed, 1);
        assert_eq!(report.skipped, vec![("Rootless".to_string(), SkipReason::MissingRoot)]);
        assert_eq!(report.unprocessed_titles, vec!["Kept"]);
        assert!(!sink.get(Path::new("/out/index.md")).unwrap().contains("Rootless"));
    }

    #[test]
    fn test_run_empty_archive_still_writes_index() {
        let (report, sink) = execute(&[], &RunOptions::new("/out"));

        assert_eq!(report.indexed, 0);
        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink.get(Path::new("/out/index.md")),
            Some("# Conversation Index\n\n## Legend\n🤖 Created | 🔄 Updated\n\n")
        );
    }

    #[test]
    fn test_run_title_batches() {
        let conversations = archive(
            (0..5).map(|i| conversation(&format!("Chat {}", i), 1_700_000_000 + i, "x")).collect(),
        );
        let mut options = RunOptions::new("/out");
        options.split_titles = NonZeroUsize::new(2);

        let (report, sink) = execute(&conversations, &options);

        assert_eq!(
            report.title_batch_paths,
            vec![
                PathBuf::from("/out/titles_part_1.txt"),
                PathBuf::from("/out/titles_part_2.txt"),
                PathBuf::from("/out/titles_part_3.txt"),
            ]
        );
        assert!(sink.get(Path::new("/out/titles_part_3.txt")).unwrap().ends_with("\n\nChat 4\n"));
    }

    #[test]
    fn test_run_records_warnings_by_title() {
        let conversations = archive(vec![json!({
            "title": "Undated",
            "mapping": {"r": {"parent": null, "children": []}}
        })]);

        let (report, _) = execute(&conversations, &RunOptions::new("/out"));

        assert_eq!(
            report.warnings,
            vec![("Undated".to_string(), ConversationWarning::MissingCreationTime)]
        );
    }

    #[test]
    fn test_custom_unprocessed_file_name() {
        let conversations = archive(vec![conversation("Random chat", 1_700_000_000, "hello")]);
        let mut options = RunOptions::new("/out");
        options.unprocessed_file = "left_over.txt".to_string();

        let (report, _) = execute(&conversations, &options);

        assert_eq!(report.unprocessed_path, Some(PathBuf::from("/out/left_over.txt")));
    }
}
