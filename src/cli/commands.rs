use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::categorizer::{CategorizeOptions, Taxonomy};
use crate::parsers::{load_archives, load_overrides, parse_taxonomy_file};
use crate::pipeline::{
    DEFAULT_UNPROCESSED_FILE, FsSink, MemorySink, ProcessContext, RunOptions, RunReport,
    run as run_pipeline,
};

#[derive(Parser, Debug)]
#[command(name = "chat-archive-organizer")]
#[command(version)]
#[command(
    about = "Organize exported ChatGPT conversations into categorized Markdown files",
    long_about = None
)]
pub struct Cli {
    /// Exported conversation archives (JSON arrays)
    #[arg(required = true, num_args = 1..)]
    pub input_files: Vec<PathBuf>,

    /// Directory that receives the category folders and index
    pub output_dir: PathBuf,

    /// Categorize by keywords found in the conversation text
    #[arg(long)]
    pub categorize_by_keywords: bool,

    /// Categorize by keywords found in the title
    #[arg(long)]
    pub categorize_by_title: bool,

    /// JSON files mapping conversation titles to categories
    #[arg(long, alias = "categories_file", num_args = 1.., value_name = "FILE")]
    pub categories_file: Vec<PathBuf>,

    /// JSON file replacing the built-in keyword taxonomy
    #[arg(long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Write all titles to titles_part_<n>.txt files of N titles each
    #[arg(long, value_name = "N")]
    pub split_titles: Option<NonZeroUsize>,

    /// File name, inside OUTPUT_DIR, for titles left in the fallback category
    #[arg(long, default_value = DEFAULT_UNPROCESSED_FILE, value_name = "NAME")]
    pub unprocessed_file: String,

    /// Categorize and render without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: String,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            output_dir: self.output_dir.clone(),
            categorize: CategorizeOptions {
                by_content_keywords: self.categorize_by_keywords,
                by_title_keywords: self.categorize_by_title,
            },
            unprocessed_file: self.unprocessed_file.clone(),
            split_titles: self.split_titles,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let report = execute(&cli)?;
    show_summary(&cli, &report);

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Loads inputs, processes the archive and writes (or, for a dry run, only renders) the output
pub fn execute(cli: &Cli) -> Result<RunReport> {
    let options = cli.run_options();

    let conversations = load_archives(&cli.input_files)?;
    let overrides = load_overrides(&cli.categories_file);
    if !overrides.is_empty() {
        info!(count = overrides.len(), "Loaded category overrides");
    }

    let taxonomy = match &cli.taxonomy {
        Some(path) => parse_taxonomy_file(path)?,
        None => Taxonomy::builtin()?,
    };
    let keyword_passes = cli.categorize_by_keywords || cli.categorize_by_title;
    if keyword_passes && taxonomy.rules().iter().all(|rule| rule.keywords().is_empty()) {
        warn!("Keyword categorization requested but the taxonomy has no keywords");
    }

    let ctx = ProcessContext {
        taxonomy: &taxonomy,
        overrides: &overrides,
        options: &options,
        now: Utc::now(),
    };

    if cli.dry_run {
        info!("Dry run, nothing will be written");
        let mut sink = MemorySink::new();
        return run_pipeline(&conversations, &ctx, &mut sink);
    }

    fs::create_dir_all(&options.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", options.output_dir.display())
    })?;
    run_pipeline(&conversations, &ctx, &mut FsSink)
}

fn show_summary(cli: &Cli, report: &RunReport) {
    println!("Conversation Archive Summary");
    println!("============================");
    println!("Conversations written: {}", report.indexed);
    for (category, count) in &report.categories {
        println!("  {}: {}", category, count);
    }
    println!("Skipped: {}", report.skipped.len());
    for (title, reason) in &report.skipped {
        println!("  {}: {}", title, reason);
    }
    println!("Warnings: {}", report.warnings.len());
    println!();

    if cli.dry_run {
        println!("Dry run: no files were written to {}", cli.output_dir.display());
        return;
    }

    println!("Index: {}", report.index_path.display());
    if let Some(path) = &report.unprocessed_path {
        println!("Unprocessed titles: {}", path.display());
    }
    if !report.title_batch_paths.is_empty() {
        println!("Title batches: {}", report.title_batch_paths.len());
    }
}
