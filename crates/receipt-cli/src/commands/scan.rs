//! Scan command - OCR receipt images and store the results.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use receipt_core::{OcrEngine, ReceiptRecord, ReceiptStore, TesseractCli};

use super::{format_yen, parse_date, short_id, Context};

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp", "gif"];

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Receipt images or `.txt` transcripts (file or glob pattern)
    #[arg(required = true)]
    input: String,

    /// Receipt date (YYYY-MM-DD, default: today)
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// OCR language hint (overrides config)
    #[arg(short, long)]
    language: Option<String>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Keep going when a file fails, storing it with error status
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ScanOutcome {
    index: usize,
    path: PathBuf,
    record: ReceiptRecord,
    error: Option<String>,
}

pub async fn run(args: ScanArgs, ctx: &Context) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = ctx.load_config()?;
    let mut store = ctx.open_store(&config)?;

    let files = collect_inputs(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let engine: Arc<dyn OcrEngine> = Arc::new(TesseractCli::with_program(&config.ocr.program));
    let language = args.language.clone().unwrap_or_else(|| config.ocr.language.clone());
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut outcomes: Vec<ScanOutcome> = stream::iter(files.into_iter().enumerate())
        .map(|(index, path)| {
            let engine = Arc::clone(&engine);
            let language = language.clone();
            let pb = pb.clone();
            async move {
                let task_path = path.clone();
                let outcome = tokio::task::spawn_blocking(move || {
                    scan_file(index, task_path, engine.as_ref(), &language, date)
                })
                .await;
                pb.inc(1);

                outcome.unwrap_or_else(|e| {
                    let mut record = ReceiptRecord::pending(file_name(&path), date);
                    record.fail();
                    ScanOutcome {
                        index,
                        path,
                        record,
                        error: Some(format!("worker failed: {}", e)),
                    }
                })
            }
        })
        .buffer_unordered(args.jobs.max(1))
        .collect()
        .await;

    pb.finish_and_clear();
    outcomes.sort_by_key(|o| o.index);

    if !args.continue_on_error {
        let failures: Vec<(&Path, &str)> = outcomes
            .iter()
            .filter_map(|o| o.error.as_deref().map(|e| (o.path.as_path(), e)))
            .collect();

        if !failures.is_empty() {
            for (path, message) in &failures {
                error!("Failed to process {}: {}", path.display(), message);
            }
            anyhow::bail!(
                "{} of {} files failed, nothing was stored (use --continue-on-error to keep the rest)",
                failures.len(),
                outcomes.len()
            );
        }
    }

    let mut stored = 0;
    let mut failed = 0;

    for outcome in outcomes {
        match &outcome.error {
            None => {
                let marker = if outcome.record.needs_review() {
                    style("⚠").yellow()
                } else {
                    style("✓").green()
                };
                println!(
                    "  {} {:<32} {:>12}  {}",
                    marker,
                    outcome.record.file_name,
                    format_yen(outcome.record.amount),
                    short_id(&outcome.record.id)
                );
            }
            Some(message) => {
                warn!("Failed to process {}: {}", outcome.path.display(), message);
                println!(
                    "  {} {:<32} {}",
                    style("✗").red(),
                    outcome.record.file_name,
                    message
                );
                failed += 1;
            }
        }

        store.insert(outcome.record)?;
        stored += 1;
    }

    println!();
    println!(
        "{} Stored {} receipts in {:?} ({} failed)",
        style("✓").green(),
        stored,
        start.elapsed(),
        failed
    );

    Ok(())
}

fn collect_inputs(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && (is_image(p) || is_transcript(p)))
        .collect();
    Ok(files)
}

fn scan_file(
    index: usize,
    path: PathBuf,
    engine: &dyn OcrEngine,
    language: &str,
    date: NaiveDate,
) -> ScanOutcome {
    let mut record = ReceiptRecord::pending(file_name(&path), date);

    let transcript = if is_transcript(&path) {
        fs::read_to_string(&path).map_err(|e| e.to_string())
    } else {
        record.image_path = Some(fs::canonicalize(&path).unwrap_or_else(|_| path.clone()));
        engine.recognize(&path, language).map_err(|e| e.to_string())
    };

    let error = match transcript {
        Ok(text) => {
            let found = record.complete(text);
            debug!("{}: {} via {:?}", path.display(), found.value, found.source);
            None
        }
        Err(message) => {
            record.fail();
            Some(message)
        }
    };

    ScanOutcome {
        index,
        path,
        record,
        error,
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn is_image(path: &Path) -> bool {
    IMAGE_EXTENSIONS.contains(&extension(path).as_str())
}

fn is_transcript(path: &Path) -> bool {
    extension(path) == "txt"
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("receipt")
        .to_string()
}
