//! Extract command - read the total from OCR transcripts.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::info;

use receipt_core::{explain_amount, AmountMatch, AmountSource};

use super::format_yen;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Transcript files (reads stdin when omitted)
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show which rule produced the amount
    #[arg(long)]
    explain: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text
    Text,
}

#[derive(Serialize)]
struct Extracted {
    input: String,
    amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<AmountSource>,
}

pub async fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let inputs = read_inputs(&args.files)?;

    let results: Vec<Extracted> = inputs
        .into_iter()
        .map(|(input, transcript)| {
            let AmountMatch { value, source } = explain_amount(&transcript);
            info!("{}: {}", input, value);
            Extracted {
                input,
                amount: value,
                source: args.explain.then_some(source),
            }
        })
        .collect();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Text => {
            let prefix = results.len() > 1;
            for result in &results {
                println!("{}", format_text(result, prefix));
            }
        }
    }

    Ok(())
}

fn read_inputs(files: &[PathBuf]) -> anyhow::Result<Vec<(String, String)>> {
    if files.is_empty() {
        let mut transcript = String::new();
        std::io::stdin().read_to_string(&mut transcript)?;
        return Ok(vec![("-".to_string(), transcript)]);
    }

    files
        .iter()
        .map(|path| {
            let transcript = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
            Ok((path.display().to_string(), transcript))
        })
        .collect()
}

fn format_text(result: &Extracted, prefix: bool) -> String {
    let mut line = String::new();

    if prefix {
        line.push_str(&result.input);
        line.push('\t');
    }
    line.push_str(&result.amount.to_string());

    if let Some(source) = &result.source {
        line.push_str(&format!("\t({}, {})", format_yen(result.amount), describe(source)));
    }

    line
}

fn describe(source: &AmountSource) -> String {
    match source {
        AmountSource::Keyword { keyword, line } => format!("keyword {} on line \"{}\"", keyword, line),
        AmountSource::Fallback { candidates } => {
            format!("largest of {} plausible numbers, please verify", candidates)
        }
        AmountSource::NotFound => "no amount found, enter it manually".to_string(),
    }
}
