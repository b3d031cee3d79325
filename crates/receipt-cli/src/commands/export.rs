//! Export command - write receipts as a spreadsheet-friendly CSV.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;

use receipt_core::{ReceiptRecord, ReceiptStore};

use super::{parse_date, Context};

/// UTF-8 byte order mark, so Excel opens the file as UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const HEADERS: [&str; 5] = ["日付", "金額", "内容(OCR結果)", "ファイル名", "ID"];

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Output file (`-` for stdout)
    #[arg(short, long, default_value = "medical_expenses.csv")]
    output: PathBuf,

    /// Only receipts on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Only receipts on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
}

pub fn run(args: ExportArgs, ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;
    let records = store.list_between(args.from, args.to)?;

    let data = render_csv(&records)?;

    if args.output.as_os_str() == "-" {
        std::io::stdout().write_all(&data)?;
    } else {
        fs::write(&args.output, &data)?;
        println!(
            "{} Exported {} receipts to {}",
            style("✓").green(),
            records.len(),
            args.output.display()
        );
    }

    Ok(())
}

/// Render records as CSV with a leading BOM.
pub fn render_csv(records: &[ReceiptRecord]) -> anyhow::Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    wtr.write_record(HEADERS)?;

    for record in records {
        let text = record
            .raw_text
            .as_deref()
            .unwrap_or("")
            .replace("\r\n", " ")
            .replace(['\n', '\r'], " ");

        wtr.write_record([
            record.display_date(),
            record.amount.to_string(),
            text,
            record.file_name.clone(),
            record.id.clone(),
        ])?;
    }

    Ok(wtr.into_inner()?)
}
