//! Summary command - compare the receipt total with the deduction threshold.

use chrono::NaiveDate;
use clap::Args;
use console::style;

use receipt_core::{DeductionSummary, ReceiptStore};

use super::{format_yen, parse_date, Context};

/// Arguments for the summary command.
#[derive(Args)]
pub struct SummaryArgs {
    /// Deduction threshold in yen (overrides config)
    #[arg(short, long)]
    threshold: Option<u64>,

    /// Only receipts on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Only receipts on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: SummaryArgs, ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;

    let records = store.list_between(args.from, args.to)?;
    let threshold = args.threshold.unwrap_or(config.deduction.threshold);
    let summary = DeductionSummary::compute(&records, threshold);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }

    Ok(())
}

fn format_summary(summary: &DeductionSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Receipts:    {}\n", summary.receipt_count));
    output.push_str(&format!("Total:       {}\n", format_yen(summary.total)));
    output.push_str(&format!("Threshold:  -{}\n", format_yen(summary.threshold)));

    if summary.eligible {
        output.push_str(&format!(
            "Deductible:  {}  {}\n",
            format_yen(summary.deductible),
            style("eligible").green()
        ));
    } else {
        output.push_str(&format!(
            "Deductible:  {}  {}\n",
            format_yen(0),
            style(format!("{} below threshold", format_yen(summary.remaining))).yellow()
        ));
    }

    if summary.unresolved > 0 {
        output.push_str(&format!(
            "\n{} {} receipts need their amount checked (run `receipt list`)\n",
            style("⚠").yellow(),
            summary.unresolved
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary_eligible() {
        console::set_colors_enabled(false);
        let summary = DeductionSummary::from_amounts([70_000, 50_000], 100_000);
        let text = format_summary(&summary);

        assert!(text.contains("Total:       ¥120,000"));
        assert!(text.contains("Deductible:  ¥20,000  eligible"));
        assert!(!text.contains("need their amount checked"));
    }

    #[test]
    fn test_format_summary_below() {
        console::set_colors_enabled(false);
        let summary = DeductionSummary::from_amounts([30_000, 0], 100_000);
        let text = format_summary(&summary);

        assert!(text.contains("¥70,000 below threshold"));
        assert!(text.contains("1 receipts need their amount checked"));
    }
}
