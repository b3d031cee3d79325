//! Receipt management commands - list, correct, remove, clear.

use chrono::NaiveDate;
use clap::Args;
use console::style;

use receipt_core::{ReceiptRecord, ReceiptStore};

use super::extract::OutputFormat;
use super::{format_yen, parse_date, short_id, Context};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only receipts on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Only receipts on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Arguments for the set-amount command.
#[derive(Args)]
pub struct SetAmountArgs {
    /// Receipt id or unique id prefix
    id: String,

    /// Corrected amount in yen
    amount: u64,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Receipt id or unique id prefix
    id: String,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Confirm removal of every stored receipt
    #[arg(long)]
    yes: bool,
}

pub fn list(args: ListArgs, ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;
    let records = store.list_between(args.from, args.to)?;

    if let OutputFormat::Json = args.format {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{} No receipts stored.", style("ℹ").blue());
        return Ok(());
    }

    println!(
        "{:<8}  {:<10}  {:>12}  {:<10}  {}",
        "ID", "DATE", "AMOUNT", "STATUS", "FILE"
    );
    for record in &records {
        println!("{}", format_row(record));
    }

    Ok(())
}

fn format_row(record: &ReceiptRecord) -> String {
    let mut status = record.status.to_string();
    if record.amount_overridden {
        status.push('*');
    }

    let row = format!(
        "{:<8}  {:<10}  {:>12}  {:<10}  {}",
        short_id(&record.id),
        record.display_date(),
        format_yen(record.amount),
        status,
        record.file_name
    );

    if record.needs_review() {
        format!("{} {}", row, style("(check amount)").yellow())
    } else {
        row
    }
}

pub fn set_amount(args: SetAmountArgs, ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let mut store = ctx.open_store(&config)?;

    let id = store.resolve_id(&args.id)?;
    let mut record = store.get(&id)?;
    let previous = record.amount;
    record.set_amount(args.amount);
    store.update(record)?;

    println!(
        "{} {} {} -> {}",
        style("✓").green(),
        short_id(&id),
        format_yen(previous),
        format_yen(args.amount)
    );

    Ok(())
}

pub fn remove(args: RemoveArgs, ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let mut store = ctx.open_store(&config)?;

    let id = store.resolve_id(&args.id)?;
    let removed = store.remove(&id)?;

    println!(
        "{} Removed {} ({})",
        style("✓").green(),
        removed.file_name,
        short_id(&removed.id)
    );

    Ok(())
}

pub fn clear(args: ClearArgs, ctx: &Context) -> anyhow::Result<()> {
    if !args.yes {
        anyhow::bail!("Refusing to remove all receipts without --yes");
    }

    let config = ctx.load_config()?;
    let mut store = ctx.open_store(&config)?;
    let count = store.clear()?;

    println!("{} Removed {} receipts", style("✓").green(), count);

    Ok(())
}
