//! CLI application for medical receipt OCR and deduction tracking.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, export, extract, records, scan, summary, sync, Context};

/// Medical receipt OCR - read receipt totals and track the deduction threshold
#[derive(Parser)]
#[command(name = "receipt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the receipt database (overrides config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the total from OCR transcripts
    Extract(extract::ExtractArgs),

    /// OCR receipt images and store them
    Scan(scan::ScanArgs),

    /// List stored receipts
    List(records::ListArgs),

    /// Correct the amount of a stored receipt
    SetAmount(records::SetAmountArgs),

    /// Remove a stored receipt
    Remove(records::RemoveArgs),

    /// Remove all stored receipts
    Clear(records::ClearArgs),

    /// Show the deduction summary
    Summary(summary::SummaryArgs),

    /// Export receipts as CSV
    Export(export::ExportArgs),

    /// Send receipts to the spreadsheet webhook
    Sync(sync::SyncArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let ctx = Context::new(cli.config, cli.store);

    // Execute command
    match cli.command {
        Commands::Extract(args) => extract::run(args).await,
        Commands::Scan(args) => scan::run(args, &ctx).await,
        Commands::List(args) => records::list(args, &ctx),
        Commands::SetAmount(args) => records::set_amount(args, &ctx),
        Commands::Remove(args) => records::remove(args, &ctx),
        Commands::Clear(args) => records::clear(args, &ctx),
        Commands::Summary(args) => summary::run(args, &ctx),
        Commands::Export(args) => export::run(args, &ctx),
        Commands::Sync(args) => sync::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx),
    }
}
