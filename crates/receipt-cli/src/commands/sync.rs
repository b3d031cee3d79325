//! Sync command - deliver receipts to the spreadsheet webhook.

use std::fs;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use clap::Args;
use console::style;
use tracing::{debug, warn};

use receipt_core::models::webhook::{mime_type_for, WebhookPayload};
use receipt_core::{ReceiptRecord, ReceiptStatus, ReceiptStore};

use super::{short_id, Context};

/// Arguments for the sync command.
#[derive(Args)]
pub struct SyncArgs {
    /// Only send this receipt (id or unique id prefix)
    #[arg(long)]
    id: Option<String>,

    /// Webhook URL (overrides config)
    #[arg(long)]
    url: Option<String>,

    /// Do not attach receipt images
    #[arg(long)]
    no_image: bool,
}

pub async fn run(args: SyncArgs, ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;

    let Some(url) = args.url.clone().or_else(|| config.webhook.url.clone()) else {
        anyhow::bail!(
            "No webhook URL configured. Pass --url or run 'receipt config set webhook.url <URL>'."
        );
    };

    let records: Vec<ReceiptRecord> = match &args.id {
        Some(prefix) => vec![store.get(&store.resolve_id(prefix)?)?],
        None => store
            .list()?
            .into_iter()
            .filter(|r| r.status == ReceiptStatus::Done)
            .collect(),
    };

    if records.is_empty() {
        println!("{} Nothing to send.", style("ℹ").blue());
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.webhook.timeout_secs))
        .build()?;
    let include_image = config.webhook.include_image && !args.no_image;

    let mut failed = 0;
    for record in &records {
        let payload = build_payload(record, include_image);

        match deliver(&client, &url, &payload).await {
            Ok(()) => println!(
                "  {} {} {}",
                style("✓").green(),
                short_id(&record.id),
                record.file_name
            ),
            Err(e) => {
                warn!("Webhook delivery failed for {}: {}", record.id, e);
                println!(
                    "  {} {} {}: {}",
                    style("✗").red(),
                    short_id(&record.id),
                    record.file_name,
                    e
                );
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} deliveries failed", failed, records.len());
    }

    println!(
        "{} Sent {} receipts",
        style("✓").green(),
        records.len()
    );

    Ok(())
}

fn build_payload(record: &ReceiptRecord, include_image: bool) -> WebhookPayload {
    let payload = WebhookPayload::from_record(record);

    let Some(path) = record.image_path.as_deref().filter(|_| include_image) else {
        return payload;
    };

    match fs::read(path) {
        Ok(bytes) => payload.with_image(STANDARD.encode(bytes), mime_type_for(path)),
        Err(e) => {
            warn!("Could not read image {}: {}", path.display(), e);
            payload
        }
    }
}

async fn deliver(client: &reqwest::Client, url: &str, payload: &WebhookPayload) -> anyhow::Result<()> {
    let response = client.post(url).json(payload).send().await?;
    let status = response.status();
    debug!("Webhook responded {} for {}", status, payload.id);

    if !status.is_success() {
        anyhow::bail!("HTTP {}", status);
    }

    Ok(())
}
