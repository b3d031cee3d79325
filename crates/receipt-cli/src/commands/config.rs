//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use receipt_core::models::config::ReceiptConfig;

use super::Context;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "deduction.threshold")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs, ctx: &Context) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init(init_args) => init_config(init_args, ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Path => show_path(ctx),
    }
}

fn load_or_default(ctx: &Context) -> anyhow::Result<ReceiptConfig> {
    let config_path = ctx.config_path();

    if config_path.exists() {
        Ok(ReceiptConfig::from_file(&config_path)?)
    } else {
        Ok(ReceiptConfig::default())
    }
}

fn show_config(ctx: &Context) -> anyhow::Result<()> {
    if !ctx.config_path().exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = load_or_default(ctx)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, ctx: &Context) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| ctx.config_path());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    ReceiptConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> anyhow::Result<()> {
    let config = load_or_default(ctx)?;

    // Convert config to JSON for key lookup
    let json = serde_json::to_value(&config)?;

    let mut current = &json;
    for part in key.split('.') {
        current = current.get(part).ok_or_else(|| {
            anyhow::anyhow!("Configuration key not found: {}", key)
        })?;
    }

    println!("{}", serde_json::to_string_pretty(current)?);

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> anyhow::Result<()> {
    let config_path = ctx.config_path();
    let config = load_or_default(ctx)?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Plain words such as URLs are stored as strings
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;

    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        anyhow::bail!("Empty configuration key");
    };

    let mut current = &mut json;
    for part in parents {
        current = current.get_mut(*part).ok_or_else(|| {
            anyhow::anyhow!("Configuration path not found: {}", key)
        })?;
    }

    match current.as_object_mut() {
        Some(obj) if obj.contains_key(*last) => {
            obj.insert((*last).to_string(), parsed_value.clone());
        }
        Some(_) => anyhow::bail!("Configuration key not found: {}", key),
        None => anyhow::bail!("Cannot set value at non-object path"),
    }

    // Round-trip through the typed config to reject ill-typed values
    let config: ReceiptConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config.save(&config_path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn show_path(ctx: &Context) -> anyhow::Result<()> {
    let config_path = ctx.config_path();

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'receipt config init' to create a configuration file.");
    }

    Ok(())
}
