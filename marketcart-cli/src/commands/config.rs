//! Config command - inspect configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use marketcart_store::{CartConfig, default_config_dir};
use std::path::Path;

use super::storage_path;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration and storage paths.
    Path,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli, config: &CartConfig, config_path: &Path) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, config),
        ConfigAction::Path => show_paths(cli, config, config_path),
    }
}

fn show_config(cli: &Cli, config: &CartConfig) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            println!("MarketCart Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Storage key:  {}", config.storage_key);
            println!("Storage file: {}", storage_path(cli, config).display());
            println!("Log level:    {}", config.log_level);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(config)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli, config: &CartConfig, config_path: &Path) -> Result<()> {
    let config_dir = default_config_dir();
    let storage = storage_path(cli, config);

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:   {}", config_dir.display());
            println!("Config file:  {}", config_path.display());
            println!("Storage file: {}", storage.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "config_file": config_path.display().to_string(),
                "storage_file": storage.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}
