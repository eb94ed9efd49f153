// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! MarketCart CLI - inspect and edit the persisted shopping cart.
//!
//! # Examples
//!
//! ```bash
//! # Show the cart
//! marketcart
//!
//! # Add a product (adding it again bumps the quantity)
//! marketcart add --id 42 --title "Coffee Mug" --image-url https://img/42.png --price 12.5
//!
//! # Change quantities
//! marketcart increment 42
//! marketcart decrement 42
//!
//! # JSON output against a scratch storage file
//! marketcart --storage /tmp/cart.json --format json --pretty
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use marketcart_store::{CartConfig, CartProvider};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{cart, config, open_store};

// ============================================================================
// CLI Definition
// ============================================================================

/// MarketCart CLI - persisted shopping cart.
#[derive(Parser)]
#[command(name = "marketcart")]
#[command(about = "Inspect and edit the persisted Marketplace cart")]
#[command(long_about = r#"
MarketCart reads and writes the shopping cart the Marketplace app keeps in
local storage. Every change rewrites the full cart snapshot.

Examples:
  marketcart                         # Show the cart
  marketcart add --id 42 --title Mug --image-url https://img/42.png --price 12.5
  marketcart increment 42            # One more of product 42
  marketcart decrement 42            # One fewer (never below 1)
  marketcart --format json           # JSON output
"#)]
#[command(version)]
#[command(author = "MarketCart Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'list' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Storage file to use instead of the configured one.
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Configuration file to use instead of the default one.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the cart (default if no command specified).
    #[command(visible_alias = "ls")]
    List,

    /// Add one unit of a product.
    #[command(visible_alias = "a")]
    Add(cart::AddArgs),

    /// Increase a line's quantity by one.
    #[command(visible_alias = "inc")]
    Increment {
        /// Product id.
        id: String,
    },

    /// Decrease a line's quantity by one, stopping at 1.
    #[command(visible_alias = "dec")]
    Decrement {
        /// Product id.
        id: String,
    },

    /// Remove every line from the cart.
    Clear,

    /// Inspect configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: &str) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("marketcart_core=debug,marketcart_store=debug,marketcart_cli=debug,info")
    } else {
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(CartConfig::default_path);
    let cart_config = match CartConfig::load_from(&config_path).await {
        Ok(config) => config,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    };

    setup_logging(cli.verbose, cli.quiet, &cart_config.log_level);

    let result = run(&cli, &cart_config, &config_path).await;

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}

/// Dispatches the selected command.
async fn run(cli: &Cli, cart_config: &CartConfig, config_path: &std::path::Path) -> Result<()> {
    if let Some(Commands::Config(args)) = &cli.command {
        return config::run(args, cli, cart_config, config_path);
    }

    let store = open_store(cli, cart_config).await;
    let provider = CartProvider::new(store);

    let result = provider
        .scope(async {
            match &cli.command {
                Some(Commands::Add(args)) => cart::add(args, cli).await,
                Some(Commands::Increment { id }) => cart::increment(id, cli).await,
                Some(Commands::Decrement { id }) => cart::decrement(id, cli).await,
                Some(Commands::Clear) => cart::clear(cli).await,
                Some(Commands::List | Commands::Config(_)) | None => cart::list(cli).await,
            }
        })
        .await;

    // Pending snapshot writes must land before the runtime shuts down.
    provider.store().flush().await;
    result
}
