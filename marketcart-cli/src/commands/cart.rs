//! Cart commands - list and mutate the persisted cart.

use anyhow::Result;
use clap::Args;
use marketcart_core::ProductInput;
use marketcart_store::use_cart;
use tracing::info;

use crate::output::{JsonFormatter, MutationOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the add command.
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Product id.
    #[arg(long)]
    pub id: String,

    /// Display name.
    #[arg(long)]
    pub title: String,

    /// Product image URL.
    #[arg(long)]
    pub image_url: String,

    /// Unit price.
    #[arg(long, value_parser = parse_price)]
    pub price: f64,
}

/// Parses a price, refusing NaN and infinities.
fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if price.is_finite() {
        Ok(price)
    } else {
        Err("price must be a finite number".to_string())
    }
}

impl From<&AddArgs> for ProductInput {
    fn from(args: &AddArgs) -> Self {
        ProductInput::new(
            args.id.clone(),
            args.title.clone(),
            args.image_url.clone(),
            args.price,
        )
    }
}

/// Prints the cart.
pub async fn list(cli: &Cli) -> Result<()> {
    let products = use_cart()?.products().await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_cart(&products));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_cart(&products)?);
        }
    }

    Ok(())
}

/// Adds one unit of a product.
pub async fn add(args: &AddArgs, cli: &Cli) -> Result<()> {
    let quantity = use_cart()?.add_to_cart(ProductInput::from(args)).await?;
    info!(id = %args.id, quantity, "Product added");

    print_mutation(cli, &MutationOutput::new("add", &args.id, true, Some(quantity)))
}

/// Increments a line.
pub async fn increment(id: &str, cli: &Cli) -> Result<()> {
    let cart = use_cart()?;
    let changed = cart.increment(id).await;
    let quantity = cart.products().await.get(id).map(|e| e.quantity);

    print_mutation(cli, &MutationOutput::new("increment", id, changed, quantity))
}

/// Decrements a line.
pub async fn decrement(id: &str, cli: &Cli) -> Result<()> {
    let cart = use_cart()?;
    let changed = cart.decrement(id).await;
    let quantity = cart.products().await.get(id).map(|e| e.quantity);

    print_mutation(cli, &MutationOutput::new("decrement", id, changed, quantity))
}

/// Empties the cart.
pub async fn clear(cli: &Cli) -> Result<()> {
    let cart = use_cart()?;
    cart.clear().await;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("Cart cleared");
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&serde_json::json!({ "cleared": true }))?);
        }
    }

    Ok(())
}

fn print_mutation(cli: &Cli, outcome: &MutationOutput) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                let formatter = TextFormatter::new(!cli.no_color);
                println!("{}", formatter.format_mutation(outcome));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(outcome)?);
        }
    }
    Ok(())
}
