//! Gold Sabertooth CLI - Catalog queries and a persisted shopping cart.
//!
//! # Usage
//!
//! ```bash
//! # First page of playmats and stickers
//! gst products --tag Playmats --tag Stickers
//!
//! # One product
//! gst product sabertooth-playmat
//!
//! # Drive the cart saved under $GOLDSABERTOOTH_DATA_DIR
//! gst cart add gid://shopify/ProductVariant/1 -q 2
//! gst cart update gid://shopify/CartLine/l1 3
//! gst cart show
//! ```
//!
//! # Commands
//!
//! - `products` - List products, optionally filtered by tag
//! - `product` - Show a product by handle
//! - `cart` - Inspect or change the persisted cart
//!
//! Output is JSON on stdout. Logs go to stderr (`RUST_LOG`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gst")]
#[command(author, version, about = "Gold Sabertooth storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, newest first
    Products {
        /// Only products carrying this tag (repeatable, any tag matches)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Cursor from a previous page's `end_cursor`
        #[arg(long)]
        after: Option<String>,

        /// Page size
        #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(i64).range(1..=250))]
        first: i64,
    },
    /// Show one product
    Product {
        /// Product handle (URL slug)
        handle: String,
    },
    /// Inspect or change the persisted cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Products { tags, after, first } => {
            commands::catalog::list(&tags, after.as_deref(), first).await?;
        }
        Commands::Product { handle } => commands::catalog::show(&handle).await?,
        Commands::Cart { action } => commands::cart::run(action).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_products_collects_repeated_tags() {
        let cli = Cli::try_parse_from([
            "gst", "products", "--tag", "Playmats", "-t", "Stickers", "--first", "24",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::Products { tags, after, first } = cli.command else {
            panic!("expected products command");
        };
        assert_eq!(tags, vec!["Playmats", "Stickers"]);
        assert_eq!(after, None);
        assert_eq!(first, 24);
    }

    #[test]
    fn test_products_rejects_oversized_page() {
        assert!(Cli::try_parse_from(["gst", "products", "--first", "251"]).is_err());
        assert!(Cli::try_parse_from(["gst", "products", "--first", "0"]).is_err());
    }
}
