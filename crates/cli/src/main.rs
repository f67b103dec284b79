//! Pomelo CLI - drive a local cart/wishlist store from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in by setting the user (the session gate refuses adds without it)
//! export POMELO_USER=you@example.com
//!
//! # Add to the cart, supplying the catalog snapshot on the command line
//! pomelo cart add --id p1 --name "Pomelo" --price 3.50 --stock 12 --qty 2
//!
//! # Wishlist, quantity adjustments, badge counts
//! pomelo wishlist add --id p1 --name "Pomelo" --price 3.50 --stock 12
//! pomelo cart set-qty --id p1 --delta -1
//! pomelo count
//! ```
//!
//! # Commands
//!
//! - `cart add|remove|set-qty|list` - Cart operations
//! - `wishlist add|remove|list` - Wishlist operations
//! - `count` - Aggregate badge counts

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use pomelo_cart::store::FileStore;
use pomelo_cart::{CartService, SessionInfo, StaticSessionProvider};
use pomelo_core::{CurrencyCode, Price, ProductId, ProductSnapshot, UserId};

mod commands;
mod config;

use commands::{CliService, CommandError};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "pomelo")]
#[command(author, version, about = "Pomelo Market cart CLI")]
struct Cli {
    /// Data directory (overrides POMELO_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Show aggregate badge counts
    Count,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        #[command(flatten)]
        product: ProductArgs,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product id
        #[arg(long)]
        id: String,
    },
    /// Adjust a line's quantity by a signed delta
    SetQty {
        /// Catalog product id
        #[arg(long)]
        id: String,

        /// Signed quantity change (negative to decrement)
        #[arg(long, allow_hyphen_values = true)]
        delta: i64,
    },
    /// Show the cart
    List,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add a product to the wishlist
    Add {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Remove a product from the wishlist
    Remove {
        /// Catalog product id
        #[arg(long)]
        id: String,
    },
    /// Show the wishlist
    List,
}

/// Catalog snapshot supplied by the caller.
///
/// The engine never fetches catalog data; whatever is passed here is the
/// snapshot it validates against.
#[derive(Args)]
struct ProductArgs {
    /// Catalog product id
    #[arg(long)]
    id: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Unit price, e.g. 19.99
    #[arg(long)]
    price: Decimal,

    /// Available stock as of this snapshot
    #[arg(long)]
    stock: u32,

    /// Display image URL
    #[arg(long)]
    image: Option<String>,
}

impl ProductArgs {
    fn into_snapshot(self) -> Result<ProductSnapshot, CommandError> {
        Ok(ProductSnapshot {
            id: ProductId::new(self.id),
            name: self.name,
            price: Price::new(self.price, CurrencyCode::USD)?,
            image: self.image,
            stock_quantity: self.stock,
        })
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing with EnvFilter; default to info for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pomelo=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env(cli.data_dir);
    let service = build_service(&config)?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add { product, qty } => {
                commands::cart::add(&service, &product.into_snapshot()?, qty).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(&service, &id)?,
            CartAction::SetQty { id, delta } => commands::cart::set_qty(&service, &id, delta)?,
            CartAction::List => commands::cart::list(&service),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { product } => {
                commands::wishlist::add(&service, &product.into_snapshot()?).await?;
            }
            WishlistAction::Remove { id } => commands::wishlist::remove(&service, &id)?,
            WishlistAction::List => commands::wishlist::list(&service),
        },
        Commands::Count => commands::count::run(&service),
    }
    Ok(())
}

/// Build the service: file store in the data directory, session fixed from
/// `POMELO_USER` for the lifetime of the invocation.
fn build_service(config: &CliConfig) -> Result<CliService, pomelo_cart::StoreError> {
    let store = FileStore::open(&config.data_dir)?;
    let sessions = config.user.clone().map_or_else(
        StaticSessionProvider::anonymous,
        |email| {
            StaticSessionProvider::logged_in(SessionInfo {
                user_id: UserId::new(email.clone()),
                email: Some(email),
            })
        },
    );
    Ok(CartService::new(store, sessions))
}
