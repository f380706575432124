use std::io;
use std::sync::Arc;

use clap::Parser;

use marketfeed::cli::{run_browse, Cli, Commands};
use marketfeed::config::Config;
use marketfeed::errors::{MarketError, MarketResult};
use marketfeed::feed::{ExclusionPolicy, FeedController};
use marketfeed::services::{CartService, SavedItemsSink, SavedService};
use marketfeed::sources::source_from_config;
use marketfeed::storage::sqlite::{SqliteCartRepository, SqliteSavedItemRepository, SqliteStorage};

#[tokio::main]
async fn main() {
    marketfeed::telemetry::init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> MarketResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize storage
    let storage = SqliteStorage::new(&config.db_path)?;

    match cli.command {
        Commands::Browse { query } => cmd_browse(&config, storage, query).await,
        Commands::Saved => cmd_saved(storage),
        Commands::Unsave { id } => cmd_unsave(storage, &id),
        Commands::Cart => cmd_cart(storage),
        Commands::CartAdd { id } => cmd_cart_add(storage, &id),
        Commands::CartRemove { id } => cmd_cart_remove(storage, &id),
        Commands::Checkout => cmd_checkout(storage),
    }
}

fn cart_service(storage: SqliteStorage) -> CartService<SqliteCartRepository> {
    CartService::new(SqliteCartRepository::new(storage))
}

async fn cmd_browse(config: &Config, storage: SqliteStorage, query: Option<String>) -> MarketResult<()> {
    let source = source_from_config(config)?;
    let sink = SavedItemsSink::new(SqliteSavedItemRepository::new(storage));
    let exclusion = ExclusionPolicy::new(&config.excluded_terms)?;
    let controller = FeedController::new(source, Arc::new(sink), exclusion);

    match &query {
        Some(q) => println!("Browsing products matching \"{}\"...", q),
        None => println!("Browsing products..."),
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let stats = run_browse(&controller, query, &mut input, &mut out).await?;

    println!();
    println!(
        "Viewed {} products: {} saved, {} skipped.",
        stats.viewed, stats.saved, stats.skipped
    );

    Ok(())
}

fn cmd_saved(storage: SqliteStorage) -> MarketResult<()> {
    let service = SavedService::new(SqliteSavedItemRepository::new(storage));
    let items = service.list()?;

    if items.is_empty() {
        println!("No saved products.");
        return Ok(());
    }

    println!("Saved products:\n");
    for item in items {
        println!("  {} [{}] ${:.2}", item.title, item.product_id, item.price);
        if let Some(image) = &item.image {
            println!("    Image: {}", image);
        }
    }

    Ok(())
}

fn cmd_unsave(storage: SqliteStorage, id: &str) -> MarketResult<()> {
    let service = SavedService::new(SqliteSavedItemRepository::new(storage));

    match service.remove(id) {
        Ok(()) => {
            println!("Removed {} from saved products.", id);
            Ok(())
        }
        Err(MarketError::NotFound(_)) => {
            println!("Product is not saved: {}", id);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn cmd_cart(storage: SqliteStorage) -> MarketResult<()> {
    let summary = cart_service(storage).summary()?;

    if summary.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    println!("Cart:\n");
    for item in &summary.items {
        println!("  {} [{}] ${:.2}", item.title, item.product_id, item.price);
    }
    println!("\nTotal: ${:.2}", summary.total);

    Ok(())
}

fn cmd_cart_add(storage: SqliteStorage, id: &str) -> MarketResult<()> {
    match cart_service(storage).add_from_saved(id) {
        Ok(item) => {
            println!("Added to cart: {}", item.title);
            Ok(())
        }
        Err(MarketError::NotFound(_)) => Err(MarketError::InvalidInput(format!(
            "Product {} is not in your saved list",
            id
        ))),
        Err(e) => Err(e),
    }
}

fn cmd_cart_remove(storage: SqliteStorage, id: &str) -> MarketResult<()> {
    cart_service(storage).remove(id)?;
    println!("Removed {} from cart.", id);
    Ok(())
}

fn cmd_checkout(storage: SqliteStorage) -> MarketResult<()> {
    let summary = cart_service(storage).checkout()?;

    println!("Order placed for {} products:", summary.items.len());
    for item in &summary.items {
        println!("  {} ${:.2}", item.title, item.price);
    }
    println!("Total: ${:.2}", summary.total);

    Ok(())
}
