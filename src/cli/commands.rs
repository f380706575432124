use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "marketfeed")]
#[command(about = "Swipe through second-hand products, save favourites and check out")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the product feed, one product at a time
    Browse {
        /// Only show products matching this text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// List saved products
    Saved,

    /// Remove a product from the saved list
    Unsave {
        /// Product ID
        id: String,
    },

    /// Show the cart and its total
    Cart,

    /// Move a saved product into the cart
    CartAdd {
        /// Product ID
        id: String,
    },

    /// Remove a product from the cart
    CartRemove {
        /// Product ID
        id: String,
    },

    /// Check out everything in the cart
    Checkout,
}
