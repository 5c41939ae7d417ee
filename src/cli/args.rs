use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(about = "An interactive shopping cart for the terminal")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file path (JSON)
    #[arg(short, long, global = true)]
    pub catalog: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive shopping session (default)
    Shop,
    /// Product catalog commands
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all products
    List,
    /// Show detailed information about a product
    Show {
        /// Product title
        title: String,
    },
    /// Search products by title
    Search {
        /// Search query
        query: String,
    },
}
