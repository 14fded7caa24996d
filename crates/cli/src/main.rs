//! Threadline CLI - offline cart quotes, order tracking and backend checks.
//!
//! # Usage
//!
//! ```bash
//! # Price a cart described in YAML
//! tl-cli quote cart.yaml
//!
//! # Project an order status onto the tracking steps
//! tl-cli track SHIPPED --timeline timeline.yaml
//!
//! # Print the listing query for a filter selection
//! tl-cli filters --style Casual --color Red --rating 4
//!
//! # Fetch an order from the shop backend
//! THREADLINE_PASSWORD=... tl-cli order 77 -e shopper@example.com
//! ```
//!
//! # Commands
//!
//! - `quote` - Cart pricing breakdown
//! - `track` - Order progress projection
//! - `filters` - Listing query builder
//! - `order` - Fetch and track a live order

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tl-cli")]
#[command(author, version, about = "Threadline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a cart file (YAML list of line items)
    Quote {
        /// Path to the cart file
        file: String,
    },
    /// Show tracking steps for an order status
    Track {
        /// Order status (PENDING, PAID, PROCESSING, SHIPPED, DELIVERED, CANCELLED)
        status: String,

        /// YAML list of timeline entries used to detect cash on delivery
        #[arg(short, long)]
        timeline: Option<String>,

        /// Force cash-on-delivery timing
        #[arg(long, conflicts_with = "timeline")]
        cod: bool,
    },
    /// Print the backend listing query for a filter selection
    Filters(commands::filters::FilterArgs),
    /// Fetch an order from the shop backend and show its progress
    Order {
        /// Order id
        id: String,

        /// Shopper email; password is read from `THREADLINE_PASSWORD`
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Quote { file } => commands::quote::run(&file).await?,
        Commands::Track {
            status,
            timeline,
            cod,
        } => commands::track::run(&status, timeline.as_deref(), cod).await?,
        Commands::Filters(args) => commands::filters::run(&args)?,
        Commands::Order { id, email } => commands::order::run(&id, &email).await?,
    }
    Ok(())
}
