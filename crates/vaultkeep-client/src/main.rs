//! The `vault` command-line interface.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

#[tokio::main]
async fn main() {
    // Quiet by default; RUST_LOG opts into client-side tracing.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = commands::Cli::parse().execute().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
