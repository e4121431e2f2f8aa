//! ticketdesk CLI - ticket tracking backend
//!
//! - `serve` runs the HTTP API against a libSQL, SQLite or in-memory store
//! - `tickets` creates, lists, updates and deletes tickets on a running server

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::{serve::ServeArgs, tickets::TicketsArgs};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "ticketdesk",
    author,
    version,
    about = "Minimal ticket-tracking backend over a remote SQL table"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Work with tickets on a running server
    Tickets(TicketsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up DATABASE_URL / DATABASE_AUTH_TOKEN from ./.env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Tickets(args) => commands::run_tickets(args).await?,
    }

    Ok(())
}
