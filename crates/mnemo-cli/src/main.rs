//! mnemo CLI entry point.
//!
//! Parses CLI arguments, wires the session manager to its HTTP transport
//! and keychain store, then dispatches to the command handlers.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init().await?;

    let outcome = match cli.command {
        Commands::Login { username } => {
            cli::session::login(&state, username.as_deref(), cli.json).await
        }
        Commands::Logout => cli::session::logout(&state, cli.json).await,
        Commands::Remember { content } => {
            cli::memory::remember(&state, content.as_deref(), cli.json).await
        }
        Commands::Ask { question } => cli::chat::ask(&state, question.as_deref(), cli.json).await,
        Commands::Memories => cli::memory::list(&state, cli.json).await,
        Commands::Show { id } => cli::memory::show(&state, id, cli.json).await,
        Commands::Chat => cli::chat::run_chat_loop(&state).await,
        Commands::Status => cli::session::status(&state, cli.json).await,
    };

    // Discard anything still in flight before the process goes away.
    state.manager.close();
    outcome
}
