//! Command-line interface wiring for the `movies` binary.
//!
//! Without a subcommand the interactive menu runs; `serve` starts the web
//! service instead.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moviedb::{AppContext, Config};

pub mod actions;
pub mod menu;
pub mod serve;
pub mod utils;

/// Parsed CLI entrypoint for the `movies` binary.
#[derive(Parser, Debug)]
#[command(name = "movies", version, about = "Personal movie catalog")]
pub struct Cli {
    /// SQLite database file (overrides MOVIES_DB).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive numbered menu (default).
    Menu,
    /// Serve the catalog page over HTTP.
    Serve(serve::ServeArgs),
}

/// Execute the requested command.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    let ctx = AppContext::new(config).context("failed to open the movie database")?;

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            let mut console = utils::Console::new(stdin.lock(), io::stdout());
            menu::run_menu(&ctx, &mut console).await
        }
        Command::Serve(args) => serve::handle(args, ctx).await,
    }
}
