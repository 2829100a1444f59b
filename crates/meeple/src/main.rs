// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meeple - a board-game recommender chat.
//!
//! This is the binary entry point: it parses the command line, loads the
//! configuration and hands off to the selected command.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod history;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use meeple_config::MeepleConfig;

/// Meeple - a board-game recommender chat.
#[derive(Parser, Debug)]
#[command(name = "meeple", version, about, long_about = None)]
struct Cli {
    /// Load this TOML file instead of the standard config locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start the chat server (default).
    Serve,
    /// Print the stored conversation and every recommended game.
    History {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> MeepleConfig {
    let loaded = match path {
        Some(path) => meeple_config::load_and_validate_path(path),
        None => meeple_config::load_and_validate(),
    };

    match loaded {
        Ok(config) => config,
        Err(errors) => {
            meeple_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::History { plain } => history::run_history(&config, plain).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
