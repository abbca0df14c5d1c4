//! Bot Arena
//!
//! Pits bots against each other in turn-based games:
//! - `arena run <game> <bot>...` plays one match and prints its steps
//! - `arena list-games` lists the available games
//! - `arena server` exposes the same over HTTP

use anyhow::Result;
use arena_cli::{RunOptions, ServerConfig, default_arena, list_games, run_command, serve};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Colosseum for bots
#[derive(Parser, Debug)]
#[command(name = "arena")]
#[command(about = "Turn-based matches between bots", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a battle
    Run {
        /// Game to play
        game: Option<String>,

        /// Bot addresses, e.g. `stupid`, `file:///path/to/bot`, `http+get://host/bot`
        bots: Vec<String>,

        /// Print the steps as one JSON document
        #[arg(long)]
        json: bool,

        /// Seed for every random source of the match
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List games
    ListGames,

    /// Start the HTTP server
    Server {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "9000")]
        port: u16,
    },
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries match output, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Run {
            game,
            bots,
            json,
            seed,
        } => {
            let options = RunOptions {
                game,
                bots,
                json,
                seed,
            };
            run_command(&default_arena(), options, std::io::stdout()).await?;
            Ok(())
        }
        Command::ListGames => {
            list_games(&default_arena(), &mut std::io::stdout())?;
            Ok(())
        }
        Command::Server { host, port } => {
            info!("Bot arena server starting...");
            serve(ServerConfig { host, port }, Arc::new(default_arena())).await
        }
    }
}
