//! Drivers for the bot arena
//!
//! The `arena` binary is a thin shell over this library:
//! - `commands`: the `run` and `list-games` subcommands
//! - `defaults`: the arena with every built-in game and transport
//! - `printer`: step consumers for the terminal and for JSON documents
//! - `server`: the HTTP driver
//! - `config`: driver configuration

pub mod commands;
pub mod config;
pub mod defaults;
pub mod printer;
pub mod server;

pub use commands::{RunOptions, list_games, run_command};
pub use config::ServerConfig;
pub use defaults::{default_arena, default_arena_with};
pub use printer::{LinePrinter, RecordCollector, RunDocument};
pub use server::{router, serve};

/// Match id used for every match started by a driver
pub const MATCH_ID: &str = "gameid";
