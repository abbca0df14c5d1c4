//! # arena-engine
//!
//! Turn-based orchestration engine for bot matches.
//!
//! This crate provides:
//! - `Bot` trait implemented by every transport
//! - `Game` trait implemented by every rule set, plus the shared board turn loop
//! - `StepSink` and `run_match` for streaming steps to a consumer
//! - Registries resolving game names and bot addresses
//! - `Arena`, the facade drivers use to prepare and play a match

pub mod address;
pub mod arena;
pub mod board;
pub mod bot;
pub mod game;
pub mod orchestrator;
pub mod registry;
pub mod sink;

pub use address::BotAddress;
pub use arena::Arena;
pub use board::{BoardGame, BoardRules, PIECES};
pub use bot::{Bot, Strategy};
pub use game::{Game, Seats, Status};
pub use orchestrator::{MatchReport, StepConsumer, run_match};
pub use registry::{BotResolver, GameRegistry, StrategyRegistry};
pub use sink::StepSink;
