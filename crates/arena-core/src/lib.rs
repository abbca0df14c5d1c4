//! # arena-core
//!
//! Core types for the bot arena protocol.
//!
//! This crate provides the foundational types shared by every arena crate:
//! - Question and Reply messages exchanged with bots
//! - Step events describing a match as it unfolds
//! - Step records rendered by drivers
//! - The arena error taxonomy

pub mod error;
pub mod message;
pub mod step;

pub use error::{ArenaError, ErrorKind, Result};
pub use message::{Action, Question, Reply};
pub use step::{Outcome, Step, StepRecord};
