//! Error types for the arena

use thiserror::Error;

/// Result type for arena operations
pub type Result<T> = std::result::Result<T, ArenaError>;

/// Arena error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArenaError {
    /// No game registered under this name
    #[error("unknown game {0:?}")]
    UnknownGame(String),

    /// No transport registered for this scheme
    #[error("invalid bot scheme: {scheme:?} ({path:?})")]
    UnknownScheme { scheme: String, path: String },

    /// No stupid strategy for this game
    #[error("unknown stupid strategy {0:?}")]
    UnknownStrategy(String),

    /// Bot address is not `<scheme>://<path>`
    #[error("invalid bot path {0:?}")]
    MalformedAddress(String),

    /// Wrong number of bots for the game
    #[error("you need to specify {expected} bots, got {got}")]
    ArgCount { expected: usize, got: usize },

    /// Bot unreachable, failed, or answered with a non-success status
    #[error("transport error: {0}")]
    Transport(String),

    /// Message could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Reply decoded but names an illegal move
    #[error("rule violation: {0}")]
    RuleViolation(String),

    /// Internal state is inconsistent
    #[error("invariant failure: {0}")]
    Invariant(String),
}

/// Coarse classification used by drivers to decide how to surface an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Detected before the match starts
    Configuration,
    /// Bot communication failed
    Transport,
    /// Bot asked for an illegal move
    RuleViolation,
    /// Engine bug or corrupted state
    Invariant,
}

impl ArenaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArenaError::UnknownGame(_)
            | ArenaError::UnknownScheme { .. }
            | ArenaError::UnknownStrategy(_)
            | ArenaError::MalformedAddress(_)
            | ArenaError::ArgCount { .. } => ErrorKind::Configuration,
            ArenaError::Transport(_) | ArenaError::Serialization(_) => ErrorKind::Transport,
            ArenaError::RuleViolation(_) => ErrorKind::RuleViolation,
            ArenaError::Invariant(_) => ErrorKind::Invariant,
        }
    }

    /// True for errors raised while preparing a match
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

impl From<serde_json::Error> for ArenaError {
    fn from(err: serde_json::Error) -> Self {
        ArenaError::Serialization(err.to_string())
    }
}
