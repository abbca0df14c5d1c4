//! Step events emitted while a match runs

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;
use crate::message::{Question, Reply};

/// One observable occurrence during a match
///
/// `Winner`, `Draw` and `Error` are terminal: exactly one of them ends the
/// stream, everything before it is non-terminal and in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Question sent to a bot
    Question(Question),
    /// Reply received from a bot
    Reply(Reply),
    /// Informational message from the game
    Message(String),
    /// Bot at `index` won
    Winner { index: usize, name: String },
    /// Nobody won
    Draw,
    /// Match aborted
    Error(ArenaError),
}

impl Step {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Winner { .. } | Step::Draw | Step::Error(_))
    }

    /// Final outcome carried by a terminal step
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Step::Winner { index, name } => Some(Outcome::Winner {
                index: *index,
                name: name.clone(),
            }),
            Step::Draw => Some(Outcome::Draw),
            Step::Error(err) => Some(Outcome::Error(err.clone())),
            _ => None,
        }
    }

    /// Render as the `{type, data}` record used by drivers
    pub fn to_record(&self) -> StepRecord {
        match self {
            Step::Question(question) => StepRecord::Question(question.clone()),
            Step::Reply(reply) => StepRecord::Reply(reply.clone()),
            Step::Message(message) => StepRecord::Message(message.clone()),
            Step::Winner { name, .. } => StepRecord::Winner(name.clone()),
            Step::Draw => StepRecord::Draw,
            Step::Error(err) => StepRecord::Error(err.to_string()),
        }
    }
}

/// How a match ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Winner { index: usize, name: String },
    Draw,
    Error(ArenaError),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

/// Driver-facing step record: `{"type": "...", "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum StepRecord {
    Question(Question),
    Reply(Reply),
    Message(String),
    Error(String),
    /// Winning bot's name
    Winner(String),
    Draw,
    /// Final board rendering, appended by drivers after the match
    AsciiOutput(String),
}
