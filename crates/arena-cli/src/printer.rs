//! Step consumers used by the drivers

use arena_core::{Step, StepRecord};
use arena_engine::StepConsumer;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::warn;

/// One terminal line per step
pub fn format_step(step: &Step) -> String {
    match step {
        Step::Question(question) => format!(
            "bot-{} << {}",
            question.player_index,
            to_json(question)
        ),
        Step::Reply(reply) => format!("bot-{} >> {}", reply.player_index, to_json(reply)),
        Step::Message(message) => format!("message: {}", message),
        Step::Winner { name, .. } => format!("winner: {}", name),
        Step::Draw => "draw".to_string(),
        Step::Error(err) => format!("error: {}", err),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}

/// Writes every step as a line to `out`
pub struct LinePrinter<W> {
    out: W,
}

impl<W: Write + Send + 'static> LinePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> StepConsumer for LinePrinter<W> {
    fn consume(&mut self, step: &Step) {
        if let Err(e) = writeln!(self.out, "{}", format_step(step)) {
            warn!("Failed to print step: {}", e);
        }
    }
}

/// Accumulates `{type, data}` records for a JSON document
#[derive(Debug, Default)]
pub struct RecordCollector {
    records: Vec<StepRecord>,
}

impl RecordCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Close the document with the final board rendering
    pub fn into_document(mut self, ascii_output: String) -> RunDocument {
        self.records.push(StepRecord::AsciiOutput(ascii_output));
        RunDocument {
            steps: self.records,
        }
    }
}

impl StepConsumer for RecordCollector {
    fn consume(&mut self, step: &Step) {
        self.records.push(step.to_record());
    }
}

/// Result document of one match: `{"steps": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDocument {
    pub steps: Vec<StepRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{ArenaError, Question, Reply};
    use serde_json::json;

    #[test]
    fn test_lines() {
        let question = Question::play_turn("gameid", "tictactoe", json!({"0-0": ""}), "O", 1);
        assert_eq!(
            format_step(&Step::Question(question)),
            r#"bot-1 << {"game-id":"gameid","game":"tictactoe","action":"play-turn","board":{"0-0":""},"you":"O","player-index":1}"#
        );
        assert_eq!(
            format_step(&Step::Reply(Reply::play("0-0", 1))),
            r#"bot-1 >> {"play":"0-0","player-index":1}"#
        );
        assert_eq!(format_step(&Step::Message("click".into())), "message: click");
        assert_eq!(
            format_step(&Step::Winner {
                index: 0,
                name: "stupid://tictactoe".into()
            }),
            "winner: stupid://tictactoe"
        );
        assert_eq!(format_step(&Step::Draw), "draw");
        assert_eq!(
            format_step(&Step::Error(ArenaError::Transport("down".into()))),
            "error: transport error: down"
        );
    }

    #[test]
    fn test_printer_writes_lines() {
        let mut printer = LinePrinter::new(Vec::new());
        printer.consume(&Step::Message("click".into()));
        printer.consume(&Step::Draw);
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out, "message: click\ndraw\n");
    }

    #[test]
    fn test_document_ends_with_ascii_output() {
        let mut collector = RecordCollector::new();
        collector.consume(&Step::Message("bang".into()));
        collector.consume(&Step::Winner {
            index: 1,
            name: "stupid://russianbullet".into(),
        });
        assert_eq!(collector.records().len(), 2);

        let document = collector.into_document("1 pulls\n".into());
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({"steps": [
                {"type": "message", "data": "bang"},
                {"type": "winner", "data": "stupid://russianbullet"},
                {"type": "ascii-output", "data": "1 pulls\n"},
            ]})
        );
    }
}
