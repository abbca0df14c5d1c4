//! Messages exchanged between the engine and bots
//!
//! Both directions are JSON objects with kebab-case keys:
//! `{"game-id": "...", "game": "tictactoe", "action": "play-turn", ...}`.

use serde::{Deserialize, Serialize};

/// What the engine expects the bot to do with a question
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Handshake sent once per bot before the first turn
    Init,
    /// Pick a move for the attached board
    PlayTurn,
}

/// Message sent to a bot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Question {
    /// Match identifier
    pub game_id: String,
    /// Game name
    pub game: String,
    pub action: Action,
    /// Board snapshot, shape is game-specific (`null` during init)
    #[serde(default)]
    pub board: serde_json::Value,
    /// Piece assigned to the receiving bot
    pub you: String,
    /// Receiving bot's turn index
    pub player_index: usize,
}

impl Question {
    /// Handshake question, carries no board
    pub fn init(game_id: &str, game: &str, you: &str, player_index: usize) -> Self {
        Self {
            game_id: game_id.to_string(),
            game: game.to_string(),
            action: Action::Init,
            board: serde_json::Value::Null,
            you: you.to_string(),
            player_index,
        }
    }

    /// Turn question for the given board snapshot
    pub fn play_turn(
        game_id: &str,
        game: &str,
        board: serde_json::Value,
        you: &str,
        player_index: usize,
    ) -> Self {
        Self {
            game_id: game_id.to_string(),
            game: game.to_string(),
            action: Action::PlayTurn,
            board,
            you: you.to_string(),
            player_index,
        }
    }
}

/// Message received from a bot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Reply {
    /// Move payload, interpreted by the game
    #[serde(default)]
    pub play: serde_json::Value,
    /// Bot's turn index
    #[serde(default)]
    pub player_index: usize,
    /// Self-reported bot name (init handshake)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Reply {
    pub fn play(play: impl Into<serde_json::Value>, player_index: usize) -> Self {
        Self {
            play: play.into(),
            player_index,
            name: None,
        }
    }
}

/// Serialize a question to JSON bytes
pub fn serialize(question: &Question) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(question)
}

/// Deserialize a reply from JSON bytes
pub fn deserialize(bytes: &[u8]) -> Result<Reply, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_wire_format() {
        let question = Question::play_turn(
            "gameid",
            "tictactoe",
            serde_json::json!({"0-0": "X"}),
            "O",
            1,
        );
        let json = String::from_utf8(serialize(&question).unwrap()).unwrap();

        assert!(json.contains("\"game-id\":\"gameid\""));
        assert!(json.contains("\"action\":\"play-turn\""));
        assert!(json.contains("\"player-index\":1"));
        assert!(json.contains("\"you\":\"O\""));
    }

    #[test]
    fn test_init_has_null_board() {
        let question = Question::init("m1", "connectfour", "X", 0);
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["action"], "init");
        assert!(value["board"].is_null());
    }

    #[test]
    fn test_reply_from_bot() {
        // Exact JSON format a bot script would print
        let reply = deserialize(br#"{"play":"1-2","player-index":0}"#).unwrap();
        assert_eq!(reply.play, "1-2");
        assert_eq!(reply.player_index, 0);
        assert!(reply.name.is_none());
    }

    #[test]
    fn test_reply_defaults() {
        let reply = deserialize(br#"{"name":"deep-thought"}"#).unwrap();
        assert!(reply.play.is_null());
        assert_eq!(reply.player_index, 0);
        assert_eq!(reply.name.as_deref(), Some("deep-thought"));

        assert!(deserialize(b"not json").is_err());
    }
}
