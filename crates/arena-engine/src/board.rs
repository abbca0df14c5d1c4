//! Shared turn loop for board games
//!
//! Grid games differ only in their topology, move shape and win rule. Those
//! live behind `BoardRules`; `BoardGame` runs the loop:
//! handshake, then per turn ask the current bot, decode, apply, check.

use arena_core::{Question, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::bot::Bot;
use crate::game::{Game, Seats};
use crate::sink::StepSink;

/// Pieces in seat order: bot 0 plays `X`, bot 1 plays `O`
pub const PIECES: [&str; 2] = ["X", "O"];

/// Board topology, move decoding and win rule of a grid game
pub trait BoardRules: Send + 'static {
    /// Game-specific move, decoded from a reply's `play` payload
    type Move: Send;

    fn name(&self) -> &'static str;

    /// Upper bound on the number of turns
    fn max_turns(&self) -> usize;

    /// Serializable snapshot of the board sent with every question
    fn snapshot(&self) -> serde_json::Value;

    /// Interpret a `play` payload, rejecting anything that is not a legal move
    fn decode(&self, play: &serde_json::Value) -> Result<Self::Move>;

    /// Place `player`'s piece; exactly one cell changes
    fn apply(&mut self, mv: Self::Move, player: usize) -> Result<()>;

    /// Seat index of the player owning a complete line, if any
    fn winner(&self) -> Result<Option<usize>>;

    fn is_full(&self) -> bool;

    fn render(&self) -> String;
}

/// A `Game` built from a set of board rules
pub struct BoardGame<R: BoardRules> {
    rules: R,
    seats: Seats,
}

impl<R: BoardRules> BoardGame<R> {
    pub fn new(rules: R) -> Self {
        Self {
            rules,
            seats: Seats::new(),
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn seats(&self) -> &Seats {
        &self.seats
    }
}

#[async_trait]
impl<R: BoardRules> Game for BoardGame<R> {
    fn name(&self) -> &str {
        self.rules.name()
    }

    fn required_bots(&self) -> usize {
        PIECES.len()
    }

    fn register_bot(&mut self, bot: Box<dyn Bot>) {
        self.seats.register(bot);
    }

    async fn run(&mut self, match_id: &str, steps: &mut StepSink) -> Result<()> {
        self.seats.ensure_ready(PIECES.len())?;
        let name = self.rules.name();
        self.seats.init(name, match_id, &PIECES).await?;

        for turn in 0..self.rules.max_turns() {
            let index = turn % self.seats.len();
            let piece = PIECES[index];
            debug!("Turn {}: bot-{} plays {}", turn, index, piece);

            let question =
                Question::play_turn(match_id, name, self.rules.snapshot(), piece, index);
            let reply = self.seats.ask(index, question, steps).await?;

            let mv = self.rules.decode(&reply.play)?;
            self.rules.apply(mv, index)?;

            if let Some(winner) = self.rules.winner()? {
                self.seats.declare_winner(winner, steps);
                return Ok(());
            }
            if self.rules.is_full() {
                break;
            }
        }

        self.seats.declare_draw(steps);
        Ok(())
    }

    fn ascii_output(&self) -> String {
        self.rules.render()
    }
}
