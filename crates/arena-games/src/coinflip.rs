//! Coin flip: bot 0 calls the side, the arena tosses the coin
//!
//! Bot 0 wins on a correct call, bot 1 otherwise. Bot 1 is seated and
//! greeted but never asked to play.

use arena_core::{ArenaError, Question, Result, Step};
use arena_engine::{Bot, Game, Seats, StepSink, Strategy};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

pub const NAME: &str = "coinflip";

const PIECES: [&str; 2] = ["caller", "house"];

/// Side of the coin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Heads,
    Tails,
}

impl Side {
    fn random(rng: &mut StdRng) -> Self {
        if rng.random_bool(0.5) { Side::Heads } else { Side::Tails }
    }

    fn parse(play: &serde_json::Value) -> Result<Self> {
        match play.as_str() {
            Some("heads") => Ok(Side::Heads),
            Some("tails") => Ok(Side::Tails),
            _ => Err(ArenaError::RuleViolation(format!(
                "expected \"heads\" or \"tails\", got {}",
                play
            ))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Heads => f.write_str("heads"),
            Side::Tails => f.write_str("tails"),
        }
    }
}

/// Coin flip game
pub struct Coinflip {
    seats: Seats,
    rng: StdRng,
    call: Option<Side>,
    landed: Option<Side>,
}

impl Coinflip {
    pub fn new(seed: u64) -> Self {
        Self {
            seats: Seats::new(),
            rng: StdRng::seed_from_u64(seed),
            call: None,
            landed: None,
        }
    }
}

#[async_trait]
impl Game for Coinflip {
    fn name(&self) -> &str {
        NAME
    }

    fn register_bot(&mut self, bot: Box<dyn Bot>) {
        self.seats.register(bot);
    }

    async fn run(&mut self, match_id: &str, steps: &mut StepSink) -> Result<()> {
        self.seats.ensure_ready(self.required_bots())?;
        self.seats.init(NAME, match_id, &PIECES).await?;

        let question = Question::play_turn(match_id, NAME, serde_json::Value::Null, PIECES[0], 0);
        let reply = self.seats.ask(0, question, steps).await?;
        let call = Side::parse(&reply.play)?;
        self.call = Some(call);

        let landed = Side::random(&mut self.rng);
        self.landed = Some(landed);
        steps.emit(Step::Message(format!("coin landed on {}", landed)));

        let winner = if call == landed { 0 } else { 1 };
        self.seats.declare_winner(winner, steps);
        Ok(())
    }

    fn ascii_output(&self) -> String {
        match (self.call, self.landed) {
            (Some(call), Some(landed)) => format!("called {}, landed on {}\n", call, landed),
            _ => String::new(),
        }
    }
}

/// Calls heads or tails at random
pub struct StupidCoinflip;

impl Strategy for StupidCoinflip {
    fn play(&self, _question: &Question, rng: &mut StdRng) -> Result<serde_json::Value> {
        Ok(serde_json::json!(Side::random(rng).to_string()))
    }
}
