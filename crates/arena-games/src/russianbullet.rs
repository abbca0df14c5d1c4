//! Russian roulette with a six-chamber revolver and a single bullet
//!
//! Bots take turns with the revolver. Each turn they either `pull` the
//! trigger, which fires the current chamber and advances the cylinder, or
//! `spin` the cylinder to a random chamber first. Whoever fires the bullet
//! loses.

use arena_core::{ArenaError, Question, Result, Step};
use arena_engine::{Bot, Game, PIECES, Seats, StepSink, Strategy};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

pub const NAME: &str = "russianbullet";

const CHAMBERS: usize = 6;
const MAX_TURNS: usize = 100;

/// Russian roulette game
pub struct Russianbullet {
    seats: Seats,
    rng: StdRng,
    bullet: usize,
    chamber: usize,
    pulls: usize,
    fired: bool,
}

impl Russianbullet {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let bullet = rng.random_range(0..CHAMBERS);
        Self {
            seats: Seats::new(),
            rng,
            bullet,
            chamber: 0,
            pulls: 0,
            fired: false,
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({ "chambers": CHAMBERS, "pulls": self.pulls })
    }

    /// Fire the current chamber; true on a bang
    fn pull(&mut self) -> bool {
        self.pulls += 1;
        if self.chamber == self.bullet {
            self.fired = true;
            return true;
        }
        self.chamber = (self.chamber + 1) % CHAMBERS;
        false
    }

    fn spin(&mut self) {
        self.chamber = self.rng.random_range(0..CHAMBERS);
        debug!("Cylinder spun");
    }
}

#[async_trait]
impl Game for Russianbullet {
    fn name(&self) -> &str {
        NAME
    }

    fn register_bot(&mut self, bot: Box<dyn Bot>) {
        self.seats.register(bot);
    }

    async fn run(&mut self, match_id: &str, steps: &mut StepSink) -> Result<()> {
        self.seats.ensure_ready(self.required_bots())?;
        self.seats.init(NAME, match_id, &PIECES).await?;

        for turn in 0..MAX_TURNS {
            let index = turn % self.seats.len();
            let question =
                Question::play_turn(match_id, NAME, self.snapshot(), PIECES[index], index);
            let reply = self.seats.ask(index, question, steps).await?;

            match reply.play.as_str() {
                Some("pull") => {}
                Some("spin") => self.spin(),
                _ => {
                    return Err(ArenaError::RuleViolation(format!(
                        "expected \"pull\" or \"spin\", got {}",
                        reply.play
                    )));
                }
            }

            if self.pull() {
                steps.emit(Step::Message("bang".into()));
                self.seats.declare_winner((index + 1) % self.seats.len(), steps);
                return Ok(());
            }
            steps.emit(Step::Message("click".into()));
        }

        self.seats.declare_draw(steps);
        Ok(())
    }

    fn ascii_output(&self) -> String {
        if self.pulls == 0 {
            return String::new();
        }
        let state = if self.fired { "bang" } else { "click" };
        format!("{} pulls, last one went {}\n", self.pulls, state)
    }
}

/// Always pulls the trigger
pub struct StupidRussianbullet;

impl Strategy for StupidRussianbullet {
    fn play(&self, question: &Question, _rng: &mut StdRng) -> Result<serde_json::Value> {
        if !question.board.is_object() {
            return Err(ArenaError::Transport("russianbullet board is not an object".into()));
        }
        Ok(serde_json::json!("pull"))
    }
}
