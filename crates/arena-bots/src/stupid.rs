//! In-process bot driven by a fixed strategy

use arena_core::{Action, Question, Reply, Result};
use arena_engine::{Bot, Strategy};
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::debug;

/// Name stupid bots introduce themselves with
const STUPID_NAME: &str = "stupid";

/// Bot answering in-process with a non-learning strategy
///
/// Owns its random source, seeded explicitly by whoever builds it.
pub struct StupidBot {
    path: String,
    name: String,
    strategy: Arc<dyn Strategy>,
    rng: StdRng,
}

impl StupidBot {
    /// `path` is the game name the strategy plays
    pub fn new(path: &str, strategy: Arc<dyn Strategy>, seed: u64) -> Self {
        Self {
            path: path.to_string(),
            name: format!("stupid://{}", path),
            strategy,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait]
impl Bot for StupidBot {
    async fn send_message(&mut self, question: &Question) -> Result<Reply> {
        match question.action {
            Action::Init => Ok(Reply {
                name: Some(STUPID_NAME.to_string()),
                player_index: question.player_index,
                ..Default::default()
            }),
            Action::PlayTurn => {
                let play = self.strategy.play(question, &mut self.rng)?;
                debug!("{} plays {}", self.name, play);
                Ok(Reply::play(play, question.player_index))
            }
        }
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn name(&self) -> &str {
        &self.name
    }
}
