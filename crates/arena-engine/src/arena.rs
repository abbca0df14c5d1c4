//! Arena facade used by drivers

use arena_core::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info};

use crate::game::Game;
use crate::orchestrator::{MatchReport, StepConsumer, run_match};
use crate::registry::{BotResolver, GameRegistry};

/// Game registry and bot resolver bundled for drivers
pub struct Arena {
    games: GameRegistry,
    bots: BotResolver,
}

impl Arena {
    pub fn new(games: GameRegistry, bots: BotResolver) -> Self {
        Self { games, bots }
    }

    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    pub fn bots(&self) -> &BotResolver {
        &self.bots
    }

    /// Build a game with all its bots registered, ready to run
    ///
    /// Every failure here is a configuration error: nothing has been sent
    /// to any bot yet. All bot paths are resolved so every bad one is
    /// logged; the first error is returned.
    pub fn prepare(&self, game_name: &str, bot_paths: &[String], seed: u64) -> Result<Box<dyn Game>> {
        // One seed fans out to the game and every bot
        let mut rng = StdRng::seed_from_u64(seed);

        info!("Initializing game {:?}", game_name);
        let mut game = self.games.create(game_name, rng.random())?;
        game.check_args(bot_paths)?;

        let mut first_error = None;
        for path in bot_paths {
            match self.bots.resolve(path, game.name(), rng.random()) {
                Ok(bot) => {
                    info!("Registering bot {:?}", bot.path());
                    game.register_bot(bot);
                }
                Err(e) => {
                    error!("Failed to initialize bot {:?}: {}", path, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(game),
        }
    }

    /// Prepare and play a match in one go
    pub async fn play<C: StepConsumer>(
        &self,
        game_name: &str,
        bot_paths: &[String],
        seed: u64,
        match_id: &str,
        consumer: C,
    ) -> Result<MatchReport<C>> {
        let game = self.prepare(game_name, bot_paths, seed)?;
        run_match(game, match_id, consumer).await
    }
}
