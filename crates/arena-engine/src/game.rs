//! Game trait and the bots-based game helper

use arena_core::{ArenaError, Question, Reply, Result, Step};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::bot::Bot;
use crate::sink::StepSink;

/// Trait for implementing turn-based games
///
/// Implement this trait to make a rule set playable by the arena.
#[async_trait]
pub trait Game: Send {
    /// Stable identifier, also used to resolve `stupid://<name>`
    fn name(&self) -> &str;

    /// Number of bots the game needs
    fn required_bots(&self) -> usize {
        2
    }

    /// Validate the bot paths before any bot is constructed
    fn check_args(&self, bot_paths: &[String]) -> Result<()> {
        let expected = self.required_bots();
        if bot_paths.len() != expected {
            return Err(ArenaError::ArgCount {
                expected,
                got: bot_paths.len(),
            });
        }
        Ok(())
    }

    /// Append a bot; bot `i` plays piece `i`
    fn register_bot(&mut self, bot: Box<dyn Bot>);

    /// Play the match to completion, emitting steps into `steps`
    async fn run(&mut self, match_id: &str, steps: &mut StepSink) -> Result<()>;

    /// Human-readable rendering of the board, empty if there is nothing to draw
    fn ascii_output(&self) -> String;
}

/// Terminal status of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won(usize),
    Draw,
}

/// Ordered bot list shared by every bots-based game
///
/// Owns the bots, the terminal status, and the question/reply plumbing that
/// turns every exchange into `Question` and `Reply` steps.
pub struct Seats {
    bots: Vec<Box<dyn Bot>>,
    status: Status,
}

impl Default for Seats {
    fn default() -> Self {
        Self::new()
    }
}

impl Seats {
    pub fn new() -> Self {
        Self {
            bots: Vec::new(),
            status: Status::Playing,
        }
    }

    pub fn register(&mut self, bot: Box<dyn Bot>) {
        debug!("Seat {} -> {}", self.bots.len(), bot.name());
        self.bots.push(bot);
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Display name of the bot in seat `index`
    pub fn name(&self, index: usize) -> &str {
        self.bots.get(index).map(|bot| bot.name()).unwrap_or("unknown")
    }

    /// Fail unless exactly `required` bots are seated and the game is not over
    pub fn ensure_ready(&self, required: usize) -> Result<()> {
        if self.status != Status::Playing {
            return Err(ArenaError::Invariant("game is already over".into()));
        }
        if self.bots.len() != required {
            return Err(ArenaError::Invariant(format!(
                "{} bots registered, game needs {}",
                self.bots.len(),
                required
            )));
        }
        Ok(())
    }

    /// Send the init handshake to every bot, in seat order
    pub async fn init(&mut self, game: &str, match_id: &str, pieces: &[&str]) -> Result<()> {
        for (index, bot) in self.bots.iter_mut().enumerate() {
            let you = pieces.get(index).copied().unwrap_or_default();
            let reply = bot
                .send_message(&Question::init(match_id, game, you, index))
                .await?;
            match reply.name {
                Some(name) => info!("bot-{} ({}) introduced itself as {:?}", index, bot.path(), name),
                None => info!("bot-{} ({}) is ready", index, bot.path()),
            }
        }
        Ok(())
    }

    /// Ask the bot in seat `index`, emitting the question and reply steps
    pub async fn ask(
        &mut self,
        index: usize,
        question: Question,
        steps: &mut StepSink,
    ) -> Result<Reply> {
        let bot = self
            .bots
            .get_mut(index)
            .ok_or_else(|| ArenaError::Invariant(format!("no bot in seat {}", index)))?;

        debug!("bot-{} << {:?}", index, question.action);
        steps.emit(Step::Question(question.clone()));

        let mut reply = bot.send_message(&question).await?;
        if reply.player_index != index {
            if reply.player_index != 0 {
                warn!(
                    "bot-{} replied with player-index {}, correcting",
                    index, reply.player_index
                );
            }
            reply.player_index = index;
        }

        debug!("bot-{} >> {}", index, reply.play);
        steps.emit(Step::Reply(reply.clone()));
        Ok(reply)
    }

    /// Record and announce a winner
    pub fn declare_winner(&mut self, index: usize, steps: &mut StepSink) {
        let name = self.name(index).to_string();
        info!("Player {} ({}) won", index, name);
        self.status = Status::Won(index);
        steps.emit(Step::Winner { index, name });
    }

    /// Record and announce a draw
    pub fn declare_draw(&mut self, steps: &mut StepSink) {
        info!("Draw");
        self.status = Status::Draw;
        steps.emit(Step::Draw);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted bots for engine tests

    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Call log shared between scripted bots: (seat, question)
    pub type CallLog = Arc<Mutex<Vec<(usize, Question)>>>;

    /// Bot answering play-turn questions from a fixed script
    pub struct ScriptedBot {
        pub seat: usize,
        pub name: String,
        pub plays: VecDeque<Result<serde_json::Value>>,
        pub log: CallLog,
    }

    impl ScriptedBot {
        pub fn new(seat: usize, plays: Vec<Result<serde_json::Value>>, log: CallLog) -> Self {
            Self {
                seat,
                name: format!("scripted://{}", seat),
                plays: plays.into(),
                log,
            }
        }
    }

    #[async_trait]
    impl Bot for ScriptedBot {
        async fn send_message(&mut self, question: &Question) -> Result<Reply> {
            self.log.lock().unwrap().push((self.seat, question.clone()));
            if question.action == arena_core::Action::Init {
                return Ok(Reply::default());
            }
            let play = self
                .plays
                .pop_front()
                .unwrap_or_else(|| Err(ArenaError::Transport("script exhausted".into())))?;
            Ok(Reply::play(play, self.seat))
        }

        fn path(&self) -> &str {
            &self.name["scripted://".len()..]
        }

        fn name(&self) -> &str {
            &self.name
        }
    }
}
