//! Match orchestration: run a game and stream its steps to a consumer
//!
//! The game's turn loop runs on one task and the consumer on another; they
//! only talk through the step channel. `run_match` returns after the
//! consumer has processed the terminal step, not merely after it was emitted.

use arena_core::{ArenaError, Outcome, Result, Step};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::game::Game;
use crate::sink::StepSink;

/// Receives every step of a match, in emission order
pub trait StepConsumer: Send + 'static {
    fn consume(&mut self, step: &Step);
}

impl StepConsumer for Vec<Step> {
    fn consume(&mut self, step: &Step) {
        self.push(step.clone());
    }
}

/// Everything a driver needs once a match is over
pub struct MatchReport<C> {
    /// How the match ended
    pub outcome: Outcome,
    /// The game, for its final ASCII rendering
    pub game: Box<dyn Game>,
    /// The consumer, with whatever it accumulated
    pub consumer: C,
    /// Number of steps delivered to the consumer
    pub steps: usize,
}

/// Play `game` to completion, feeding every step to `consumer`
pub async fn run_match<C: StepConsumer>(
    game: Box<dyn Game>,
    match_id: impl Into<String>,
    consumer: C,
) -> Result<MatchReport<C>> {
    let match_id = match_id.into();
    let (mut sink, mut rx) = StepSink::channel();
    let (done_tx, done_rx) = oneshot::channel();

    info!("Starting match {} ({})", match_id, game.name());

    // Consumer task: drain until the terminal step, then signal completion
    let consumer_task = tokio::spawn(async move {
        let mut consumer = consumer;
        let mut outcome = None;
        let mut count = 0;

        while let Some(step) = rx.recv().await {
            count += 1;
            consumer.consume(&step);
            if let Some(terminal) = step.outcome() {
                outcome = Some(terminal);
                break;
            }
        }

        if done_tx.send((consumer, outcome, count)).is_err() {
            debug!("Match driver stopped waiting for the step consumer");
        }
    });

    // Turn-loop task: owns the game for the duration of the match
    let game_task = tokio::spawn(async move {
        let mut game = game;
        // A panicking game still owes the consumer its terminal step
        let result = AssertUnwindSafe(game.run(&match_id, &mut sink))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(ArenaError::Invariant(format!(
                    "game panicked: {}",
                    panic_message(panic.as_ref())
                )))
            });
        if let Err(e) = &result {
            error!("Run error: {}", e);
        }
        sink.finish(result);
        game
    });

    let game = game_task
        .await
        .map_err(|e| ArenaError::Invariant(format!("game task failed: {}", e)))?;

    // The consumer task ends right after signalling, or by panicking
    if let Err(e) = consumer_task.await {
        warn!("Step consumer task failed: {}", e);
    }
    let (consumer, outcome, steps) = done_rx
        .await
        .map_err(|_| ArenaError::Invariant("step consumer exited without finishing".into()))?;

    let outcome = outcome
        .ok_or_else(|| ArenaError::Invariant("step stream closed without a terminal step".into()))?;
    info!("Match finished after {} steps: {:?}", steps, outcome);

    Ok(MatchReport {
        outcome,
        game,
        consumer,
        steps,
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardGame;
    use crate::bot::Bot;
    use crate::game::testing::{CallLog, ScriptedBot};
    use arena_core::{Question, Reply};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Minimal rules: 3 cells, no winner ever
    struct Line3 {
        cells: [Option<usize>; 3],
    }

    impl crate::board::BoardRules for Line3 {
        type Move = usize;
        fn name(&self) -> &'static str {
            "line3"
        }
        fn max_turns(&self) -> usize {
            3
        }
        fn snapshot(&self) -> serde_json::Value {
            json!(self.cells)
        }
        fn decode(&self, play: &serde_json::Value) -> Result<usize> {
            play.as_u64()
                .map(|c| c as usize)
                .filter(|c| *c < 3 && self.cells[*c].is_none())
                .ok_or_else(|| ArenaError::RuleViolation(format!("bad cell {}", play)))
        }
        fn apply(&mut self, mv: usize, player: usize) -> Result<()> {
            self.cells[mv] = Some(player);
            Ok(())
        }
        fn winner(&self) -> Result<Option<usize>> {
            Ok(None)
        }
        fn is_full(&self) -> bool {
            self.cells.iter().all(Option::is_some)
        }
        fn render(&self) -> String {
            String::new()
        }
    }

    fn line3(plays: [Vec<Result<serde_json::Value>>; 2]) -> Box<dyn Game> {
        let log = CallLog::default();
        let mut game = BoardGame::new(Line3 { cells: [None; 3] });
        let [first, second] = plays;
        game.register_bot(Box::new(ScriptedBot::new(0, first, log.clone())));
        game.register_bot(Box::new(ScriptedBot::new(1, second, log)));
        Box::new(game)
    }

    #[tokio::test]
    async fn test_draw_stream() {
        let game = line3([vec![Ok(json!(0)), Ok(json!(2))], vec![Ok(json!(1))]]);
        let report = run_match(game, "m1", Vec::new()).await.unwrap();

        assert_eq!(report.outcome, Outcome::Draw);
        assert_eq!(report.steps, 7);
        assert_eq!(report.consumer.len(), 7);
        assert_eq!(report.consumer.last(), Some(&Step::Draw));
        assert_eq!(
            report.consumer.iter().filter(|s| s.is_terminal()).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_transport_failure_mid_match() {
        // bot 1 fails on its first play-turn
        let game = line3([
            vec![Ok(json!(0))],
            vec![Err(ArenaError::Transport("HTTP 500".into()))],
        ]);
        let report = run_match(game, "m2", Vec::new()).await.unwrap();

        let steps = report.consumer;
        assert_eq!(steps.len(), 4);
        assert!(matches!(steps[0], Step::Question(_)));
        assert!(matches!(steps[1], Step::Reply(_)));
        assert!(matches!(steps[2], Step::Question(_)));
        assert_eq!(steps[3], Step::Error(ArenaError::Transport("HTTP 500".into())));
        assert!(report.outcome.is_error());
    }

    #[tokio::test]
    async fn test_consumer_sees_everything_before_return() {
        struct Slow {
            seen: Arc<Mutex<Vec<Step>>>,
        }

        impl StepConsumer for Slow {
            fn consume(&mut self, step: &Step) {
                std::thread::sleep(std::time::Duration::from_millis(5));
                self.seen.lock().unwrap().push(step.clone());
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let game = line3([vec![Ok(json!(0)), Ok(json!(2))], vec![Ok(json!(1))]]);
        run_match(game, "m3", Slow { seen: seen.clone() })
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 7);
        assert_eq!(seen.last(), Some(&Step::Draw));
    }

    #[tokio::test]
    async fn test_game_without_terminal_step() {
        struct Lazy;

        #[async_trait]
        impl Game for Lazy {
            fn name(&self) -> &str {
                "lazy"
            }
            fn register_bot(&mut self, _bot: Box<dyn Bot>) {}
            async fn run(&mut self, _match_id: &str, steps: &mut StepSink) -> Result<()> {
                steps.emit(Step::Message("thinking".into()));
                Ok(())
            }
            fn ascii_output(&self) -> String {
                String::new()
            }
        }

        let report = run_match(Box::new(Lazy), "m4", Vec::new()).await.unwrap();
        assert_eq!(report.steps, 2);
        assert!(matches!(
            report.outcome,
            Outcome::Error(ArenaError::Invariant(_))
        ));
    }

    #[tokio::test]
    async fn test_panicking_game_still_ends_the_stream() {
        struct Fragile;

        #[async_trait]
        impl Game for Fragile {
            fn name(&self) -> &str {
                "fragile"
            }
            fn register_bot(&mut self, _bot: Box<dyn Bot>) {}
            async fn run(&mut self, _match_id: &str, steps: &mut StepSink) -> Result<()> {
                steps.emit(Step::Message("before".into()));
                let cells: Vec<usize> = Vec::new();
                let _ = cells[0];
                Ok(())
            }
            fn ascii_output(&self) -> String {
                "fragile board".into()
            }
        }

        let report = run_match(Box::new(Fragile), "m6", Vec::new()).await.unwrap();
        assert_eq!(report.steps, 2);
        assert_eq!(report.consumer[0], Step::Message("before".into()));
        match &report.consumer[1] {
            Step::Error(ArenaError::Invariant(msg)) => {
                assert!(msg.contains("game panicked"), "{}", msg);
                assert!(msg.contains("index out of bounds"), "{}", msg);
            }
            other => panic!("Expected an invariant error, got {:?}", other),
        }
        assert!(report.outcome.is_error());
        assert_eq!(report.game.ascii_output(), "fragile board");
    }

    #[tokio::test]
    async fn test_panicking_consumer() {
        struct Grumpy;

        impl StepConsumer for Grumpy {
            fn consume(&mut self, step: &Step) {
                if matches!(step, Step::Reply(_)) {
                    panic!("replies are not welcome");
                }
            }
        }

        let game = line3([vec![Ok(json!(0)), Ok(json!(2))], vec![Ok(json!(1))]]);
        match run_match(game, "m7", Grumpy).await {
            Err(ArenaError::Invariant(msg)) => assert!(msg.contains("step consumer"), "{}", msg),
            Ok(_) => panic!("Expected an invariant error"),
            Err(other) => panic!("Expected an invariant error, got {:?}", other),
        }
    }

    #[test]
    fn test_blocking_driver() {
        // Drivers without a runtime of their own can block on a match
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let game = line3([vec![Ok(json!(0)), Ok(json!(2))], vec![Ok(json!(1))]]);
        let report = runtime
            .block_on(run_match(game, "m5", Vec::new()))
            .unwrap();
        assert_eq!(report.outcome, Outcome::Draw);

        // Bots are plain trait objects; an init-only exchange works too
        let mut bot = ScriptedBot::new(0, vec![], CallLog::default());
        let reply: Reply = tokio_test::block_on(bot.send_message(&Question::init("m", "g", "X", 0)))
            .unwrap();
        assert!(reply.play.is_null());
    }
}
