//! Producer half of the step stream

use arena_core::{ArenaError, Result, Step};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Producer half of the step stream handed to `Game::run`
///
/// The sink closes itself after the first terminal step: the sender is
/// dropped, so the consumer sees end-of-stream right after it.
pub struct StepSink {
    tx: Option<mpsc::UnboundedSender<Step>>,
    emitted: usize,
}

impl StepSink {
    /// Create a sink and the receiver it feeds
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Step>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx: Some(tx),
                emitted: 0,
            },
            rx,
        )
    }

    /// Push a step; returns false once the stream is closed
    pub fn emit(&mut self, step: Step) -> bool {
        let Some(tx) = &self.tx else {
            warn!("Dropping step emitted after terminal step: {:?}", step);
            return false;
        };

        let terminal = step.is_terminal();
        if tx.send(step).is_err() {
            debug!("Step consumer is gone");
        }
        self.emitted += 1;

        if terminal {
            self.tx = None;
        }
        true
    }

    /// Whether a terminal step has been emitted
    pub fn is_closed(&self) -> bool {
        self.tx.is_none()
    }

    /// Number of steps emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Close the stream with the result of `Game::run`
    ///
    /// An error becomes the terminal `Error` step. A game that returned
    /// without reaching a terminal step is an invariant failure.
    pub fn finish(mut self, result: Result<()>) {
        if self.is_closed() {
            if let Err(err) = result {
                warn!("Game failed after its terminal step: {}", err);
            }
            return;
        }

        let err = match result {
            Err(err) => err,
            Ok(()) => ArenaError::Invariant("game returned without a winner or a draw".into()),
        };
        self.emit(Step::Error(err));
    }
}
