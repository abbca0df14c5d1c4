//! Bot transport trait

use arena_core::{Question, Reply, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;

/// A bot reachable through some transport
///
/// Implementations are request/response: the turn loop awaits every call
/// before asking anything else, so a bot never sees two questions at once.
#[async_trait]
pub trait Bot: Send {
    /// Deliver a question and wait for the bot's reply
    async fn send_message(&mut self, question: &Question) -> Result<Reply>;

    /// Address minus scheme, for logging and identification
    fn path(&self) -> &str;

    /// Display name reported when the bot wins
    fn name(&self) -> &str;
}

/// Fixed, non-learning decision rule used by in-process bots
pub trait Strategy: Send + Sync {
    /// Pick the `play` payload for a turn question
    fn play(&self, question: &Question, rng: &mut StdRng) -> Result<serde_json::Value>;
}
