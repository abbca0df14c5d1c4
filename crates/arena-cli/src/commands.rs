//! `arena run` and `arena list-games`
//!
//! Both write their result to the given writer. `run_command` fails for a
//! missing or unknown game, a bad bot setup, and a match ending in an error
//! step; the binary turns any failure into a non-zero exit status.

use anyhow::{Result, bail};
use arena_core::Outcome;
use arena_engine::{Arena, run_match};
use std::io::Write;
use tracing::{debug, info};

use crate::MATCH_ID;
use crate::printer::{LinePrinter, RecordCollector};

/// Options of `arena run`
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub game: Option<String>,
    pub bots: Vec<String>,
    /// Print one `{"steps": [...]}` document instead of step lines
    pub json: bool,
    /// Fixed seed; drawn at random when absent
    pub seed: Option<u64>,
}

/// Play one match, streaming its steps to `out`, and hand `out` back
pub async fn run_command<W>(arena: &Arena, options: RunOptions, out: W) -> Result<W>
where
    W: Write + Send + 'static,
{
    let Some(game) = options.game else {
        bail!("You need to specify the game");
    };
    let seed = options.seed.unwrap_or_else(rand::random);
    debug!("Match seed {}", seed);

    let prepared = arena.prepare(&game, &options.bots, seed)?;

    let (outcome, out) = if options.json {
        let report = run_match(prepared, MATCH_ID, RecordCollector::new()).await?;
        let document = report.consumer.into_document(report.game.ascii_output());
        let mut out = out;
        writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        (report.outcome, out)
    } else {
        let report = run_match(prepared, MATCH_ID, LinePrinter::new(out)).await?;
        let mut out = report.consumer.into_inner();
        write!(out, "{}", report.game.ascii_output())?;
        (report.outcome, out)
    };

    match outcome {
        Outcome::Error(e) => bail!("match ended with an error: {}", e),
        Outcome::Winner { index, name } => info!("bot-{} ({}) won", index, name),
        Outcome::Draw => info!("Draw"),
    }
    Ok(out)
}

/// `Games:` followed by one `- <name>` line per game
pub fn list_games(arena: &Arena, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Games:")?;
    for name in arena.games().names() {
        writeln!(out, "- {}", name)?;
    }
    Ok(())
}
