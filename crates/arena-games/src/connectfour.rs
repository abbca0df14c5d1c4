//! Connect four: 6 rows by 7 columns, pieces fall to the lowest free row
//!
//! The board travels as a row-major array of `"X" | "O" | ""` with row 0 at
//! the bottom. A move is a column number.

use arena_core::{ArenaError, Question, Result};
use arena_engine::{BoardRules, PIECES, Strategy};
use rand::Rng;
use rand::rngs::StdRng;

use crate::grid::line_owner;

pub const NAME: &str = "connectfour";

const ROWS: usize = 6;
const COLS: usize = 7;
const RUN: usize = 4;

/// Connect four rules
#[derive(Debug, Clone, Default)]
pub struct Connectfour {
    cells: [[Option<usize>; COLS]; ROWS],
}

impl Connectfour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowest free row of `column`, if the column is not full
    fn landing_row(&self, column: usize) -> Option<usize> {
        (0..ROWS).find(|&row| self.cells[row][column].is_none())
    }
}

fn symbol(cell: Option<usize>) -> &'static str {
    cell.and_then(|p| PIECES.get(p).copied()).unwrap_or("")
}

/// Column number from an integer or an integral float
fn column_of(play: &serde_json::Value) -> Option<usize> {
    if let Some(column) = play.as_u64() {
        return usize::try_from(column).ok();
    }
    let float = play.as_f64()?;
    (float >= 0.0 && float.fract() == 0.0 && float < COLS as f64).then_some(float as usize)
}

impl BoardRules for Connectfour {
    type Move = usize;

    fn name(&self) -> &'static str {
        NAME
    }

    fn max_turns(&self) -> usize {
        ROWS * COLS
    }

    fn snapshot(&self) -> serde_json::Value {
        let rows: Vec<Vec<&str>> = self
            .cells
            .iter()
            .map(|row| row.iter().map(|&c| symbol(c)).collect())
            .collect();
        serde_json::json!(rows)
    }

    fn decode(&self, play: &serde_json::Value) -> Result<usize> {
        let column = column_of(play)
            .filter(|&c| c < COLS)
            .ok_or_else(|| ArenaError::RuleViolation(format!("no such column {}", play)))?;

        if self.landing_row(column).is_none() {
            return Err(ArenaError::RuleViolation(format!("column {} is full", column)));
        }
        Ok(column)
    }

    fn apply(&mut self, column: usize, player: usize) -> Result<()> {
        if player >= PIECES.len() {
            return Err(ArenaError::Invariant(format!("no piece for player {}", player)));
        }
        let row = self
            .landing_row(column)
            .ok_or_else(|| ArenaError::Invariant(format!("column {} is full", column)))?;
        self.cells[row][column] = Some(player);
        Ok(())
    }

    fn winner(&self) -> Result<Option<usize>> {
        Ok(line_owner(&self.cells, RUN, PIECES.len()))
    }

    fn is_full(&self) -> bool {
        (0..COLS).all(|column| self.landing_row(column).is_none())
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for row in self.cells.iter().rev() {
            for &cell in row {
                out.push(' ');
                out.push_str(match symbol(cell) {
                    "" => ".",
                    s => s,
                });
            }
            out.push('\n');
        }
        for column in 0..COLS {
            out.push_str(&format!(" {}", column));
        }
        out.push('\n');
        out
    }
}

/// Drops a piece in a random column that still has room
pub struct StupidConnectfour;

impl Strategy for StupidConnectfour {
    fn play(&self, question: &Question, rng: &mut StdRng) -> Result<serde_json::Value> {
        let rows = question
            .board
            .as_array()
            .ok_or_else(|| ArenaError::Transport("connectfour board is not an array".into()))?;
        let top = rows
            .last()
            .and_then(|row| row.as_array())
            .ok_or_else(|| ArenaError::Transport("connectfour board has no rows".into()))?;

        let open: Vec<usize> = top
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.as_str() == Some(""))
            .map(|(column, _)| column)
            .collect();

        if open.is_empty() {
            return Err(ArenaError::Transport("every connectfour column is full".into()));
        }
        Ok(serde_json::json!(open[rng.random_range(0..open.len())]))
    }
}
