//! Tic-tac-toe on a 3×3 board
//!
//! The board travels as a keyed map `"y-x" -> "X" | "O" | ""` and a move is
//! the key of a free cell.

use arena_core::{ArenaError, Question, Result};
use arena_engine::{BoardRules, PIECES, Strategy};
use rand::rngs::StdRng;
use std::collections::BTreeMap;

use crate::grid::line_owner;

pub const NAME: &str = "tictactoe";

const SIZE: usize = 3;

/// Tic-tac-toe rules
#[derive(Debug, Clone, Default)]
pub struct Tictactoe {
    cells: [[Option<usize>; SIZE]; SIZE],
}

/// Cell coordinates, row first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub y: usize,
    pub x: usize,
}

fn key(y: usize, x: usize) -> String {
    format!("{}-{}", y, x)
}

fn symbol(cell: Option<usize>) -> &'static str {
    cell.and_then(|p| PIECES.get(p).copied()).unwrap_or("")
}

impl Tictactoe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardRules for Tictactoe {
    type Move = Cell;

    fn name(&self) -> &'static str {
        NAME
    }

    fn max_turns(&self) -> usize {
        SIZE * SIZE
    }

    fn snapshot(&self) -> serde_json::Value {
        let board: BTreeMap<String, &str> = (0..SIZE)
            .flat_map(|y| (0..SIZE).map(move |x| (y, x)))
            .map(|(y, x)| (key(y, x), symbol(self.cells[y][x])))
            .collect();
        serde_json::json!(board)
    }

    fn decode(&self, play: &serde_json::Value) -> Result<Cell> {
        let raw = play
            .as_str()
            .ok_or_else(|| ArenaError::RuleViolation(format!("expected a \"y-x\" cell, got {}", play)))?;

        let (y, x) = raw
            .split_once('-')
            .and_then(|(y, x)| Some((y.parse::<usize>().ok()?, x.parse::<usize>().ok()?)))
            .filter(|&(y, x)| y < SIZE && x < SIZE && key(y, x) == raw)
            .ok_or_else(|| ArenaError::RuleViolation(format!("no such cell {:?}", raw)))?;

        if self.cells[y][x].is_some() {
            return Err(ArenaError::RuleViolation(format!("cell {} is already taken", raw)));
        }
        Ok(Cell { y, x })
    }

    fn apply(&mut self, mv: Cell, player: usize) -> Result<()> {
        if player >= PIECES.len() {
            return Err(ArenaError::Invariant(format!("no piece for player {}", player)));
        }
        self.cells[mv.y][mv.x] = Some(player);
        Ok(())
    }

    fn winner(&self) -> Result<Option<usize>> {
        Ok(line_owner(&self.cells, SIZE, PIECES.len()))
    }

    fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    fn render(&self) -> String {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&c| match symbol(c) {
                        "" => " ",
                        s => s,
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect();
        let mut out = rows.join("\n-+-+-\n");
        out.push('\n');
        out
    }
}

/// Plays the first free cell in reading order
pub struct StupidTictactoe;

impl Strategy for StupidTictactoe {
    fn play(&self, question: &Question, _rng: &mut StdRng) -> Result<serde_json::Value> {
        let board = question
            .board
            .as_object()
            .ok_or_else(|| ArenaError::Transport("tictactoe board is not a map".into()))?;

        for y in 0..SIZE {
            for x in 0..SIZE {
                let cell = key(y, x);
                if board.get(&cell).and_then(|v| v.as_str()) == Some("") {
                    return Ok(serde_json::json!(cell));
                }
            }
        }
        Err(ArenaError::Transport("no free cell on the tictactoe board".into()))
    }
}
