//! Cost estimates between two arrangements.
//!
//! Both estimates are symmetric and never negative. A* uses them twice: once
//! against the goal for the remaining cost, and once between consecutive
//! puzzles as the cost of the move itself.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::puzzle::{Puzzle, BLANK, CELLS, SIDE};

/// The heuristics A* can be run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Cells whose symbols differ, blank cell included.
    MisplacedTiles,
    /// Sum of row and column distances of each numbered tile.
    TotalDisplacement,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::MisplacedTiles, Heuristic::TotalDisplacement];

    pub fn estimate(&self, state: &Puzzle, reference: &Puzzle) -> u32 {
        match self {
            Heuristic::MisplacedTiles => misplaced_tiles(state, reference),
            Heuristic::TotalDisplacement => total_displacement(state, reference),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::MisplacedTiles => "misplaced-tile-count",
            Heuristic::TotalDisplacement => "total-displacement",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "misplaced-tile-count" | "hamming" => Ok(Heuristic::MisplacedTiles),
            "total-displacement" | "manhattan" => Ok(Heuristic::TotalDisplacement),
            other => Err(Error::InvalidHeuristicSelector(other.to_string())),
        }
    }
}

/// Number of cells holding different symbols in the two puzzles.
///
/// The blank's cell counts like any other, so one move changes the estimate
/// by at most two.
pub fn misplaced_tiles(state: &Puzzle, reference: &Puzzle) -> u32 {
    state
        .cells()
        .iter()
        .zip(reference.cells())
        .filter(|(a, b)| a != b)
        .count() as u32
}

/// Sum over the eight numbered tiles of `|Δrow| + |Δcol|` between the two
/// puzzles. The blank contributes nothing.
pub fn total_displacement(state: &Puzzle, reference: &Puzzle) -> u32 {
    // Both position tables must be complete before any tile is scored.
    let from = positions(state);
    let to = positions(reference);

    (1..CELLS)
        .map(|tile| {
            let (r1, c1) = (from[tile] / SIDE, from[tile] % SIDE);
            let (r2, c2) = (to[tile] / SIDE, to[tile] % SIDE);
            (r1.abs_diff(r2) + c1.abs_diff(c2)) as u32
        })
        .sum()
}

/// Index of each symbol's cell, indexed by symbol.
fn positions(puzzle: &Puzzle) -> [usize; CELLS] {
    let mut table = [0usize; CELLS];
    for (index, &value) in puzzle.cells().iter().enumerate() {
        table[value as usize] = index;
    }
    debug_assert_eq!(puzzle.cells()[table[BLANK as usize]], BLANK);
    table
}
