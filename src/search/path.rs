use std::fmt;

use crate::puzzle::{Move, Puzzle};
use crate::search::tree::{NodeId, SearchTree};

/// Route from the start puzzle to the goal, start first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    states: Vec<Puzzle>,
    moves: Vec<Move>,
}

impl Path {
    /// Follows parent links from `goal` back to the root and returns the
    /// route in forward order.
    pub fn reconstruct(tree: &SearchTree, goal: NodeId) -> Self {
        let mut states = Vec::new();
        let mut moves = Vec::new();

        for node in tree.ancestry(goal) {
            states.push(node.puzzle);
            if let Some(movement) = node.movement {
                moves.push(movement);
            }
        }

        states.reverse();
        moves.reverse();
        Self { states, moves }
    }

    pub fn states(&self) -> &[Puzzle] {
        &self.states
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn start(&self) -> Option<&Puzzle> {
        self.states.first()
    }

    pub fn goal(&self) -> Option<&Puzzle> {
        self.states.last()
    }

    /// True when consecutive puzzles are one legal move apart and the
    /// recorded moves describe those steps.
    pub fn is_connected(&self) -> bool {
        self.states.len() == self.moves.len() + 1
            && self
                .states
                .windows(2)
                .zip(&self.moves)
                .all(|(pair, movement)| pair[0].try_move(*movement) == Some(pair[1]))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in &self.states {
            write!(f, "{}", state)?;
            writeln!(f, "===")?;
        }
        Ok(())
    }
}
