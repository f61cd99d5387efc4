use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};

use crate::puzzle::Puzzle;
use crate::search::path::Path;
use crate::search::tree::SearchTree;
use crate::search::{SearchLimits, SearchOutcome, SearchStrategy};

/// Uninformed breadth-first search.
///
/// Puzzles are marked visited when they are enqueued, so none is queued
/// twice and the first route to the goal uses the fewest moves.
#[derive(Debug, Default)]
pub struct BreadthFirst {
    limits: SearchLimits,
    nodes_expanded: usize,
}

impl BreadthFirst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        Self {
            limits,
            nodes_expanded: 0,
        }
    }
}

impl SearchStrategy for BreadthFirst {
    fn find_path(&mut self, start: &Puzzle, goal: &Puzzle) -> SearchOutcome {
        self.nodes_expanded = 0;
        debug!(strategy = self.name(), ?start, ?goal, "search started");

        let (mut tree, root) = SearchTree::with_root(*start, 0);
        let mut visited = HashSet::from([start.key()]);
        let mut queue = VecDeque::from([root]);

        let outcome = loop {
            let Some(current) = queue.pop_front() else {
                break SearchOutcome::NotFound;
            };

            if tree.puzzle(current) == goal {
                break SearchOutcome::Found(Path::reconstruct(&tree, current));
            }

            if self.limits.exceeded(self.nodes_expanded) {
                break SearchOutcome::LimitReached;
            }

            let depth = tree.node(current).g;
            let puzzle = *tree.puzzle(current);
            for (movement, child) in puzzle.successors() {
                self.nodes_expanded += 1;
                if visited.insert(child.key()) {
                    let id = tree.insert_child(current, movement, child, depth + 1, 0);
                    queue.push_back(id);
                }
            }
        };

        info!(
            strategy = self.name(),
            outcome = outcome.label(),
            nodes_expanded = self.nodes_expanded,
            moves = outcome.path().map(Path::move_count),
            "search finished"
        );
        outcome
    }

    fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    fn name(&self) -> &'static str {
        "bfs"
    }
}
