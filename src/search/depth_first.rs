use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::puzzle::Puzzle;
use crate::search::path::Path;
use crate::search::tree::SearchTree;
use crate::search::{SearchLimits, SearchOutcome, SearchStrategy};

/// What depth-first search does when the top of its stack has no unvisited
/// successor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthFirstMode {
    /// Pop the dead end and continue from the puzzle below it.
    #[default]
    Backtrack,
    /// Never pop. The top would be re-inspected forever without change, so
    /// the search ends with [`SearchOutcome::Stalled`] instead.
    Strict,
}

impl fmt::Display for DepthFirstMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthFirstMode::Backtrack => f.write_str("backtrack"),
            DepthFirstMode::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for DepthFirstMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "backtrack" => Ok(DepthFirstMode::Backtrack),
            "strict" => Ok(DepthFirstMode::Strict),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown depth-first mode '{other}' (expected 'backtrack' or 'strict')"
            ))),
        }
    }
}

/// Uninformed depth-first search.
///
/// Successors are tried in [`Move::ALL`](crate::puzzle::Move::ALL) order and
/// the first unvisited one is pushed immediately, so runs are reproducible.
/// Routes are valid but generally far from the shortest.
#[derive(Debug, Default)]
pub struct DepthFirst {
    mode: DepthFirstMode,
    limits: SearchLimits,
    nodes_expanded: usize,
}

impl DepthFirst {
    pub fn new(mode: DepthFirstMode) -> Self {
        Self::with_limits(mode, SearchLimits::default())
    }

    pub fn with_limits(mode: DepthFirstMode, limits: SearchLimits) -> Self {
        Self {
            mode,
            limits,
            nodes_expanded: 0,
        }
    }

    pub fn mode(&self) -> DepthFirstMode {
        self.mode
    }
}

impl SearchStrategy for DepthFirst {
    fn find_path(&mut self, start: &Puzzle, goal: &Puzzle) -> SearchOutcome {
        self.nodes_expanded = 0;
        debug!(strategy = self.name(), mode = %self.mode, ?start, ?goal, "search started");

        let (mut tree, root) = SearchTree::with_root(*start, 0);
        let mut visited = HashSet::from([start.key()]);
        let mut stack = vec![root];

        let outcome = loop {
            let Some(&top) = stack.last() else {
                break SearchOutcome::NotFound;
            };

            let puzzle = *tree.puzzle(top);
            if puzzle == *goal {
                break SearchOutcome::Found(Path::reconstruct(&tree, top));
            }

            if self.limits.exceeded(self.nodes_expanded) {
                break SearchOutcome::LimitReached;
            }

            let depth = tree.node(top).g;
            let mut advanced = false;
            for (movement, child) in puzzle.successors() {
                self.nodes_expanded += 1;
                if visited.insert(child.key()) {
                    stack.push(tree.insert_child(top, movement, child, depth + 1, 0));
                    advanced = true;
                    break;
                }
            }

            if !advanced {
                match self.mode {
                    DepthFirstMode::Backtrack => {
                        trace!(depth, "dead end, backtracking");
                        stack.pop();
                    }
                    DepthFirstMode::Strict => break SearchOutcome::Stalled { at: puzzle },
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
        "dfs"
    }
}
