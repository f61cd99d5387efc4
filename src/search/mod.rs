//! Search strategies over the graph of puzzle arrangements.
//!
//! Every strategy starts from a fresh [`SearchTree`] per call, so one value
//! can be reused for any number of searches. The tree, frontier and visited
//! sets are dropped when the call returns; only the reconstructed [`Path`]
//! survives.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::heuristic::Heuristic;
use crate::puzzle::Puzzle;

pub mod astar;
pub mod breadth_first;
pub mod depth_first;
pub mod path;
pub mod tree;

pub use astar::AStar;
pub use breadth_first::BreadthFirst;
pub use depth_first::{DepthFirst, DepthFirstMode};
pub use path::Path;
pub use tree::{Node, NodeId, SearchTree};

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Path),
    NotFound,
    /// Strict depth-first search hit a puzzle whose successors were all
    /// visited and, never backtracking, could make no further progress.
    Stalled { at: Puzzle },
    LimitReached,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Found(_) => "found",
            SearchOutcome::NotFound => "not_found",
            SearchOutcome::Stalled { .. } => "stalled",
            SearchOutcome::LimitReached => "limit_reached",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop once this many successors have been generated.
    pub node_limit: Option<usize>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_node_limit(node_limit: usize) -> Self {
        Self {
            node_limit: Some(node_limit),
        }
    }

    pub(crate) fn exceeded(&self, nodes_expanded: usize) -> bool {
        self.node_limit.is_some_and(|limit| nodes_expanded >= limit)
    }
}

/// Common interface of the search algorithms.
pub trait SearchStrategy {
    fn find_path(&mut self, start: &Puzzle, goal: &Puzzle) -> SearchOutcome;

    /// Successors generated by the most recent [`find_path`](Self::find_path).
    fn nodes_expanded(&self) -> usize;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst(DepthFirstMode),
    AStar(Heuristic),
}

impl Strategy {
    pub fn searcher(&self, limits: SearchLimits) -> Box<dyn SearchStrategy> {
        match *self {
            Strategy::BreadthFirst => Box::new(BreadthFirst::with_limits(limits)),
            Strategy::DepthFirst(mode) => Box::new(DepthFirst::with_limits(mode, limits)),
            Strategy::AStar(heuristic) => Box::new(AStar::with_limits(heuristic, limits)),
        }
    }

    /// Runs one search and returns the outcome with the expanded-node count.
    pub fn solve(&self, start: &Puzzle, goal: &Puzzle, limits: SearchLimits) -> (SearchOutcome, usize) {
        let mut searcher = self.searcher(limits);
        let outcome = searcher.find_path(start, goal);
        (outcome, searcher.nodes_expanded())
    }

    pub fn with_depth_first_mode(self, mode: DepthFirstMode) -> Self {
        match self {
            Strategy::DepthFirst(_) => Strategy::DepthFirst(mode),
            other => other,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BreadthFirst => f.write_str("bfs"),
            Strategy::DepthFirst(_) => f.write_str("dfs"),
            Strategy::AStar(Heuristic::MisplacedTiles) => f.write_str("astar1"),
            Strategy::AStar(Heuristic::TotalDisplacement) => f.write_str("astar2"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bfs" => Ok(Strategy::BreadthFirst),
            "dfs" => Ok(Strategy::DepthFirst(DepthFirstMode::default())),
            "astar1" => Ok(Strategy::AStar(Heuristic::MisplacedTiles)),
            "astar2" => Ok(Strategy::AStar(Heuristic::TotalDisplacement)),
            other => Err(Error::InvalidStrategySelector(other.to_string())),
        }
    }
}
