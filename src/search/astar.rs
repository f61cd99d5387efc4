use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, info, trace};

use crate::error::Result;
use crate::heuristic::Heuristic;
use crate::puzzle::{Puzzle, StateKey};
use crate::search::path::Path;
use crate::search::tree::{NodeId, SearchTree};
use crate::search::{SearchLimits, SearchOutcome, SearchStrategy};

#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry {
    f: u32,
    seq: u64,
    node: NodeId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of tree nodes. A puzzle may be queued more than once;
/// entries superseded by a cheaper one are skipped when popped.
#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    fn push(&mut self, f: u32, node: NodeId) {
        self.heap.push(FrontierEntry {
            f,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }
}

/// Heuristic-guided best-first search.
///
/// The cost of a move is the heuristic applied between the two consecutive
/// puzzles, and the remaining cost is the heuristic applied against the goal.
#[derive(Debug)]
pub struct AStar {
    heuristic: Heuristic,
    limits: SearchLimits,
    nodes_expanded: usize,
}

impl AStar {
    pub fn new(heuristic: Heuristic) -> Self {
        Self::with_limits(heuristic, SearchLimits::default())
    }

    pub fn with_limits(heuristic: Heuristic, limits: SearchLimits) -> Self {
        Self {
            heuristic,
            limits,
            nodes_expanded: 0,
        }
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Resolves `heuristic` by name and searches with it.
    ///
    /// An unknown name is rejected before any search work happens; the
    /// configured heuristic is left unchanged in that case.
    pub fn find_path_by_name(
        &mut self,
        start: &Puzzle,
        goal: &Puzzle,
        heuristic: &str,
    ) -> Result<SearchOutcome> {
        self.heuristic = heuristic.parse()?;
        Ok(self.find_path(start, goal))
    }
}

impl SearchStrategy for AStar {
    fn find_path(&mut self, start: &Puzzle, goal: &Puzzle) -> SearchOutcome {
        self.nodes_expanded = 0;
        let heuristic = self.heuristic;
        debug!(strategy = self.name(), %heuristic, ?start, ?goal, "search started");

        let (mut tree, root) = SearchTree::with_root(*start, heuristic.estimate(start, goal));
        let mut frontier = Frontier::default();
        // Lowest f ever recorded per puzzle, queued or expanded.
        let mut recorded: HashMap<StateKey, u32> = HashMap::from([(start.key(), tree.node(root).f)]);
        let mut closed: HashSet<StateKey> = HashSet::new();
        frontier.push(tree.node(root).f, root);

        let outcome = loop {
            let Some(entry) = frontier.pop() else {
                break SearchOutcome::NotFound;
            };

            let current = *tree.puzzle(entry.node);
            let key = current.key();
            if recorded.get(&key).is_some_and(|&best| entry.f > best) {
                trace!(f = entry.f, "skipping stale frontier entry");
                continue;
            }

            if current == *goal {
                break SearchOutcome::Found(Path::reconstruct(&tree, entry.node));
            }

            if self.limits.exceeded(self.nodes_expanded) {
                break SearchOutcome::LimitReached;
            }

            closed.insert(key);
            let g = tree.node(entry.node).g;

            for (movement, child) in current.successors() {
                self.nodes_expanded += 1;

                let tentative_g = g + heuristic.estimate(&child, &current);
                let h = heuristic.estimate(&child, goal);
                let tentative_f = tentative_g + h;
                let child_key = child.key();

                match recorded.entry(child_key) {
                    Entry::Occupied(mut best) => {
                        // Settled or already queued at an equal or lower cost.
                        if tentative_f >= *best.get() {
                            continue;
                        }
                        best.insert(tentative_f);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(tentative_f);
                    }
                }

                if closed.contains(&child_key) {
                    trace!(f = tentative_f, "reopening expanded puzzle");
                }
                let id = tree.insert_child(entry.node, movement, child, tentative_g, h);
                frontier.push(tentative_f, id);
            }
        };

        info!(
            strategy = self.name(),
            %heuristic,
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
        "astar"
    }
}
