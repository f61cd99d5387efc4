//! Solvers for the 3×3 sliding-tile puzzle.
//!
//! A [`Puzzle`] is one arrangement of eight numbered tiles and a blank. The
//! [`search`] module explores the graph of arrangements reachable by sliding
//! tiles into the blank, using breadth-first, depth-first or A* search, and
//! returns the route as a [`Path`].
//!
//! ```
//! use eight_puzzle::{Heuristic, Puzzle, SearchStrategy, search::AStar};
//!
//! let start: Puzzle = "1,2,3\n4,0,6\n7,5,8".parse().unwrap();
//! let goal = Puzzle::solved();
//!
//! let mut astar = AStar::new(Heuristic::TotalDisplacement);
//! let path = astar.find_path(&start, &goal).into_path().unwrap();
//! assert_eq!(path.move_count(), 2);
//! ```

pub mod config;
pub mod error;
pub mod heuristic;
pub mod loader;
pub mod puzzle;
pub mod search;

pub use error::{Error, Result};
pub use heuristic::Heuristic;
pub use puzzle::{Move, Puzzle};
pub use search::{Path, SearchLimits, SearchOutcome, SearchStrategy, Strategy};
