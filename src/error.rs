//! Error types for the eight-puzzle crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the eight-puzzle crate
///
/// Failing to find a path is not an error; see [`crate::search::SearchOutcome`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("malformed puzzle: expected {expected} cells, got {got}")]
    WrongCellCount { expected: usize, got: usize },

    #[error("malformed puzzle: invalid tile symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("malformed puzzle: tile '{symbol}' appears {count} times (expected exactly once)")]
    DuplicateSymbol { symbol: char, count: usize },

    #[error("malformed puzzle: no blank ('0') cell")]
    MissingBlank,

    #[error(
        "unknown heuristic '{0}' (expected 'misplaced-tile-count' or 'total-displacement')"
    )]
    InvalidHeuristicSelector(String),

    #[error("unknown strategy '{0}' (expected one of: bfs, dfs, astar1, astar2)")]
    InvalidStrategySelector(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for eight-puzzle operations
pub type Result<T> = std::result::Result<T, Error>;
