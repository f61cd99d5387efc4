//! Reading puzzle definitions from disk.
//!
//! A definition is three lines of three comma-separated symbols, `0` being
//! the blank:
//!
//! ```text
//! 1,2,3
//! 4,0,6
//! 7,5,8
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::puzzle::Puzzle;

/// Reads and validates one puzzle definition.
pub fn load_puzzle(path: impl AsRef<Path>) -> Result<Puzzle> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let puzzle: Puzzle = contents.parse()?;
    debug!(path = %path.display(), ?puzzle, "loaded puzzle");
    Ok(puzzle)
}

/// Reads the start and goal definitions of one problem.
pub fn load_problem(start: impl AsRef<Path>, goal: impl AsRef<Path>) -> Result<(Puzzle, Puzzle)> {
    Ok((load_puzzle(start)?, load_puzzle(goal)?))
}
