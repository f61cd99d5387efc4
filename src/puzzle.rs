use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const SIDE: usize = 3;

pub const CELLS: usize = SIDE * SIDE;

/// The blank is represented by 0.
pub const BLANK: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Left,
    Right,
    Down,
}

impl Move {
    /// Generation order for successors. Depth-first traversal depends on it.
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Right, Move::Down];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
            Move::Down => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Right => "Right",
            Move::Down => "Down",
        };
        write!(f, "{}", s)
    }
}

/// Canonical encoding of an arrangement: four bits per cell, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(u64);

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Puzzle {
    cells: [u8; CELLS],
    blank: usize,
}

impl Puzzle {
    pub fn solved() -> Self {
        let mut cells = [BLANK; CELLS];
        for (i, cell) in cells.iter_mut().take(CELLS - 1).enumerate() {
            *cell = i as u8 + 1;
        }

        Self {
            cells,
            blank: CELLS - 1,
        }
    }

    pub fn new(cells: [u8; CELLS]) -> Result<Self> {
        let mut counts = [0usize; CELLS];
        for (position, &value) in cells.iter().enumerate() {
            if value as usize >= CELLS {
                return Err(Error::InvalidSymbol {
                    symbol: char::from_u32(u32::from(b'0') + u32::from(value))
                        .unwrap_or(char::REPLACEMENT_CHARACTER),
                    position,
                });
            }
            counts[value as usize] += 1;
        }

        let blank = cells
            .iter()
            .position(|&value| value == BLANK)
            .ok_or(Error::MissingBlank)?;

        // Nine in-range values with no repeats cover every symbol once.
        if let Some((value, &count)) = counts.iter().enumerate().find(|(_, &c)| c > 1) {
            return Err(Error::DuplicateSymbol {
                symbol: symbol(value as u8),
                count,
            });
        }

        Ok(Self { cells, blank })
    }

    pub fn from_rows(rows: [[u8; SIDE]; SIDE]) -> Result<Self> {
        let mut cells = [BLANK; CELLS];
        for (row, values) in rows.iter().enumerate() {
            cells[row * SIDE..(row + 1) * SIDE].copy_from_slice(values);
        }
        Self::new(cells)
    }

    /// Builds a puzzle from single-character symbols `'0'..='8'`.
    pub fn from_symbols(symbols: &[char]) -> Result<Self> {
        if symbols.len() != CELLS {
            return Err(Error::WrongCellCount {
                expected: CELLS,
                got: symbols.len(),
            });
        }

        let mut cells = [BLANK; CELLS];
        for (position, &ch) in symbols.iter().enumerate() {
            cells[position] = match ch.to_digit(10) {
                Some(digit) if (digit as usize) < CELLS => digit as u8,
                _ => return Err(Error::InvalidSymbol { symbol: ch, position }),
            };
        }
        Self::new(cells)
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * SIDE + col]
    }

    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / SIDE, self.blank % SIDE)
    }

    pub fn is_blank(&self, row: usize, col: usize) -> bool {
        row * SIDE + col == self.blank
    }

    pub fn key(&self) -> StateKey {
        StateKey(
            self.cells
                .iter()
                .fold(0u64, |acc, &value| (acc << 4) | u64::from(value)),
        )
    }

    pub fn can_move(&self, movement: Move) -> bool {
        let (row, col) = self.blank_position();
        match movement {
            Move::Up => row > 0,
            Move::Left => col > 0,
            Move::Right => col < SIDE - 1,
            Move::Down => row < SIDE - 1,
        }
    }

    pub fn try_move(&self, movement: Move) -> Option<Self> {
        if !self.can_move(movement) {
            return None;
        }

        let (dx, dy) = movement.as_offset();
        let (row, col) = self.blank_position();
        let new_row = (row as isize + dx) as usize;
        let new_col = (col as isize + dy) as usize;
        let target = new_row * SIDE + new_col;

        let mut next = *self;
        next.cells.swap(self.blank, target);
        next.blank = target;
        Some(next)
    }

    /// Every puzzle one move away, in [`Move::ALL`] order.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Puzzle)> {
        let this = *self;
        Move::ALL
            .into_iter()
            .filter_map(move |movement| this.try_move(movement).map(|next| (movement, next)))
    }

    /// The move turning `self` into `next`, if they are one move apart.
    pub fn move_towards(&self, next: &Puzzle) -> Option<Move> {
        self.successors()
            .find(|(_, candidate)| candidate == next)
            .map(|(movement, _)| movement)
    }

    pub fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self
            .cells
            .iter()
            .copied()
            .filter(|&value| value != BLANK)
            .collect();

        tiles
            .iter()
            .enumerate()
            .map(|(i, &value)| tiles[i + 1..].iter().filter(|&&next| next < value).count())
            .sum()
    }

    /// On an odd-width board moves preserve inversion parity, which splits
    /// arrangements into two classes that cannot reach each other.
    pub fn is_reachable_from(&self, other: &Puzzle) -> bool {
        self.inversions() % 2 == other.inversions() % 2
    }

    /// A uniformly random arrangement in the same parity class as `goal`.
    pub fn shuffled_reachable<R: Rng + ?Sized>(goal: &Puzzle, rng: &mut R) -> Self {
        let mut cells = goal.cells;

        loop {
            cells.shuffle(rng);

            let blank = cells
                .iter()
                .position(|&value| value == BLANK)
                .unwrap_or(CELLS - 1);
            let candidate = Self { cells, blank };
            if candidate.is_reachable_from(goal) {
                return candidate;
            }
        }
    }

    /// Applies `steps` random moves, never immediately undoing the previous one.
    pub fn random_walk<R: Rng + ?Sized>(&self, steps: usize, rng: &mut R) -> Self {
        let mut current = *self;
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let options: Vec<(Move, Puzzle)> = current
                .successors()
                .filter(|(movement, _)| last != Some(movement.opposite()))
                .collect();

            if let Some(&(movement, next)) = options.choose(rng) {
                current = next;
                last = Some(movement);
            }
        }

        current
    }
}

fn symbol(value: u8) -> char {
    char::from(b'0' + value)
}

impl FromStr for Puzzle {
    type Err = Error;

    /// Accepts nine symbols separated by commas and/or whitespace, e.g.
    /// `"1,2,3\n4,0,6\n7,5,8"`.
    fn from_str(s: &str) -> Result<Self> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|ch| *ch != ',' && !ch.is_whitespace())
            .collect();
        Self::from_symbols(&symbols)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIDE) {
            let line: Vec<String> = row.iter().map(|&value| symbol(value).to_string()).collect();
            writeln!(f, "{}", line.join(","))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .chunks(SIDE)
            .map(|row| row.iter().map(|&value| symbol(value)).collect())
            .collect();
        write!(f, "Puzzle({})", rows.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn puzzle(rows: [[u8; 3]; 3]) -> Puzzle {
        Puzzle::from_rows(rows).unwrap()
    }

    #[test]
    fn centre_blank_has_four_successors_in_fixed_order() {
        let centre = puzzle([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        let successors: Vec<_> = centre.successors().collect();

        let moves: Vec<Move> = successors.iter().map(|(m, _)| *m).collect();
        assert_eq!(moves, vec![Move::Up, Move::Left, Move::Right, Move::Down]);
        assert_eq!(successors[0].1, puzzle([[1, 0, 3], [4, 2, 6], [7, 5, 8]]));
        assert_eq!(successors[1].1, puzzle([[1, 2, 3], [0, 4, 6], [7, 5, 8]]));
        assert_eq!(successors[2].1, puzzle([[1, 2, 3], [4, 6, 0], [7, 5, 8]]));
        assert_eq!(successors[3].1, puzzle([[1, 2, 3], [4, 5, 6], [7, 0, 8]]));
    }

    #[test]
    fn corner_blank_has_two_successors() {
        let corner = Puzzle::solved();
        let moves: Vec<Move> = corner.successors().map(|(m, _)| m).collect();
        assert_eq!(moves, vec![Move::Up, Move::Left]);
    }

    #[test]
    fn edge_blank_has_three_successors() {
        let edge = puzzle([[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        let moves: Vec<Move> = edge.successors().map(|(m, _)| m).collect();
        assert_eq!(moves, vec![Move::Left, Move::Right, Move::Down]);
    }

    #[test]
    fn successors_leave_parent_untouched() {
        let start = puzzle([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        let before = start;
        let first: Vec<_> = start.successors().collect();
        let second: Vec<_> = start.successors().collect();
        assert_eq!(start, before);
        assert_eq!(first, second);
    }

    #[test]
    fn every_successor_differs_in_exactly_two_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let state = Puzzle::shuffled_reachable(&Puzzle::solved(), &mut rng);
            for (movement, next) in state.successors() {
                let differing = state
                    .cells()
                    .iter()
                    .zip(next.cells())
                    .filter(|(a, b)| a != b)
                    .count();
                assert_eq!(differing, 2);
                assert_eq!(next.try_move(movement.opposite()), Some(state));
                assert!(Puzzle::new(*next.cells()).is_ok());
            }
        }
    }

    #[test]
    fn parse_accepts_file_format() {
        let parsed: Puzzle = "1,2,3\n4,0,6\n7,5,8\n".parse().unwrap();
        assert_eq!(parsed, puzzle([[1, 2, 3], [4, 0, 6], [7, 5, 8]]));
        assert_eq!(parsed.blank_position(), (1, 1));
        assert_eq!(parsed.to_string(), "1,2,3\n4,0,6\n7,5,8\n");
    }

    #[test]
    fn parse_accepts_whitespace_separated_symbols() {
        let parsed: Puzzle = "1 2 3  4 5 6  7 8 0".parse().unwrap();
        assert_eq!(parsed, Puzzle::solved());
    }

    #[test]
    fn rejects_wrong_cell_count() {
        let err = "1,2,3\n4,0,6".parse::<Puzzle>().unwrap_err();
        assert!(matches!(err, Error::WrongCellCount { expected: 9, got: 6 }));
    }

    #[test]
    fn rejects_unknown_symbol() {
        let err = "1,2,3\n4,x,6\n7,5,8".parse::<Puzzle>().unwrap_err();
        assert!(matches!(err, Error::InvalidSymbol { symbol: 'x', position: 4 }));

        let err = Puzzle::new([1, 2, 3, 4, 9, 6, 7, 5, 8]).unwrap_err();
        assert!(matches!(err, Error::InvalidSymbol { position: 4, .. }));
    }

    #[test]
    fn rejects_duplicate_blank() {
        let err = Puzzle::new([1, 2, 3, 4, 0, 6, 7, 0, 8]).unwrap_err();
        assert!(matches!(err, Error::DuplicateSymbol { symbol: '0', count: 2 }));
    }

    #[test]
    fn rejects_missing_blank() {
        let err = Puzzle::new([1, 2, 3, 4, 5, 6, 7, 8, 8]).unwrap_err();
        assert!(matches!(err, Error::MissingBlank));
        assert_eq!(err.to_string(), "malformed puzzle: no blank ('0') cell");

        let err = Puzzle::new([1, 2, 3, 4, 0, 6, 7, 5, 5]).unwrap_err();
        assert!(matches!(err, Error::DuplicateSymbol { symbol: '5', count: 2 }));
    }

    #[test]
    fn keys_follow_arrangement_equality() {
        let a = puzzle([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        let b: Puzzle = "1,2,3,4,0,6,7,5,8".parse().unwrap();
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), Puzzle::solved().key());
        assert_eq!(Puzzle::solved().key(), StateKey(0x1234_5678_0));
    }

    #[test]
    fn inversions_and_parity() {
        assert_eq!(Puzzle::solved().inversions(), 0);

        let swapped = puzzle([[2, 1, 3], [4, 5, 6], [7, 8, 0]]);
        assert_eq!(swapped.inversions(), 1);
        assert!(!swapped.is_reachable_from(&Puzzle::solved()));

        let near = puzzle([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        assert!(near.is_reachable_from(&Puzzle::solved()));
    }

    #[test]
    fn move_towards_names_the_move() {
        let start = puzzle([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        let down = puzzle([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        assert_eq!(start.move_towards(&down), Some(Move::Down));
        assert_eq!(start.move_towards(&Puzzle::solved()), None);
    }

    #[test]
    fn random_walk_stays_in_parity_class() {
        let mut rng = StdRng::seed_from_u64(42);
        let goal = Puzzle::solved();
        for steps in [0, 1, 5, 20] {
            let walked = goal.random_walk(steps, &mut rng);
            assert!(walked.is_reachable_from(&goal));
        }
        assert_eq!(goal.random_walk(0, &mut rng), goal);
    }
}
