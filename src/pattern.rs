//! Move patterns: parsing, validation and the suffix tables used by the
//! fixed-move budget rule.

use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;
use crate::grid::{Board, Direction};

pub const WILDCARD: char = '*';

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Move {
    Step(Direction),
    Wildcard,
}

impl Move {
    pub fn from_char(ch: char) -> Option<Self> {
        if ch == WILDCARD {
            Some(Move::Wildcard)
        } else {
            Direction::from_letter(ch).map(Move::Step)
        }
    }

    /// Directions the search branches on at this position.
    #[inline(always)]
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Move::Step(dir) => dir.as_slice(),
            Move::Wildcard => Direction::all(),
        }
    }

    pub fn is_wildcard(self) -> bool {
        matches!(self, Move::Wildcard)
    }
}

impl FromStr for Move {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                Move::from_char(ch).ok_or(PatternError::InvalidSymbol { index: 0, symbol: ch })
            }
            _ => Err(PatternError::WrongLength {
                expected: 1,
                found: s.chars().count(),
            }),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Step(dir) => write!(f, "{}", dir),
            Move::Wildcard => write!(f, "{}", WILDCARD),
        }
    }
}

/// How many of each symbol occur from some index to the end of the pattern.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MoveCounts {
    pub up: u8,
    pub down: u8,
    pub left: u8,
    pub right: u8,
    pub wildcard: u8,
}

impl MoveCounts {
    fn add(mut self, mv: Move) -> Self {
        match mv {
            Move::Step(Direction::Up) => self.up += 1,
            Move::Step(Direction::Down) => self.down += 1,
            Move::Step(Direction::Left) => self.left += 1,
            Move::Step(Direction::Right) => self.right += 1,
            Move::Wildcard => self.wildcard += 1,
        }
        self
    }

    pub fn literals(&self) -> u32 {
        self.up as u32 + self.down as u32 + self.left as u32 + self.right as u32
    }
}

/// A validated pattern, immutable and shared read-only by every search task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledPattern {
    moves: Vec<Move>,
    // suffix[i] counts moves[i..]; suffix[len] is all zero.
    suffix: Vec<MoveCounts>,
    wildcards: usize,
}

impl CompiledPattern {
    pub fn compile(board: &Board, pattern: &str) -> Result<Self, PatternError> {
        let expected = board.moves() as usize;
        let found = pattern.chars().count();
        if found != expected {
            return Err(PatternError::WrongLength { expected, found });
        }

        let moves = pattern
            .chars()
            .enumerate()
            .map(|(index, symbol)| {
                Move::from_char(symbol).ok_or(PatternError::InvalidSymbol { index, symbol })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut suffix = vec![MoveCounts::default(); moves.len() + 1];
        for i in (0..moves.len()).rev() {
            suffix[i] = suffix[i + 1].add(moves[i]);
        }

        let wildcards = memchr::memchr_iter(WILDCARD as u8, pattern.as_bytes()).count();
        debug_assert_eq!(wildcards, suffix[0].wildcard as usize);

        Ok(CompiledPattern {
            moves,
            suffix,
            wildcards,
        })
    }

    #[inline(always)]
    pub fn symbol(&self, index: usize) -> Move {
        self.moves[index]
    }

    /// Counts of each symbol at or after `index`. Valid for `index <= len()`.
    #[inline(always)]
    pub fn remaining(&self, index: usize) -> MoveCounts {
        self.suffix[index]
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn wildcards(&self) -> usize {
        self.wildcards
    }

    pub fn is_fully_fixed(&self) -> bool {
        self.wildcards == 0
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in &self.moves {
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}
