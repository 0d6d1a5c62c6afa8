//! Error types for pattern input, board construction and search runs.

use std::error::Error;
use std::fmt;

/// A move pattern that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Pattern length (in characters) differs from the board's move count.
    WrongLength { expected: usize, found: usize },

    /// Character outside `U`, `D`, `L`, `R`, `*`.
    InvalidSymbol { index: usize, symbol: char },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::WrongLength { expected, found } => write!(
                f,
                "pattern must be {} characters long, got {}",
                expected, found
            ),
            PatternError::InvalidSymbol { index, symbol } => write!(
                f,
                "invalid symbol {:?} at position {}; expected one of U, D, L, R, *",
                symbol, index
            ),
        }
    }
}

impl Error for PatternError {}

/// Board dimensions that the 64-bit visited mask cannot represent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    EmptyBoard { width: u8, height: u8 },
    TooManyCells { cells: usize },
    /// A walk of `moves` steps needs `moves + 1` distinct cells.
    TooManyMoves { moves: u8, cells: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::EmptyBoard { width, height } => {
                write!(f, "board {}x{} has no cells", width, height)
            }
            BoardError::TooManyCells { cells } => {
                write!(f, "board has {} cells, at most 64 are supported", cells)
            }
            BoardError::TooManyMoves { moves, cells } => write!(
                f,
                "{} moves cannot fit on a board of {} cells",
                moves, cells
            ),
        }
    }
}

impl Error for BoardError {}

#[derive(Debug)]
pub enum SearchError {
    Pattern(PatternError),

    /// The cancellation flag was raised; the partial count is discarded.
    Cancelled,

    ThreadPool(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Pattern(err) => write!(f, "invalid pattern: {}", err),
            SearchError::Cancelled => write!(f, "search cancelled"),
            SearchError::ThreadPool(msg) => write!(f, "failed to start worker pool: {}", msg),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SearchError::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatternError> for SearchError {
    fn from(err: PatternError) -> Self {
        SearchError::Pattern(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for SearchError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        SearchError::ThreadPool(err.to_string())
    }
}
