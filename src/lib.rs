//! Counts self-avoiding walks on a grid that follow a move pattern.
//!
//! A walk starts at the top-left corner (0,0), takes one step per pattern
//! symbol, never revisits a cell and must finish on the bottom-left corner.
//! Each symbol is a fixed direction (`U`, `D`, `L`, `R`) or `*`, meaning any
//! direction. The standard board is 8x8 with 63-move patterns, so every
//! counted walk covers the whole board.
//!
//! ```
//! use walk_counter::{Board, PathCounter, SearchConfig};
//!
//! let board = Board::new(4, 4, 15).unwrap();
//! let counter = PathCounter::with_board(board, SearchConfig::default()).unwrap();
//! assert_eq!(counter.count(&"*".repeat(15)).unwrap().paths, 8);
//! ```
//!
//! The search is a depth-first enumeration over immutable [`SearchState`]
//! values with a bitmask of visited cells. Each state is checked against an
//! ordered [`RuleSet`] of necessary conditions before it is expanded, and the
//! shallow levels of the tree are split into rayon tasks whose counts are
//! summed on return.

pub mod config;
pub mod counter;
pub mod error;
pub mod grid;
pub mod mask;
pub mod parallel;
pub mod pattern;
pub mod progress;
pub mod prune;
pub mod search;

pub use config::{Mode, SearchConfig};
pub use counter::{Hooks, PathCounter, SearchReport};
pub use error::{BoardError, PatternError, SearchError};
pub use grid::{Board, Cell, Direction};
pub use pattern::{CompiledPattern, Move};
pub use prune::{Rule, RuleSet};
pub use search::{SearchState, Searcher};
