//! The recursive walk enumerator.
//!
//! A branch is a [`SearchState`] value. Expanding it either prunes it, closes
//! it as a finished walk, or yields up to four child states; a subtree's count
//! is the sum of its children's counts. Nothing is shared mutably between
//! branches, so any subtree can be counted on any thread.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use arrayvec::ArrayVec;

use crate::grid::{Board, CellIndex, Direction};
use crate::mask::VisitedMask;
use crate::pattern::CompiledPattern;
use crate::prune::{Oracle, RuleSet};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SearchState {
    pub cell: CellIndex,
    /// Moves taken so far; also the index of the next pattern symbol.
    pub move_index: u8,
    pub visited: VisitedMask,
    /// Leftmost column reached so far, used by symmetry pruning.
    pub min_col: u8,
}

impl SearchState {
    pub fn root(board: &Board) -> Self {
        let start = board.start();
        SearchState {
            cell: start,
            move_index: 0,
            visited: VisitedMask::single(start),
            min_col: board.col(start),
        }
    }

    #[inline(always)]
    fn advance(&self, next: CellIndex, col: u8) -> Self {
        SearchState {
            cell: next,
            move_index: self.move_index + 1,
            visited: self.visited.with(next),
            min_col: self.min_col.min(col),
        }
    }

    pub fn moves_left(&self, board: &Board) -> u32 {
        board.moves() as u32 - self.move_index as u32
    }
}

pub type Children = ArrayVec<SearchState, 4>;

/// Outcome of expanding one state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expansion {
    Pruned,
    /// A complete walk: 1 if it ended on the target, else 0.
    Leaf(u64),
    Branch(Children),
}

pub struct Searcher<'a> {
    board: &'a Board,
    pattern: &'a CompiledPattern,
    oracle: Oracle<'a>,
    symmetry: bool,
    cancel: Option<&'a AtomicBool>,
    progress: Option<&'a AtomicU64>,
    report_depth: u8,
}

impl<'a> Searcher<'a> {
    pub fn new(board: &'a Board, pattern: &'a CompiledPattern, rules: &'a RuleSet) -> Self {
        debug_assert_eq!(pattern.len(), board.moves() as usize);
        Searcher {
            board,
            pattern,
            oracle: Oracle::new(board, pattern, rules),
            symmetry: rules.symmetry(),
            cancel: None,
            progress: None,
            report_depth: board.moves(),
        }
    }

    /// Checked on every step; once raised, all remaining subtrees count as 0.
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Adds each finished subtree rooted at `depth` to `counter`, for display.
    pub fn with_progress(mut self, counter: &'a AtomicU64, depth: u8) -> Self {
        self.progress = Some(counter);
        self.report_depth = depth.min(self.board.moves());
        self
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    pub fn pattern(&self) -> &CompiledPattern {
        self.pattern
    }

    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    pub fn expand(&self, state: &SearchState) -> Expansion {
        debug_assert_eq!(
            state.visited.count(),
            state.move_index as u32 + 1,
            "visited cells out of step with moves"
        );

        if self.is_cancelled() || !self.oracle.feasible(state) {
            return Expansion::Pruned;
        }

        if state.move_index == self.board.moves() {
            return Expansion::Leaf((state.cell == self.board.target()) as u64);
        }

        Expansion::Branch(self.children(state))
    }

    /// Legal successors of a non-terminal state under the pattern symbol at its index.
    pub fn children(&self, state: &SearchState) -> Children {
        let mut children = Children::new();
        let board = self.board;
        let closing = state.move_index + 1 == board.moves();
        let col = board.col(state.cell);

        for &dir in self.pattern.symbol(state.move_index as usize).directions() {
            let Some(next) = board.neighbor(state.cell, dir) else {
                continue;
            };
            if state.visited.contains(next) {
                continue;
            }
            // The last move has to land on the target.
            if closing && next != board.target() {
                continue;
            }
            if self.symmetry && dir == Direction::Left && col <= state.min_col {
                continue;
            }
            children.push(state.advance(next, board.col(next)));
        }

        children
    }

    /// Number of valid walks completing `state`, counted on the current thread.
    pub fn count(&self, state: SearchState) -> u64 {
        let paths = match self.expand(&state) {
            Expansion::Pruned => 0,
            Expansion::Leaf(n) => n,
            Expansion::Branch(children) => children.into_iter().map(|c| self.count(c)).sum(),
        };

        if state.move_index == self.report_depth && paths > 0 {
            if let Some(counter) = self.progress {
                counter.fetch_add(paths, Ordering::Relaxed);
            }
        }

        paths
    }

    pub fn count_all(&self) -> u64 {
        self.count(SearchState::root(self.board))
    }
}
