//! Feasibility rules. Every rule is a necessary condition for a partial walk
//! to be completable: a rule may keep a dead branch alive, but it must never
//! cut a branch that still leads to a valid walk.

use std::fmt;

use smallvec::SmallVec;

use crate::grid::{Board, CellIndex};
use crate::mask::Bits;
use crate::pattern::CompiledPattern;
use crate::search::SearchState;

pub const DEFAULT_ISOLATION_WINDOW: u32 = 10;
pub const DEFAULT_FLOOD_FILL_WINDOW: u32 = 64;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Rule {
    /// Manhattan distance to the target fits in the moves left.
    DistanceBound,
    /// Moves left do not exceed the unvisited cells.
    CellBudget,
    /// Distance and moves left have the same parity (the grid is bipartite).
    Parity,
    /// No unvisited cell is a dead end while every cell must still be used.
    Isolation,
    /// Target reachable through unvisited cells, with room for the remaining walk.
    Connectivity,
    /// Literal moves left in the pattern can still be balanced by its wildcards.
    FixedMoveBudget,
    /// Skip Left moves that would extend the leftmost column reached so far.
    /// Only sound for patterns that are symmetric in the way it assumes; opt-in.
    Symmetry,
}

impl Rule {
    pub const fn name(self) -> &'static str {
        match self {
            Rule::DistanceBound => "distance-bound",
            Rule::CellBudget => "cell-budget",
            Rule::Parity => "parity",
            Rule::Isolation => "isolation",
            Rule::Connectivity => "connectivity",
            Rule::FixedMoveBudget => "fixed-move-budget",
            Rule::Symmetry => "symmetry",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of enabled rules. Cheap rules go first so that the flood
/// fill only runs on states that survived everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSet {
    rules: SmallVec<[Rule; 8]>,
    isolation_window: u32,
    flood_fill_window: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            rules: SmallVec::from_slice(&[
                Rule::DistanceBound,
                Rule::CellBudget,
                Rule::Parity,
                Rule::FixedMoveBudget,
                Rule::Isolation,
                Rule::Connectivity,
            ]),
            isolation_window: DEFAULT_ISOLATION_WINDOW,
            flood_fill_window: DEFAULT_FLOOD_FILL_WINDOW,
        }
    }
}

impl RuleSet {
    /// No pruning at all; the engine degenerates to a plain enumeration.
    pub fn none() -> Self {
        RuleSet {
            rules: SmallVec::new(),
            ..RuleSet::default()
        }
    }

    pub fn only(rules: &[Rule]) -> Self {
        rules
            .iter()
            .fold(RuleSet::none(), |set, &rule| set.with(rule))
    }

    /// Appends `rule` unless it is already enabled.
    pub fn with(mut self, rule: Rule) -> Self {
        if !self.contains(rule) {
            self.rules.push(rule);
        }
        self
    }

    pub fn without(mut self, rule: Rule) -> Self {
        self.rules.retain(|r| *r != rule);
        self
    }

    /// Isolation runs only once at most `cells` cells are unvisited.
    pub fn with_isolation_window(mut self, cells: u32) -> Self {
        self.isolation_window = cells;
        self
    }

    /// Connectivity runs only once at most `cells` cells are unvisited.
    pub fn with_flood_fill_window(mut self, cells: u32) -> Self {
        self.flood_fill_window = cells;
        self
    }

    pub fn contains(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = Rule> + '_ {
        self.rules.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn symmetry(&self) -> bool {
        self.contains(Rule::Symmetry)
    }

    pub fn isolation_window(&self) -> u32 {
        self.isolation_window
    }

    pub fn flood_fill_window(&self) -> u32 {
        self.flood_fill_window
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rules.is_empty() {
            return f.write_str("none");
        }
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}

/// Applies a rule set to search states of one pattern on one board.
#[derive(Clone, Copy, Debug)]
pub struct Oracle<'a> {
    board: &'a Board,
    pattern: &'a CompiledPattern,
    rules: &'a RuleSet,
}

impl<'a> Oracle<'a> {
    pub fn new(board: &'a Board, pattern: &'a CompiledPattern, rules: &'a RuleSet) -> Self {
        Oracle {
            board,
            pattern,
            rules,
        }
    }

    #[inline(always)]
    pub fn feasible(&self, state: &SearchState) -> bool {
        self.violation(state).is_none()
    }

    /// The first enabled rule the state fails, if any.
    pub fn violation(&self, state: &SearchState) -> Option<Rule> {
        let moves_left = self.board.moves() as u32 - state.move_index as u32;
        let free = state.visited.unvisited(self.board.full_mask());
        self.rules
            .iter()
            .find(|&rule| !self.holds(rule, state, moves_left, free))
    }

    #[inline(always)]
    fn holds(&self, rule: Rule, state: &SearchState, moves_left: u32, free: u64) -> bool {
        match rule {
            Rule::DistanceBound => self.board.distance_to_target(state.cell) <= moves_left,
            Rule::CellBudget => moves_left <= free.count_ones(),
            Rule::Parity => (self.board.distance_to_target(state.cell) ^ moves_left) & 1 == 0,
            Rule::Isolation => self.no_dead_ends(state.cell, moves_left, free),
            Rule::Connectivity => self.target_reachable(state.cell, moves_left, free),
            Rule::FixedMoveBudget => self.literals_fit(state),
            // Applied by the engine as a move filter, not a state test.
            Rule::Symmetry => true,
        }
    }

    fn no_dead_ends(&self, cell: CellIndex, moves_left: u32, free: u64) -> bool {
        let free_count = free.count_ones();
        // Only when the walk has to consume every remaining cell.
        if free_count > self.rules.isolation_window() || moves_left != free_count {
            return true;
        }

        let target = self.board.target();
        let open = free | (1u64 << cell);
        Bits(free).all(|idx| {
            // A non-target cell needs a way in and a way out.
            let needed = if idx == target { 1 } else { 2 };
            (self.board.neighbor_mask(idx) & open).count_ones() >= needed
        })
    }

    fn target_reachable(&self, cell: CellIndex, moves_left: u32, free: u64) -> bool {
        if moves_left == 0 || free.count_ones() > self.rules.flood_fill_window() {
            return true;
        }

        let mut reach = self.board.neighbor_mask(cell) & free;
        loop {
            let next = self.board.expand(reach) & free;
            if next == reach {
                break;
            }
            reach = next;
        }

        (reach >> self.board.target()) & 1 != 0 && reach.count_ones() >= moves_left
    }

    fn literals_fit(&self, state: &SearchState) -> bool {
        let counts = self.pattern.remaining(state.move_index as usize);
        let here = self.board.cell(state.cell);
        let target = self.board.cell(self.board.target());

        // Displacement still owed after the literal moves, per axis; only
        // wildcards can pay it back.
        let col_gap = (target.col as i32 - here.col as i32)
            - (counts.right as i32 - counts.left as i32);
        let row_gap =
            (target.row as i32 - here.row as i32) - (counts.down as i32 - counts.up as i32);
        (col_gap.abs() + row_gap.abs()) as u32 <= counts.wildcard as u32
    }
}
