//! Board geometry: cell indexing, the canonical direction table and the
//! per-cell lookup tables the search consults on every step.

use std::fmt;

use crate::error::BoardError;

/// Cell index, `row * width + col`. Doubles as the bit position in a visited mask.
pub type CellIndex = u8;

pub const MAX_CELLS: usize = 64;

pub const STANDARD_SIZE: u8 = 8;
pub const STANDARD_MOVES: u8 = 63;

const NO_NEIGHBOR: u8 = u8::MAX;

// Canonical mapping: index order U, D, L, R.
const DIR_OFFSETS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIR_CHARS: [char; 4] = ['U', 'D', 'L', 'R'];

static DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    #[inline(always)]
    pub fn all() -> &'static [Direction] {
        &DIRECTIONS
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `(drow, dcol)` for one step in this direction.
    #[inline(always)]
    pub const fn offset(self) -> (i8, i8) {
        DIR_OFFSETS[self as usize]
    }

    pub const fn letter(self) -> char {
        DIR_CHARS[self as usize]
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        DIR_CHARS
            .iter()
            .position(|&c| c == ch)
            .map(|i| DIRECTIONS[i])
    }

    /// The direction as a one-element slice, for uniform iteration with wildcards.
    #[inline(always)]
    pub fn as_slice(self) -> &'static [Direction] {
        let i = self as usize;
        &DIRECTIONS[i..=i]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub row: i8,
    pub col: i8,
}

impl Cell {
    #[inline(always)]
    pub const fn new(row: i8, col: i8) -> Self {
        Cell { row, col }
    }

    #[inline(always)]
    pub fn step(self, dir: Direction) -> Self {
        let (drow, dcol) = dir.offset();
        Cell::new(self.row + drow, self.col + dcol)
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        ((self.row as i32 - other.row as i32).abs() + (self.col as i32 - other.col as i32).abs())
            as u32
    }
}

/// A rectangular board of at most 64 cells with a fixed start (0,0) and target
/// (height-1, 0). All tables are computed once and shared read-only by every task.
#[derive(Clone, Debug)]
pub struct Board {
    width: u8,
    height: u8,
    moves: u8,
    target: CellIndex,
    full: u64,
    not_first_col: u64,
    not_last_col: u64,
    neighbors: [[u8; 4]; MAX_CELLS],
    neighbor_masks: [u64; MAX_CELLS],
    distance: [u8; MAX_CELLS],
}

impl Board {
    /// The 8x8 board with 63-move walks ending at (7,0).
    pub fn standard() -> Self {
        Self::build(STANDARD_SIZE, STANDARD_SIZE, STANDARD_MOVES)
    }

    /// A reduced board; walks take `moves` steps from (0,0) to (height-1, 0).
    pub fn new(width: u8, height: u8, moves: u8) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyBoard { width, height });
        }
        let cells = width as usize * height as usize;
        if cells > MAX_CELLS {
            return Err(BoardError::TooManyCells { cells });
        }
        if moves as usize >= cells {
            return Err(BoardError::TooManyMoves { moves, cells });
        }
        Ok(Self::build(width, height, moves))
    }

    fn build(width: u8, height: u8, moves: u8) -> Self {
        let cells = width as usize * height as usize;
        let full = if cells == MAX_CELLS {
            u64::MAX
        } else {
            (1u64 << cells) - 1
        };

        let mut board = Board {
            width,
            height,
            moves,
            target: (height - 1) * width,
            full,
            not_first_col: 0,
            not_last_col: 0,
            neighbors: [[NO_NEIGHBOR; 4]; MAX_CELLS],
            neighbor_masks: [0; MAX_CELLS],
            distance: [0; MAX_CELLS],
        };

        let target = board.cell(board.target);
        for idx in 0..cells {
            let cell = board.cell(idx as CellIndex);
            if cell.col != 0 {
                board.not_first_col |= 1u64 << idx;
            }
            if cell.col != width as i8 - 1 {
                board.not_last_col |= 1u64 << idx;
            }
            board.distance[idx] = cell.manhattan(target) as u8;

            for &dir in Direction::all() {
                let next = cell.step(dir);
                if board.is_inside(next.row, next.col) {
                    let next_idx = board.index(next);
                    board.neighbors[idx][dir.index()] = next_idx;
                    board.neighbor_masks[idx] |= 1u64 << next_idx;
                }
            }
        }

        board
    }

    #[inline(always)]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of moves in a complete walk (and the required pattern length).
    #[inline(always)]
    pub fn moves(&self) -> u8 {
        self.moves
    }

    #[inline(always)]
    pub fn cells(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    #[inline(always)]
    pub fn start(&self) -> CellIndex {
        0
    }

    #[inline(always)]
    pub fn target(&self) -> CellIndex {
        self.target
    }

    /// Mask with one bit set per cell on the board.
    #[inline(always)]
    pub fn full_mask(&self) -> u64 {
        self.full
    }

    #[inline(always)]
    pub fn is_inside(&self, row: i8, col: i8) -> bool {
        row >= 0 && row < self.height as i8 && col >= 0 && col < self.width as i8
    }

    #[inline(always)]
    pub fn index(&self, cell: Cell) -> CellIndex {
        debug_assert!(self.is_inside(cell.row, cell.col));
        (cell.row as u8) * self.width + cell.col as u8
    }

    #[inline(always)]
    pub fn cell(&self, idx: CellIndex) -> Cell {
        Cell::new((idx / self.width) as i8, (idx % self.width) as i8)
    }

    #[inline(always)]
    pub fn col(&self, idx: CellIndex) -> u8 {
        idx % self.width
    }

    #[inline(always)]
    pub fn neighbor(&self, idx: CellIndex, dir: Direction) -> Option<CellIndex> {
        debug_assert!((idx as u32) < self.cells());
        match self.neighbors[idx as usize][dir.index()] {
            NO_NEIGHBOR => None,
            next => Some(next),
        }
    }

    #[inline(always)]
    pub fn neighbor_mask(&self, idx: CellIndex) -> u64 {
        self.neighbor_masks[idx as usize]
    }

    #[inline(always)]
    pub fn distance_to_target(&self, idx: CellIndex) -> u32 {
        self.distance[idx as usize] as u32
    }

    /// One flood step: every cell in `mask` plus its orthogonal neighbours.
    #[inline(always)]
    pub fn expand(&self, mask: u64) -> u64 {
        let w = self.width as u32;
        (mask
            | ((mask << 1) & self.not_first_col)
            | ((mask >> 1) & self.not_last_col)
            | (mask << w)
            | (mask >> w))
            & self.full
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}
