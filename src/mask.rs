//! Visited-cell bitmask. One bit per cell; each branch derives a new mask
//! instead of mutating its parent's.

use crate::grid::CellIndex;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct VisitedMask(u64);

impl VisitedMask {
    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        VisitedMask(bits)
    }

    #[inline(always)]
    pub const fn single(cell: CellIndex) -> Self {
        VisitedMask(1u64 << cell)
    }

    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline(always)]
    pub const fn contains(self, cell: CellIndex) -> bool {
        (self.0 >> cell) & 1 != 0
    }

    /// The mask with `cell` added. `cell` must not already be visited.
    #[inline(always)]
    pub fn with(self, cell: CellIndex) -> Self {
        debug_assert!(cell < 64, "cell {cell} outside mask");
        debug_assert!(!self.contains(cell), "cell {cell} visited twice");
        VisitedMask(self.0 | (1u64 << cell))
    }

    #[inline(always)]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Unvisited cells of a board whose cells are `full`.
    #[inline(always)]
    pub const fn unvisited(self, full: u64) -> u64 {
        full & !self.0
    }

    pub fn cells(self) -> Bits {
        Bits(self.0)
    }
}

/// Iterator over the set bits of a `u64`, lowest first.
#[derive(Clone, Copy, Debug)]
pub struct Bits(pub u64);

impl Iterator for Bits {
    type Item = CellIndex;

    #[inline(always)]
    fn next(&mut self) -> Option<CellIndex> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as CellIndex;
        self.0 &= self.0 - 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Bits {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_query() {
        let mask = VisitedMask::single(0).with(8).with(63);
        assert!(mask.contains(0));
        assert!(mask.contains(8));
        assert!(mask.contains(63));
        assert!(!mask.contains(1));
        assert_eq!(mask.count(), 3);
        assert_eq!(mask.unvisited(u64::MAX).count_ones(), 61);
    }

    #[test]
    fn parent_is_unchanged() {
        let parent = VisitedMask::single(0);
        let child = parent.with(1);
        assert_eq!(parent.count(), 1);
        assert_eq!(child.count(), 2);
    }

    #[test]
    fn iterates_set_bits() {
        let cells: Vec<_> = VisitedMask::from_bits(0b1010_0001).cells().collect();
        assert_eq!(cells, vec![0, 5, 7]);
        assert_eq!(Bits(0).count(), 0);
        assert_eq!(Bits(u64::MAX).len(), 64);
    }
}
