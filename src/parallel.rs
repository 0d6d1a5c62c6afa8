//! Fork/join decomposition of the walk search on a rayon pool.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::search::{Expansion, SearchState, Searcher};

pub const DEFAULT_PARALLEL_DEPTH: usize = 10;

/// Spawns one task per surviving child while the walk is shallower than
/// `depth` moves; deeper subtrees run sequentially inside their task.
pub struct ParallelScheduler<'s, 'a> {
    searcher: &'s Searcher<'a>,
    depth: u8,
}

impl<'s, 'a> ParallelScheduler<'s, 'a> {
    pub fn new(searcher: &'s Searcher<'a>, depth: usize) -> Self {
        let moves = searcher.board().moves();
        ParallelScheduler {
            searcher,
            depth: depth.min(moves as usize) as u8,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn count(&self, state: SearchState) -> u64 {
        if state.move_index >= self.depth {
            return self.searcher.count(state);
        }

        match self.searcher.expand(&state) {
            Expansion::Pruned => 0,
            Expansion::Leaf(n) => n,
            Expansion::Branch(children) => children
                .as_slice()
                .par_iter()
                .map(|&child| self.count(child))
                .sum(),
        }
    }

    pub fn count_all(&self) -> u64 {
        self.count(SearchState::root(self.searcher.board()))
    }
}

/// Worker pool for one counter. `None` sizes it to the available parallelism.
pub fn build_pool(threads: Option<usize>) -> Result<ThreadPool, rayon::ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .thread_name(|i| format!("walk-worker-{i}"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Board;
    use crate::pattern::CompiledPattern;
    use crate::prune::RuleSet;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn depth_is_capped_by_walk_length() {
        let board = Board::new(3, 3, 8).unwrap();
        let pattern = CompiledPattern::compile(&board, "********").unwrap();
        let rules = RuleSet::default();
        let searcher = Searcher::new(&board, &pattern, &rules);
        assert_eq!(ParallelScheduler::new(&searcher, 10).depth(), 8);
        assert_eq!(ParallelScheduler::new(&searcher, 3).depth(), 3);
    }

    #[test]
    fn parallel_matches_sequential() {
        let board = Board::new(5, 4, 19).unwrap();
        let pattern = CompiledPattern::compile(&board, &"*".repeat(19)).unwrap();
        let rules = RuleSet::default();
        let searcher = Searcher::new(&board, &pattern, &rules);
        let sequential = searcher.count_all();

        let pool = build_pool(Some(4)).unwrap();
        for depth in [0, 1, 5, 10, 19, 40] {
            let parallel = pool.install(|| ParallelScheduler::new(&searcher, depth).count_all());
            assert_eq!(parallel, sequential, "depth {depth}");
        }
    }

    #[test]
    fn progress_counts_every_path_once() {
        let board = Board::new(4, 4, 15).unwrap();
        let pattern = CompiledPattern::compile(&board, &"*".repeat(15)).unwrap();
        let rules = RuleSet::default();
        let counter = AtomicU64::new(0);
        let depth = 6;
        let searcher = Searcher::new(&board, &pattern, &rules).with_progress(&counter, depth as u8);
        let pool = build_pool(Some(2)).unwrap();
        let total = pool.install(|| ParallelScheduler::new(&searcher, depth).count_all());
        assert_eq!(total, 8);
        assert_eq!(counter.load(Ordering::Relaxed), total);
    }
}
