//! Reusable counting facade: validation, scheduling choice and a per-pattern
//! result cache.

use std::sync::atomic::{AtomicBool, AtomicU64};
use std::time::{Duration, Instant};

use log::{debug, info};
use parking_lot::Mutex;
use rayon::ThreadPool;
use rustc_hash::FxHashMap;

use crate::config::{Mode, SearchConfig};
use crate::error::{PatternError, SearchError};
use crate::grid::Board;
use crate::parallel::{build_pool, ParallelScheduler};
use crate::pattern::CompiledPattern;
use crate::search::Searcher;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchReport {
    pub paths: u64,
    pub elapsed: Duration,
    /// The mode the search actually ran in (never `Auto`).
    pub mode: Mode,
    pub cached: bool,
}

impl SearchReport {
    pub fn paths_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.paths as f64 / secs
        } else {
            0.0
        }
    }
}

/// Optional hooks into a running search.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hooks<'a> {
    pub cancel: Option<&'a AtomicBool>,
    pub progress: Option<&'a AtomicU64>,
}

pub struct PathCounter {
    board: Board,
    config: SearchConfig,
    pool: Option<ThreadPool>,
    cache: Mutex<FxHashMap<String, u64>>,
}

impl PathCounter {
    /// A counter for the standard 8x8 board.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        Self::with_board(Board::standard(), config)
    }

    pub fn with_board(board: Board, config: SearchConfig) -> Result<Self, SearchError> {
        let pool = match config.mode {
            Mode::Sequential => None,
            Mode::Auto | Mode::Parallel => Some(build_pool(config.threads)?),
        };
        debug!(
            "counter ready: {}x{} board, {} moves, rules [{}], parallel depth {}",
            board.width(),
            board.height(),
            board.moves(),
            config.rules,
            config.parallel_depth
        );
        Ok(PathCounter {
            board,
            config,
            pool,
            cache: Mutex::new(FxHashMap::default()),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Worker threads a parallel search would use.
    pub fn threads(&self) -> usize {
        self.pool.as_ref().map_or(1, |pool| pool.current_num_threads())
    }

    pub fn validate(&self, pattern: &str) -> Result<CompiledPattern, PatternError> {
        CompiledPattern::compile(&self.board, pattern)
    }

    pub fn count(&self, pattern: &str) -> Result<SearchReport, SearchError> {
        self.count_with(pattern, Hooks::default())
    }

    pub fn count_with(&self, pattern: &str, hooks: Hooks<'_>) -> Result<SearchReport, SearchError> {
        let compiled = self.validate(pattern)?;
        let mode = self.config.mode.resolve(compiled.wildcards());

        if let Some(&paths) = self.cache.lock().get(pattern) {
            debug!("cache hit for {pattern}");
            return Ok(SearchReport {
                paths,
                elapsed: Duration::ZERO,
                mode,
                cached: true,
            });
        }

        info!(
            "counting {} ({} wildcards, {} mode)",
            pattern,
            compiled.wildcards(),
            mode
        );

        let depth = self.config.parallel_depth.min(self.board.moves() as usize);
        let mut searcher = Searcher::new(&self.board, &compiled, &self.config.rules);
        if let Some(flag) = hooks.cancel {
            searcher = searcher.with_cancel(flag);
        }
        if let Some(counter) = hooks.progress {
            searcher = searcher.with_progress(counter, depth as u8);
        }

        let start = Instant::now();
        let paths = match (mode, &self.pool) {
            (Mode::Parallel, Some(pool)) => {
                pool.install(|| ParallelScheduler::new(&searcher, depth).count_all())
            }
            _ => searcher.count_all(),
        };
        let elapsed = start.elapsed();

        // Partial sums of a cancelled run are discarded, never reported or cached.
        if searcher.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        self.cache.lock().insert(pattern.to_owned(), paths);
        Ok(SearchReport {
            paths,
            elapsed,
            mode,
            cached: false,
        })
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn rejects_invalid_patterns_before_searching() {
        let counter = PathCounter::new(SearchConfig::default()).unwrap();
        assert!(matches!(
            counter.count("UDLR"),
            Err(SearchError::Pattern(PatternError::WrongLength { expected: 63, found: 4 }))
        ));
        assert!(matches!(
            counter.count(&"?".repeat(63)),
            Err(SearchError::Pattern(PatternError::InvalidSymbol { .. }))
        ));
    }

    #[test]
    fn caches_results() {
        let board = Board::new(4, 4, 15).unwrap();
        let counter = PathCounter::with_board(board, SearchConfig::default()).unwrap();
        let pattern = "*".repeat(15);
        let first = counter.count(&pattern).unwrap();
        assert_eq!(first.paths, 8);
        assert!(!first.cached);
        let second = counter.count(&pattern).unwrap();
        assert_eq!(second.paths, 8);
        assert!(second.cached);
        counter.clear_cache();
        assert!(!counter.count(&pattern).unwrap().cached);
    }

    #[test]
    fn cancelled_runs_are_not_cached() {
        let board = Board::new(4, 4, 15).unwrap();
        let config = SearchConfig::default().with_mode(Mode::Parallel).with_threads(2);
        let counter = PathCounter::with_board(board, config).unwrap();
        let pattern = "*".repeat(15);
        let flag = AtomicBool::new(true);
        let hooks = Hooks {
            cancel: Some(&flag),
            progress: None,
        };
        assert!(matches!(
            counter.count_with(&pattern, hooks),
            Err(SearchError::Cancelled)
        ));
        flag.store(false, Ordering::Relaxed);
        let report = counter.count_with(&pattern, hooks).unwrap();
        assert_eq!(report.paths, 8);
        assert!(!report.cached);
    }

    #[test]
    fn auto_mode_picks_by_wildcards() {
        let board = Board::new(4, 4, 15).unwrap();
        let counter = PathCounter::with_board(board, SearchConfig::default()).unwrap();
        let report = counter.count(&"*".repeat(15)).unwrap();
        assert_eq!(report.mode, Mode::Sequential);

        let counter = PathCounter::new(SearchConfig::default()).unwrap();
        let report = counter
            .count("DDDDDDRUUUUUURDDDDDDRUUUUUURDDDDDDRUUUUUURRDLDRDLDRDLDRDLLLLLLL")
            .unwrap();
        assert_eq!(report.mode, Mode::Sequential);
        assert_eq!(report.paths, 1);
    }

    #[test]
    fn sequential_counter_has_no_pool() {
        let config = SearchConfig::default().with_mode(Mode::Sequential);
        let counter = PathCounter::new(config).unwrap();
        assert_eq!(counter.threads(), 1);
    }
}
