use std::fmt;

use crate::parallel::DEFAULT_PARALLEL_DEPTH;
use crate::prune::RuleSet;

/// Patterns with more wildcards than this run in parallel under [`Mode::Auto`].
pub const AUTO_PARALLEL_WILDCARDS: usize = 15;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Mode {
    /// Parallel for wildcard-heavy patterns, sequential otherwise.
    #[default]
    Auto,
    Sequential,
    Parallel,
}

impl Mode {
    /// Concrete mode for a pattern with `wildcards` wildcard positions.
    pub fn resolve(self, wildcards: usize) -> Mode {
        match self {
            Mode::Auto if wildcards > AUTO_PARALLEL_WILDCARDS => Mode::Parallel,
            Mode::Auto => Mode::Sequential,
            mode => mode,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Auto => "auto",
            Mode::Sequential => "sequential",
            Mode::Parallel => "parallel",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub mode: Mode,
    /// Worker threads; `None` uses the available parallelism.
    pub threads: Option<usize>,
    /// Walks shorter than this many moves are split into parallel tasks.
    pub parallel_depth: usize,
    pub rules: RuleSet,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            mode: Mode::Auto,
            threads: None,
            parallel_depth: DEFAULT_PARALLEL_DEPTH,
            rules: RuleSet::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_parallel_depth(mut self, depth: usize) -> Self {
        self.parallel_depth = depth;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_mode_threshold() {
        assert_eq!(Mode::Auto.resolve(15), Mode::Sequential);
        assert_eq!(Mode::Auto.resolve(16), Mode::Parallel);
        assert_eq!(Mode::Sequential.resolve(63), Mode::Sequential);
        assert_eq!(Mode::Parallel.resolve(0), Mode::Parallel);
    }

    #[test]
    fn defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.mode, Mode::Auto);
        assert_eq!(config.parallel_depth, 10);
        assert_eq!(config.rules, RuleSet::default());
        let config = config.with_threads(3).with_mode(Mode::Parallel);
        assert_eq!(config.threads, Some(3));
        assert_eq!(config.mode.to_string(), "parallel");
    }
}
