//! Known answers on the standard 8x8 board.

mod common;

use common::{FULL_WALK, MIXED};
use walk_counter::{Mode, PathCounter, SearchConfig};

fn count(pattern: &str, mode: Mode) -> u64 {
    let counter = PathCounter::new(SearchConfig::default().with_mode(mode)).unwrap();
    counter.count(pattern).unwrap().paths
}

#[test]
fn fully_specified_walk() {
    assert_eq!(count(FULL_WALK, Mode::Sequential), 1);
    assert_eq!(count(FULL_WALK, Mode::Parallel), 1);
}

#[test]
fn straight_down_leaves_the_board() {
    assert_eq!(count(&"D".repeat(63), Mode::Auto), 0);
}

#[test]
fn fixed_walk_with_wildcard_gap() {
    let pattern = "DDDDDDRUUUUUURDDDDDD********DDDDDDRUUUUUURRDLDRDLDRDLDRDLLLLLLL";
    assert_eq!(count(pattern, Mode::Sequential), 1);
}

#[test]
fn mixed_pattern() {
    assert_eq!(count(MIXED, Mode::Parallel), 5_739);
}

#[test]
fn mixed_pattern_sequential_matches_parallel() {
    let sequential = count(MIXED, Mode::Sequential);
    let parallel = count(MIXED, Mode::Parallel);
    assert_eq!(sequential, parallel);
}

#[test]
fn parallel_result_is_stable_across_pool_shapes() {
    let pattern = "DDDDDDRUUUUUURDDDDDD********DDDDDDRUUUUUURRDLD**************LLL";
    let baseline = count(pattern, Mode::Sequential);
    for (threads, depth) in [(1, 10), (2, 4), (4, 0), (8, 20)] {
        let config = SearchConfig::default()
            .with_mode(Mode::Parallel)
            .with_threads(threads)
            .with_parallel_depth(depth);
        let counter = PathCounter::new(config).unwrap();
        assert_eq!(
            counter.count(pattern).unwrap().paths,
            baseline,
            "threads {threads}, depth {depth}"
        );
    }
}

#[test]
fn fixed_patterns_count_at_most_one() {
    let counter = PathCounter::new(SearchConfig::default()).unwrap();
    let letters = ['U', 'D', 'L', 'R'];
    // Every single-letter change of the known walk.
    for i in 0..FULL_WALK.len() {
        for &letter in &letters {
            let mut pattern: Vec<char> = FULL_WALK.chars().collect();
            pattern[i] = letter;
            let pattern: String = pattern.into_iter().collect();
            let paths = counter.count(&pattern).unwrap().paths;
            let expected = (pattern == FULL_WALK) as u64;
            assert_eq!(paths, expected, "{pattern}");
        }
    }
}

#[test]
#[ignore = "long-running; use --release -- --ignored"]
fn single_literal_per_region() {
    let pattern = "*********************R****************L*********************D**";
    assert_eq!(count(pattern, Mode::Parallel), 191_651);
}

#[test]
#[ignore = "long-running; use --release -- --ignored"]
fn all_wildcards() {
    assert_eq!(count(&"*".repeat(63), Mode::Parallel), 8_934_966);
}
