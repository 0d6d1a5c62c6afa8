//! Reference enumerator shared by the integration tests.

#![allow(dead_code)]

/// Counts walks by plain backtracking: no pruning, no bitmasks, no shared
/// code with the engine beyond the direction letters.
pub fn naive_count(width: usize, height: usize, pattern: &str) -> u64 {
    let moves: Vec<char> = pattern.chars().collect();
    let mut visited = vec![vec![false; width]; height];
    visited[0][0] = true;
    walk(&mut visited, &moves, 0, 0, 0, (height - 1, 0))
}

fn walk(
    visited: &mut [Vec<bool>],
    moves: &[char],
    index: usize,
    row: usize,
    col: usize,
    target: (usize, usize),
) -> u64 {
    if index == moves.len() {
        return ((row, col) == target) as u64;
    }

    let height = visited.len() as i64;
    let width = visited[0].len() as i64;
    let options: &[char] = match moves[index] {
        '*' => &['U', 'D', 'L', 'R'],
        'U' => &['U'],
        'D' => &['D'],
        'L' => &['L'],
        'R' => &['R'],
        other => panic!("unexpected symbol {other}"),
    };

    let mut total = 0;
    for &dir in options {
        let (dr, dc) = match dir {
            'U' => (-1, 0),
            'D' => (1, 0),
            'L' => (0, -1),
            _ => (0, 1),
        };
        let (nr, nc) = (row as i64 + dr, col as i64 + dc);
        if nr < 0 || nr >= height || nc < 0 || nc >= width {
            continue;
        }
        let (nr, nc) = (nr as usize, nc as usize);
        if visited[nr][nc] {
            continue;
        }
        visited[nr][nc] = true;
        total += walk(visited, moves, index + 1, nr, nc, target);
        visited[nr][nc] = false;
    }
    total
}

pub const FULL_WALK: &str = "DDDDDDRUUUUUURDDDDDDRUUUUUURDDDDDDRUUUUUURRDLDRDLDRDLDRDLLLLLLL";
pub const MIXED: &str = "*****DR******R******R********************R*D************L******";
