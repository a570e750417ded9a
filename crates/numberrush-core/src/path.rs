//! Depth-first enumeration of simple adjacent-cell paths.

use crate::grid::{Position, GRID_SIZE};

/// An ordered sequence of distinct, consecutively adjacent cells.
pub type Path = Vec<Position>;

/// Lazily enumerate every simple path of exactly `length` cells.
///
/// The search starts independently from every cell in row-major order and
/// extends by the last cell's neighbors in their fixed order, skipping any
/// cell already on the path. Enumeration order is deterministic.
///
/// `length == 0` or `length > 64` yields nothing.
pub fn find_paths(length: usize) -> PathFinder {
    PathFinder::new(length)
}

/// Iterator over simple paths, driven by an explicit DFS stack.
pub struct PathFinder {
    length: usize,
    /// Current prefix of chosen cells.
    path: Vec<Position>,
    /// Untried alternatives per depth, each stored reversed so `pop` walks
    /// them in the canonical order.
    alternatives: Vec<Vec<Position>>,
}

impl PathFinder {
    fn new(length: usize) -> Self {
        let mut alternatives = Vec::new();
        if (1..=GRID_SIZE * GRID_SIZE).contains(&length) {
            let mut starts: Vec<Position> = Position::all().collect();
            starts.reverse();
            alternatives.push(starts);
        }
        Self {
            length,
            path: Vec::with_capacity(length),
            alternatives,
        }
    }
}

impl Iterator for PathFinder {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        loop {
            let top = self.alternatives.last_mut()?;
            match top.pop() {
                Some(pos) => {
                    self.path.push(pos);
                    if self.path.len() == self.length {
                        let found = self.path.clone();
                        self.path.pop();
                        return Some(found);
                    }
                    let mut next: Vec<Position> = pos
                        .neighbors()
                        .into_iter()
                        .filter(|n| !self.path.contains(n))
                        .collect();
                    next.reverse();
                    self.alternatives.push(next);
                }
                None => {
                    self.alternatives.pop();
                    self.path.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_lengths_yield_nothing() {
        assert_eq!(find_paths(0).count(), 0);
        assert_eq!(find_paths(65).count(), 0);
    }

    #[test]
    fn test_single_cell_paths() {
        let paths: Vec<Path> = find_paths(1).collect();
        assert_eq!(paths.len(), 64);
        assert_eq!(paths[0], vec![Position::new(0, 0)]);
        assert_eq!(paths[63], vec![Position::new(7, 7)]);
    }

    #[test]
    fn test_pair_count_matches_directed_edges() {
        // 8x8 grid has 2*8*7 = 112 undirected edges, each walkable both ways.
        assert_eq!(find_paths(2).count(), 224);
    }

    #[test]
    fn test_first_path_follows_neighbor_order() {
        // From (0,0): up/left are out of bounds, down precedes right.
        let first = find_paths(3).next().unwrap();
        assert_eq!(
            first,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn test_paths_are_simple_and_adjacent() {
        for path in find_paths(4) {
            assert_eq!(path.len(), 4);
            for pair in path.windows(2) {
                assert!(pair[0].is_adjacent(pair[1]));
            }
            for (i, a) in path.iter().enumerate() {
                for b in &path[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_enumeration_is_deterministic() {
        let first: Vec<Path> = find_paths(3).collect();
        let second: Vec<Path> = find_paths(3).collect();
        assert_eq!(first, second);
    }
}
