//! Candidate catalog: every (path, operator-sequence) pair that evaluates
//! to a usable target.

use crate::expr::{evaluate_exact, Op};
use crate::grid::Grid;
use crate::path::{find_paths, Path};

/// Upper bound on candidate results. Keeps displayed targets readable.
pub const MAX_TARGET: i64 = 100;

/// One fully evaluated (path, operators) combination considered as a
/// possible level target.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: Path,
    pub ops: Vec<Op>,
    /// Exact integer result of evaluating the chain left-to-right.
    pub result: i64,
    /// Fraction of distinct operators used, in (0, 1] for any non-trivial
    /// chain. A proxy for how interesting the required expression is.
    pub complexity: f64,
}

/// Enumerate all candidates of `operand_count` cells on this board.
///
/// For each simple path, every one of the `4^(operand_count-1)` operator
/// assignments is evaluated under the exact rule; only positive integer
/// results up to [`MAX_TARGET`] survive. Output is grouped by path in
/// enumeration order, then by operator-assignment order.
pub fn build_candidates(grid: &Grid, operand_count: usize) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    if operand_count == 0 {
        return candidates;
    }
    let gaps = operand_count - 1;
    let assignments = 4usize.pow(gaps as u32);

    for path in find_paths(operand_count) {
        let mut ops = vec![Op::Add; gaps];
        for code in 0..assignments {
            // Base-4 odometer over the operator slots
            let mut rest = code;
            for slot in ops.iter_mut() {
                *slot = Op::ALL[rest % 4];
                rest /= 4;
            }
            if let Some(result) = evaluate_exact(grid, &path, &ops) {
                if (1..=MAX_TARGET).contains(&result) {
                    candidates.push(Candidate {
                        path: path.clone(),
                        ops: ops.clone(),
                        result,
                        complexity: complexity_of(&ops),
                    });
                }
            }
        }
    }
    candidates
}

/// Distinct operators used over the number of available operators.
fn complexity_of(ops: &[Op]) -> f64 {
    let mut seen = [false; 4];
    for op in ops {
        seen[*op as usize] = true;
    }
    seen.iter().filter(|s| **s).count() as f64 / Op::ALL.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GRID_SIZE;
    use crate::rng::SimpleRng;

    #[test]
    fn test_results_are_positive_integers_in_range() {
        let mut rng = SimpleRng::with_seed(42);
        let grid = Grid::random(&mut rng);
        let candidates = build_candidates(&grid, 3);
        assert!(!candidates.is_empty());
        for c in &candidates {
            assert!(c.result >= 1 && c.result <= MAX_TARGET);
        }
    }

    #[test]
    fn test_reevaluation_reproduces_result() {
        let mut rng = SimpleRng::with_seed(7);
        let grid = Grid::random(&mut rng);
        for c in build_candidates(&grid, 3) {
            assert_eq!(evaluate_exact(&grid, &c.path, &c.ops), Some(c.result));
        }
    }

    #[test]
    fn test_operator_count_matches_path() {
        let mut rng = SimpleRng::with_seed(3);
        let grid = Grid::random(&mut rng);
        for c in build_candidates(&grid, 4) {
            assert_eq!(c.path.len(), 4);
            assert_eq!(c.ops.len(), 3);
        }
    }

    #[test]
    fn test_complexity_is_distinct_fraction() {
        assert_eq!(complexity_of(&[Op::Add, Op::Add]), 0.25);
        assert_eq!(complexity_of(&[Op::Add, Op::Mul]), 0.5);
        assert_eq!(complexity_of(&[Op::Add, Op::Sub, Op::Mul]), 0.75);
        assert_eq!(complexity_of(&[Op::Add, Op::Sub, Op::Mul, Op::Div]), 1.0);
    }

    #[test]
    fn test_known_board_pairs() {
        // All-twos board: for two operands the reachable results are
        // 2+2=4, 2-2=0 (dropped), 2*2=4 and 2/2=1.
        let grid = Grid::from_values([[2u8; GRID_SIZE]; GRID_SIZE]);
        let candidates = build_candidates(&grid, 2);
        // 224 directed adjacent pairs, 3 surviving assignments each
        assert_eq!(candidates.len(), 224 * 3);
        for c in &candidates {
            assert!(c.result == 4 || c.result == 1);
            assert_eq!(c.complexity, 0.25);
        }
    }

    #[test]
    fn test_zero_operands_yield_nothing() {
        let grid = Grid::from_values([[2u8; GRID_SIZE]; GRID_SIZE]);
        assert!(build_candidates(&grid, 0).is_empty());
    }
}
