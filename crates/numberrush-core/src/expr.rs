//! Left-to-right expression evaluation over a cell chain.
//!
//! Two evaluation rules share the `+ - *` semantics and differ only on `/`:
//!
//! - [`evaluate_exact`] is the generation-time rule. Division must be exact
//!   (integer, non-zero divisor) or the whole expression is rejected, which
//!   is what makes every generated target reachable by exact-integer play.
//! - [`apply_tolerant`] is the interactive rule the player sees. Division
//!   rounds to two decimals for display stability and only a zero divisor
//!   is an error.

use crate::error::SelectionError;
use crate::grid::{Grid, Position};
use serde::{Deserialize, Serialize};

/// An arithmetic operator placed between two chained cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub const ALL: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Op> {
        match symbol {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            _ => None,
        }
    }
}

/// Evaluate a chain under the exact-integer rule.
///
/// Seeds with the first cell's value, then folds each operator against the
/// next cell's value. Returns `None` when a division has a zero divisor or
/// is not exact; the caller drops the candidate silently.
///
/// `ops.len()` must be `path.len() - 1`.
pub fn evaluate_exact(grid: &Grid, path: &[Position], ops: &[Op]) -> Option<i64> {
    debug_assert_eq!(ops.len() + 1, path.len());
    let mut acc = grid.value(path[0]) as i64;
    for (op, &pos) in ops.iter().zip(&path[1..]) {
        let value = grid.value(pos) as i64;
        acc = match op {
            Op::Add => acc + value,
            Op::Sub => acc - value,
            Op::Mul => acc * value,
            Op::Div => {
                if value == 0 || acc % value != 0 {
                    return None;
                }
                acc / value
            }
        };
    }
    Some(acc)
}

/// Apply one operator under the interactive rule: `+ - *` as in the exact
/// evaluator, `/` rounded to two decimals, zero divisor refused.
pub fn apply_tolerant(acc: f64, op: Op, value: f64) -> Result<f64, SelectionError> {
    Ok(match op {
        Op::Add => acc + value,
        Op::Sub => acc - value,
        Op::Mul => acc * value,
        Op::Div => {
            if value == 0.0 {
                return Err(SelectionError::DivisionByZero);
            }
            (acc / value * 100.0).round() / 100.0
        }
    })
}
