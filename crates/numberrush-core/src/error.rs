//! Player-facing error taxonomy for interactive selection.

use thiserror::Error;

/// Reasons an interactive pick is refused. All of these are recovered
/// locally: the pick is not committed and the selection state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The cell is not 4-adjacent to the most recently filled slot's cell.
    #[error("you can only select neighboring cells")]
    AdjacencyViolation,
    /// The cell already occupies a slot.
    #[error("this cell is already selected")]
    DuplicateCell,
    /// Every operand slot is already filled.
    #[error("all slots are filled")]
    CapacityExceeded,
    /// The picked operator would divide by zero.
    #[error("division by zero")]
    DivisionByZero,
}
