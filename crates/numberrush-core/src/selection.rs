//! The player's in-progress chain of cells and operators.
//!
//! A thin state machine: Empty -> Partial -> Full -> Matched, plus a
//! cooperative auto-reset timer armed on a mismatched completion. The
//! running result mirrors the generator's `+ - *` semantics and uses the
//! tolerant division rule from [`crate::expr`], so the two stay consistent
//! by construction.

use crate::error::SelectionError;
use crate::expr::{apply_tolerant, Op};
use crate::grid::{Grid, Position};

/// Absolute tolerance when comparing the running result to the target.
pub const MATCH_TOLERANCE: f64 = 0.0001;
/// Time-units between a mismatched completion and the automatic reset.
pub const AUTO_RESET_DELAY: f64 = 1.5;

/// Coarse view of the selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Partial,
    Full,
    Matched,
}

/// Pending delayed reset, keyed to the selection epoch that armed it so a
/// stale timer firing after a superseding reset is ignored.
#[derive(Debug, Clone, Copy)]
struct AutoReset {
    epoch: u64,
    remaining: f64,
}

/// Tracks picked cells and operators and the derived running result.
#[derive(Debug, Clone)]
pub struct SelectionController {
    max_operands: usize,
    /// Picked cells in pick order.
    cells: Vec<Position>,
    /// Operator slots between consecutive cells; may be filled sparsely.
    ops: Vec<Option<Op>>,
    running: f64,
    matched: bool,
    /// Bumped on every reset; stale timers compare against it.
    epoch: u64,
    auto_reset: Option<AutoReset>,
}

impl SelectionController {
    pub fn new(max_operands: usize) -> Self {
        Self {
            max_operands,
            cells: Vec::with_capacity(max_operands),
            ops: vec![None; max_operands.saturating_sub(1)],
            running: 0.0,
            matched: false,
            epoch: 0,
            auto_reset: None,
        }
    }

    /// Resize for a new level. Clears everything.
    pub fn set_max_operands(&mut self, max_operands: usize) {
        self.max_operands = max_operands;
        self.ops = vec![None; max_operands.saturating_sub(1)];
        self.cells.clear();
        self.running = 0.0;
        self.matched = false;
        self.epoch += 1;
    }

    pub fn max_operands(&self) -> usize {
        self.max_operands
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn operators(&self) -> &[Option<Op>] {
        &self.ops
    }

    pub fn running_result(&self) -> f64 {
        self.running
    }

    /// First unfilled operator slot, if any.
    pub fn next_operator_slot(&self) -> Option<usize> {
        self.ops.iter().position(|op| op.is_none())
    }

    pub fn is_full(&self) -> bool {
        self.cells.len() == self.max_operands && self.ops.iter().all(|op| op.is_some())
    }

    /// Picks are refused while matched or while an auto-reset is pending.
    pub fn is_locked(&self) -> bool {
        self.matched
            || self
                .auto_reset
                .map_or(false, |pending| pending.epoch == self.epoch)
    }

    pub fn phase(&self) -> Phase {
        if self.matched {
            Phase::Matched
        } else if self.is_full() {
            Phase::Full
        } else if self.cells.is_empty() && self.ops.iter().all(|op| op.is_none()) {
            Phase::Empty
        } else {
            Phase::Partial
        }
    }

    /// Fill the next cell slot. Returns `Ok(false)` when the controller is
    /// locked (the pick is silently ignored); errors leave every slot and
    /// the running result unchanged.
    pub fn pick_cell(&mut self, grid: &Grid, pos: Position) -> Result<bool, SelectionError> {
        if self.is_locked() {
            return Ok(false);
        }
        if self.cells.len() == self.max_operands {
            return Err(SelectionError::CapacityExceeded);
        }
        if self.cells.contains(&pos) {
            return Err(SelectionError::DuplicateCell);
        }
        if let Some(last) = self.cells.last() {
            if !last.is_adjacent(pos) {
                return Err(SelectionError::AdjacencyViolation);
            }
        }
        self.cells.push(pos);
        match self.recompute(grid) {
            Ok(result) => {
                self.running = result;
                Ok(true)
            }
            Err(e) => {
                self.cells.pop();
                Err(e)
            }
        }
    }

    /// Store an operator between slots `slot` and `slot + 1`. A division by
    /// zero is refused without committing the pick.
    pub fn pick_operator(
        &mut self,
        grid: &Grid,
        slot: usize,
        op: Op,
    ) -> Result<bool, SelectionError> {
        if self.is_locked() {
            return Ok(false);
        }
        if slot >= self.ops.len() {
            return Err(SelectionError::CapacityExceeded);
        }
        let previous = self.ops[slot];
        self.ops[slot] = Some(op);
        match self.recompute(grid) {
            Ok(result) => {
                self.running = result;
                Ok(true)
            }
            Err(e) => {
                self.ops[slot] = previous;
                Err(e)
            }
        }
    }

    /// Running result over the longest prefix in which every cell and the
    /// operator before it are filled.
    fn recompute(&self, grid: &Grid) -> Result<f64, SelectionError> {
        let Some(first) = self.cells.first() else {
            return Ok(0.0);
        };
        let mut acc = grid.value(*first) as f64;
        for (i, pos) in self.cells.iter().enumerate().skip(1) {
            let Some(op) = self.ops[i - 1] else {
                break;
            };
            acc = apply_tolerant(acc, op, grid.value(*pos) as f64)?;
        }
        Ok(acc)
    }

    /// Compare against the target once every slot is filled.
    ///
    /// Returns `None` while slots remain open (or the controller is locked).
    /// On a match the state becomes Matched; on a mismatch an auto-reset is
    /// armed [`AUTO_RESET_DELAY`] time-units out and picks are refused until
    /// it fires.
    pub fn check_completion(&mut self, target: f64) -> Option<bool> {
        if self.is_locked() || !self.is_full() {
            return None;
        }
        if (self.running - target).abs() < MATCH_TOLERANCE {
            self.matched = true;
            Some(true)
        } else {
            self.auto_reset = Some(AutoReset {
                epoch: self.epoch,
                remaining: AUTO_RESET_DELAY,
            });
            Some(false)
        }
    }

    /// Advance the cooperative timer. Returns true when the pending
    /// auto-reset fires. A timer armed before a superseding reset is
    /// detected by its stale epoch and dropped without effect.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(pending) = self.auto_reset.as_mut() else {
            return false;
        };
        if pending.epoch != self.epoch {
            self.auto_reset = None;
            return false;
        }
        pending.remaining -= dt;
        if pending.remaining <= 0.0 {
            self.auto_reset = None;
            self.reset();
            return true;
        }
        false
    }

    /// Clear all slots and the running result unconditionally. Idempotent.
    pub fn reset(&mut self) {
        self.cells.clear();
        for slot in self.ops.iter_mut() {
            *slot = None;
        }
        self.running = 0.0;
        self.matched = false;
        self.epoch += 1;
    }
}
