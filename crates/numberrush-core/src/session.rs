//! View-facing facade over the whole engine.
//!
//! Owns the board, the level configuration, the selection controller and
//! the unlock progression, and maps every front-end input onto them. All
//! feedback flows out as [`GameEvent`]s drained with [`GameSession::take_events`].

use crate::events::GameEvent;
use crate::expr::Op;
use crate::grid::{Grid, Position, GRID_SIZE, MIN_CELL_VALUE};
use crate::level::{LevelConfig, LevelGenerator};
use crate::selection::SelectionController;
use serde::{Deserialize, Serialize};

/// Interaction mode. Edit rearranges the board, calculate builds the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Edit,
    Calculate,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Edit => "edit",
            Mode::Calculate => "calculate",
        }
    }
}

/// One running game: board, level, selection, mode and progression.
pub struct GameSession {
    grid: Grid,
    generator: LevelGenerator,
    selection: SelectionController,
    config: LevelConfig,
    mode: Mode,
    max_unlocked_level: u32,
    /// Cell awaiting a swap partner in edit mode.
    edit_pick: Option<Position>,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::from_generator(LevelGenerator::new())
    }

    /// Reproducible session for tests and the `--seed` flag.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_generator(LevelGenerator::with_seed(seed))
    }

    fn from_generator(mut generator: LevelGenerator) -> Self {
        let mut grid = Grid::from_values([[MIN_CELL_VALUE; GRID_SIZE]; GRID_SIZE]);
        let config = generator.load_level(1, &mut grid);
        let selection = SelectionController::new(config.max_operands);
        Self {
            grid,
            generator,
            selection,
            config,
            mode: Mode::Edit,
            max_unlocked_level: 1,
            edit_pick: None,
            events: Vec::new(),
        }
    }

    /// Restore the unlock frontier from the persisted progress record.
    pub fn restore_progress(&mut self, max_unlocked_level: u32) {
        self.max_unlocked_level = max_unlocked_level.max(1);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn max_unlocked_level(&self) -> u32 {
        self.max_unlocked_level
    }

    pub fn edit_pick(&self) -> Option<Position> {
        self.edit_pick
    }

    /// Drain the pending event queue.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle a cell pick in the current mode.
    pub fn pick_cell(&mut self, row: usize, col: usize) {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        let pos = Position::new(row, col);
        match self.mode {
            Mode::Edit => self.edit_pick_cell(pos),
            Mode::Calculate => self.calculate_pick_cell(pos),
        }
    }

    /// Edit mode: first pick marks a cell, an adjacent second pick swaps the
    /// two values, a non-adjacent second pick re-selects.
    fn edit_pick_cell(&mut self, pos: Position) {
        match self.edit_pick {
            None => self.edit_pick = Some(pos),
            Some(first) if first.is_adjacent(pos) => {
                self.grid.swap(first, pos);
                self.edit_pick = None;
                self.emit_message("Numbers swapped successfully");
            }
            Some(_) => self.edit_pick = Some(pos),
        }
    }

    fn calculate_pick_cell(&mut self, pos: Position) {
        match self.selection.pick_cell(&self.grid, pos) {
            Ok(true) => self.try_complete(),
            Ok(false) => {}
            Err(e) => self.emit_message(&e.to_string()),
        }
    }

    /// Place an operator between chain slots `slot` and `slot + 1`.
    pub fn pick_operator(&mut self, slot: usize, op: Op) {
        if self.mode != Mode::Calculate {
            return;
        }
        match self.selection.pick_operator(&self.grid, slot, op) {
            Ok(true) => self.try_complete(),
            Ok(false) => {}
            Err(e) => self.emit_message(&e.to_string()),
        }
    }

    /// Run the completion check once every slot is filled.
    fn try_complete(&mut self) {
        match self.selection.check_completion(self.config.target_sum) {
            Some(true) => {
                self.events.push(GameEvent::TargetReached);
                self.emit_message("Great job! You reached the target!");
                if self.config.level == self.max_unlocked_level {
                    self.max_unlocked_level = self.config.level + 1;
                    self.events
                        .push(GameEvent::LevelUnlocked(self.max_unlocked_level));
                }
            }
            Some(false) => {
                self.events.push(GameEvent::TargetMismatch);
                self.emit_message("Target missed! Try different numbers.");
            }
            None => {}
        }
    }

    /// Clear the in-progress selection.
    pub fn reset_selection(&mut self) {
        self.selection.reset();
        self.edit_pick = None;
        self.events.push(GameEvent::SelectionReset);
        self.emit_message("Selection reset");
    }

    /// Load a level: fresh board, fresh target, cleared selection.
    pub fn load_level(&mut self, level: u32) {
        let level = level.max(1);
        self.config = self.generator.load_level(level, &mut self.grid);
        self.selection.set_max_operands(self.config.max_operands);
        self.edit_pick = None;
        self.emit_message(&format!("Level {} loaded", level));
    }

    /// Advance to the next level if it has been unlocked.
    pub fn next_level(&mut self) {
        let next = self.config.level + 1;
        if next > self.max_unlocked_level {
            self.emit_message("Reach the target to unlock the next level");
            return;
        }
        self.load_level(next);
    }

    /// Switch interaction mode. Always clears the selection.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.selection.reset();
        self.edit_pick = None;
        self.emit_message(&format!("Switched to {} mode", mode.label()));
    }

    /// Advance the cooperative timer queue (auto-reset after a mismatch).
    pub fn tick(&mut self, dt: f64) {
        if self.selection.tick(dt) {
            self.events.push(GameEvent::SelectionReset);
            self.emit_message("Selection reset");
        }
    }

    fn emit_message(&mut self, text: &str) {
        self.events.push(GameEvent::Message(text.to_string()));
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_candidates;
    use crate::selection::{Phase, AUTO_RESET_DELAY};

    fn drain(session: &mut GameSession) -> Vec<GameEvent> {
        session.take_events()
    }

    /// Replay a generated candidate through the interactive path.
    fn replay_candidate(session: &mut GameSession, path: &[Position], ops: &[Op]) {
        for pos in path {
            session.pick_cell(pos.row, pos.col);
        }
        for (slot, op) in ops.iter().enumerate() {
            session.pick_operator(slot, *op);
        }
    }

    #[test]
    fn test_generated_target_is_winnable_interactively() {
        let mut session = GameSession::with_seed(42);
        session.set_mode(Mode::Calculate);
        drain(&mut session);

        let target = session.config().target_sum;
        let candidates = build_candidates(session.grid(), session.config().max_operands);
        let winning = candidates
            .iter()
            .find(|c| (c.result as f64 - target).abs() < 1e-9)
            .expect("generated target must be reachable")
            .clone();

        replay_candidate(&mut session, &winning.path, &winning.ops);

        let events = drain(&mut session);
        assert!(events.contains(&GameEvent::TargetReached));
        assert!(events.contains(&GameEvent::LevelUnlocked(2)));
        assert_eq!(session.max_unlocked_level(), 2);
        assert_eq!(session.selection().phase(), Phase::Matched);
    }

    #[test]
    fn test_mismatch_emits_event_and_auto_resets() {
        let mut session = GameSession::with_seed(42);
        session.set_mode(Mode::Calculate);
        drain(&mut session);

        let target = session.config().target_sum;
        let candidates = build_candidates(session.grid(), session.config().max_operands);
        let losing = candidates
            .iter()
            .find(|c| (c.result as f64 - target).abs() > 0.5)
            .expect("some candidate misses the target")
            .clone();

        replay_candidate(&mut session, &losing.path, &losing.ops);

        let events = drain(&mut session);
        assert!(events.contains(&GameEvent::TargetMismatch));
        assert_eq!(session.max_unlocked_level(), 1);

        // Picks are refused until the auto-reset fires
        session.tick(AUTO_RESET_DELAY / 2.0);
        assert!(session.selection().is_locked());
        session.tick(AUTO_RESET_DELAY);
        let events = drain(&mut session);
        assert!(events.contains(&GameEvent::SelectionReset));
        assert_eq!(session.selection().phase(), Phase::Empty);
    }

    #[test]
    fn test_edit_mode_swaps_adjacent_cells() {
        let mut session = GameSession::with_seed(7);
        assert_eq!(session.mode(), Mode::Edit);
        let a = session.grid().value(Position::new(0, 0));
        let b = session.grid().value(Position::new(0, 1));

        session.pick_cell(0, 0);
        assert_eq!(session.edit_pick(), Some(Position::new(0, 0)));
        session.pick_cell(0, 1);
        assert_eq!(session.edit_pick(), None);
        assert_eq!(session.grid().value(Position::new(0, 0)), b);
        assert_eq!(session.grid().value(Position::new(0, 1)), a);
    }

    #[test]
    fn test_edit_mode_non_adjacent_reselects() {
        let mut session = GameSession::with_seed(7);
        let before = session.grid().values();
        session.pick_cell(0, 0);
        session.pick_cell(5, 5);
        // No swap happened, the later cell is now the marked one
        assert_eq!(session.grid().values(), before);
        assert_eq!(session.edit_pick(), Some(Position::new(5, 5)));
    }

    #[test]
    fn test_mode_switch_resets_selection() {
        let mut session = GameSession::with_seed(11);
        session.set_mode(Mode::Calculate);
        session.pick_cell(3, 3);
        assert_eq!(session.selection().cells().len(), 1);
        session.set_mode(Mode::Edit);
        assert_eq!(session.selection().phase(), Phase::Empty);
    }

    #[test]
    fn test_level_load_resets_and_resizes() {
        let mut session = GameSession::with_seed(11);
        session.set_mode(Mode::Calculate);
        session.pick_cell(3, 3);
        session.load_level(6);
        assert_eq!(session.config().level, 6);
        assert_eq!(session.config().max_operands, 3);
        assert_eq!(session.selection().max_operands(), 3);
        assert_eq!(session.selection().phase(), Phase::Empty);
    }

    #[test]
    fn test_next_level_gated_by_unlock() {
        let mut session = GameSession::with_seed(11);
        session.next_level();
        assert_eq!(session.config().level, 1);
        session.restore_progress(3);
        session.next_level();
        assert_eq!(session.config().level, 2);
    }

    #[test]
    fn test_adjacency_violation_surfaces_as_message() {
        let mut session = GameSession::with_seed(11);
        session.set_mode(Mode::Calculate);
        drain(&mut session);
        session.pick_cell(0, 0);
        session.pick_cell(7, 7);
        let events = drain(&mut session);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Message(m) if m.contains("neighboring"))));
        assert_eq!(session.selection().cells().len(), 1);
    }

    #[test]
    fn test_reset_selection_idempotent() {
        let mut session = GameSession::with_seed(11);
        session.set_mode(Mode::Calculate);
        session.pick_cell(2, 2);
        session.reset_selection();
        session.reset_selection();
        assert_eq!(session.selection().phase(), Phase::Empty);
        assert_eq!(session.selection().running_result(), 0.0);
    }
}
