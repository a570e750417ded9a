//! Core engine for NumberRush, a number-chain puzzle on an 8x8 grid.
//!
//! The player is shown a grid of small digits and a level-specific target.
//! In calculate mode they chain mutually adjacent cells together with
//! `+ - * /` operators so that evaluating the chain left-to-right hits the
//! target; in edit mode they may swap adjacent cells to rearrange the board.
//!
//! The engine is pure: it owns the grid, the level configuration and the
//! in-progress selection, and reports everything the front end needs as
//! plain data plus discrete [`GameEvent`]s. It performs no rendering and no
//! persistence.
//!
//! Level generation guarantees that every non-fallback target is actually
//! reachable from the displayed board: [`catalog::build_candidates`]
//! enumerates simple adjacent-cell paths and every operator assignment over
//! them, evaluates each under exact integer division, and the generator
//! picks one surviving result as the target.

pub mod catalog;
pub mod error;
pub mod events;
pub mod expr;
pub mod grid;
pub mod level;
pub mod path;
pub mod rng;
pub mod selection;
pub mod session;

pub use catalog::{build_candidates, Candidate, MAX_TARGET};
pub use error::SelectionError;
pub use events::GameEvent;
pub use expr::{evaluate_exact, Op};
pub use grid::{Grid, Position, GRID_SIZE, MAX_CELL_VALUE, MIN_CELL_VALUE};
pub use level::{operand_count, LevelConfig, LevelGenerator};
pub use path::{find_paths, Path, PathFinder};
pub use rng::SimpleRng;
pub use selection::{Phase, SelectionController, AUTO_RESET_DELAY, MATCH_TOLERANCE};
pub use session::{GameSession, Mode};
