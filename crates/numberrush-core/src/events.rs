//! Discrete notifications the engine emits for the front end.

use serde::{Deserialize, Serialize};

/// Events drained by the view layer after each input. The engine never
/// renders; these are its only outward side channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Transient status text.
    Message(String),
    /// A new level became playable.
    LevelUnlocked(u32),
    /// The running result matched the target.
    TargetReached,
    /// All slots were filled but the result missed the target.
    TargetMismatch,
    /// The selection was cleared (explicitly or by the auto-reset timer).
    SelectionReset,
}
