//! Frame events: what happened during one simulation step.
//!
//! The step function returns these instead of logging or drawing directly;
//! front-ends log them and tests assert on them.

use serde::{Deserialize, Serialize};

use crate::rooms::ItemKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Touched a key-locked door without a key.
    DoorLocked { door: usize },
    KeyUsed { keys_left: u32 },
    TransitionStarted { from: usize, to: usize },
    RoomEntered { room: usize },
    ItemPicked { kind: ItemKind, hp: f32, keys: u32 },
    PlayerHurt { enemy: usize, damage: f32, hp: f32 },
    EnemyDisabled { room: usize, enemy: usize },
    /// Emitted exactly once, on the tick the player's hit points run out.
    GameOver { tick: u64 },
}
