//! Pure game logic for Chernobyl Explorer.
//!
//! This crate contains everything that is independent of a window or graphics
//! backend. The world is a plain value, the simulation step is a function over
//! it, and rendering produces a list of draw commands, so every rule is
//! unit-testable headless and the Bevy viewer stays a thin shell.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`color`] | Backend-agnostic RGBA color |
//! | [`config`] | JSON-loadable tuning (speeds, damage, fade, canvas) |
//! | [`constants`] | Default tuning numbers, all per tick |
//! | [`engine`] | Loop driver: held input, fixed-rate ticks, game-over gating |
//! | [`events`] | Per-tick event list returned by the step |
//! | [`geometry`] | Rectangle overlap and canvas clamping |
//! | [`input`] | Level-triggered directional key state |
//! | [`render`] | Read-only draw-list builder |
//! | [`rooms`] | The four authored rooms and catalog validation |
//! | [`step`] | One simulation tick: move, collide, doors, hazards, items, enemies |
//! | [`transition`] | Fade-out → swap → fade-in state machine |
//! | [`world`] | Player and world state |

pub mod color;
pub mod config;
pub mod constants;
pub mod engine;
pub mod events;
pub mod geometry;
pub mod input;
pub mod render;
pub mod rooms;
pub mod step;
pub mod transition;
pub mod world;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::GameConfig;
    pub use crate::engine::GameEngine;
    pub use crate::events::GameEvent;
    pub use crate::input::{Direction, InputState};
    pub use crate::render::{DrawCommand, TextAlign};
    pub use crate::world::{Phase, World};
}
