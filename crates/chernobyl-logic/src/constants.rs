//! Game constants: canvas size, player defaults, tuning numbers.
//!
//! All rates are per simulation step (one tick), not per second. The viewer
//! runs ticks at a fixed 60 Hz to match the frame cadence these were tuned at.
//! [`crate::config::GameConfig`] defaults to these values.

pub mod canvas {
    pub const WIDTH: f32 = 600.0;
    pub const HEIGHT: f32 = 400.0;
}

pub mod player {
    pub const SIZE: f32 = 24.0;
    pub const SPEED: f32 = 4.0;
    pub const HP_MAX: f32 = 100.0;
    /// Damage the player deals to an enemy per tick of contact.
    pub const CONTACT_DAMAGE: f32 = 20.0;
    /// Per-axis displacement away from an enemy on contact.
    pub const KNOCKBACK: f32 = 10.0;
}

pub mod enemy {
    /// Enemies closer than this pursue. Measured between top-left corners.
    pub const PURSUIT_RADIUS: f32 = 300.0;
}

pub mod items {
    pub const MEDKIT_HEAL: f32 = 40.0;
}

pub mod transition {
    /// Fade alpha lost per tick.
    pub const FADE_STEP: f32 = 0.05;
    /// Ticks between triggering a door and swapping rooms (~50 ms at 60 Hz).
    pub const SWAP_DELAY_TICKS: u32 = 3;
}

pub mod background {
    /// Skyline drift per tick.
    pub const DRIFT: f32 = 0.2;
    pub const SKYLINE_BUILDINGS: usize = 20;
    pub const SKYLINE_SEED: u64 = 1986;
}

/// Fixed simulation rate used by the viewer.
pub const TICKS_PER_SECOND: f64 = 60.0;
