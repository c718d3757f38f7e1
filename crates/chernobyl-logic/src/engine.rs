//! Game engine - owns the world and drives fixed-rate ticks.

use crate::config::GameConfig;
use crate::constants::TICKS_PER_SECOND;
use crate::events::GameEvent;
use crate::input::{Direction, InputState};
use crate::render::{build_frame, DrawCommand};
use crate::rooms::CatalogError;
use crate::step::step;
use crate::world::World;

/// Upper bound on ticks run by a single [`GameEngine::update`] call, so a long
/// stall (window drag, breakpoint) does not fast-forward the game.
const MAX_TICKS_PER_UPDATE: u32 = 5;

/// Main loop driver
pub struct GameEngine {
    pub world: World,
    config: GameConfig,
    input: InputState,
    /// Unsimulated time carried between updates, in seconds.
    accumulator: f64,
}

impl GameEngine {
    /// Build the world from the built-in catalog. Fails if the catalog does
    /// not validate against `config`.
    pub fn new(config: GameConfig) -> Result<Self, CatalogError> {
        let world = World::new(&config)?;
        Ok(Self::with_world(world, config))
    }

    pub fn with_world(world: World, config: GameConfig) -> Self {
        Self {
            world,
            config,
            input: InputState::default(),
            accumulator: 0.0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    pub fn press(&mut self, dir: Direction) {
        self.input.press(dir);
    }

    pub fn release(&mut self, dir: Direction) {
        self.input.release(dir);
    }

    pub fn is_game_over(&self) -> bool {
        self.world.is_game_over()
    }

    /// Run exactly one simulation step with the currently held keys.
    /// No-op once the game is over.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if self.world.is_game_over() {
            return Vec::new();
        }
        step(&mut self.world, &self.input, &self.config)
    }

    /// Run `n` ticks with the currently held keys.
    pub fn run_ticks(&mut self, n: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            if self.world.is_game_over() {
                break;
            }
            events.extend(self.tick());
        }
        events
    }

    /// Advance by wall-clock time, running as many fixed 60 Hz ticks as fit.
    pub fn update(&mut self, delta_seconds: f32) -> Vec<GameEvent> {
        let dt = 1.0 / TICKS_PER_SECOND;
        self.accumulator += f64::from(delta_seconds.max(0.0));

        let mut ticks = 0;
        let mut events = Vec::new();
        while self.accumulator >= dt && ticks < MAX_TICKS_PER_UPDATE {
            self.accumulator -= dt;
            ticks += 1;
            events.extend(self.tick());
        }
        if ticks == MAX_TICKS_PER_UPDATE {
            self.accumulator = self.accumulator.min(dt);
        }
        events
    }

    /// Draw list for the current state. Never mutates the world.
    pub fn frame(&self) -> Vec<DrawCommand> {
        build_frame(&self.world)
    }
}
