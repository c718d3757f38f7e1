//! Level-triggered directional input.
//!
//! Front-ends record key presses and releases into an [`InputState`]; the
//! simulation reads it once per tick. Opposite keys held together cancel.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Input with exactly the given keys held.
    pub fn held(dirs: &[Direction]) -> Self {
        let mut input = Self::NONE;
        for &d in dirs {
            input.press(d);
        }
        input
    }

    pub fn press(&mut self, dir: Direction) {
        self.set(dir, true);
    }

    pub fn release(&mut self, dir: Direction) {
        self.set(dir, false);
    }

    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Per-axis displacement for one tick at `speed`.
    pub fn displacement(&self, speed: f32) -> (f32, f32) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.up {
            dy -= speed;
        }
        if self.down {
            dy += speed;
        }
        if self.left {
            dx -= speed;
        }
        if self.right {
            dx += speed;
        }
        (dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut input = InputState::default();
        input.press(Direction::Left);
        assert!(input.is_held(Direction::Left));
        input.release(Direction::Left);
        assert_eq!(input, InputState::NONE);
    }

    #[test]
    fn diagonal_moves_both_axes() {
        let input = InputState::held(&[Direction::Up, Direction::Right]);
        assert_eq!(input.displacement(4.0), (4.0, -4.0));
    }

    #[test]
    fn opposite_keys_cancel() {
        let input = InputState::held(&[Direction::Left, Direction::Right, Direction::Down]);
        assert_eq!(input.displacement(4.0), (0.0, 4.0));
    }
}
