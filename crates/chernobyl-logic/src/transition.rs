//! Room transition state machine.
//!
//! ```text
//! Idle ──start──▶ FadingOut { ticks_left } ──(0 ticks left: swap)──▶ FadingIn ──alpha 0──▶ Idle
//! ```
//!
//! Starting a transition makes the overlay fully opaque at once; the room swap
//! happens a few ticks later so the black frame is on screen before the room
//! content changes. Alpha decays every tick in every state, so the fade-in
//! begins while the swap is still pending, same as a timer-deferred swap.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransitionPhase {
    Idle,
    FadingOut {
        target: usize,
        dest: Point,
        ticks_left: u32,
    },
    FadingIn,
}

/// A room swap that is due this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swap {
    pub target: usize,
    pub dest: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub phase: TransitionPhase,
    /// Fade overlay opacity, 1 = black, 0 = clear.
    pub alpha: f32,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            phase: TransitionPhase::Idle,
            alpha: 0.0,
        }
    }
}

impl Transition {
    /// A swap is scheduled but has not happened yet.
    pub fn swap_pending(&self) -> bool {
        matches!(self.phase, TransitionPhase::FadingOut { .. })
    }

    /// Begin a transition. Ignored while another swap is pending.
    pub fn start(&mut self, target: usize, dest: Point, delay_ticks: u32) -> bool {
        if self.swap_pending() {
            return false;
        }
        self.phase = TransitionPhase::FadingOut {
            target,
            dest,
            ticks_left: delay_ticks,
        };
        self.alpha = 1.0;
        true
    }

    /// Advance one tick: decay the fade and count down a pending swap.
    /// Returns the swap when it becomes due.
    pub fn tick(&mut self, fade_step: f32) -> Option<Swap> {
        if self.alpha > 0.0 {
            self.alpha = (self.alpha - fade_step).max(0.0);
        }
        match self.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::FadingOut {
                target,
                dest,
                ticks_left,
            } => {
                if ticks_left <= 1 {
                    self.phase = TransitionPhase::FadingIn;
                    Some(Swap { target, dest })
                } else {
                    self.phase = TransitionPhase::FadingOut {
                        target,
                        dest,
                        ticks_left: ticks_left - 1,
                    };
                    None
                }
            }
            TransitionPhase::FadingIn => {
                if self.alpha <= 0.0 {
                    self.phase = TransitionPhase::Idle;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_makes_overlay_opaque() {
        let mut t = Transition::default();
        assert!(t.start(1, Point::new(30.0, 200.0), 3));
        assert_eq!(t.alpha, 1.0);
        assert!(t.swap_pending());
    }

    #[test]
    fn swap_fires_after_delay() {
        let mut t = Transition::default();
        t.start(2, Point::new(50.0, 50.0), 3);
        assert_eq!(t.tick(0.05), None);
        assert_eq!(t.tick(0.05), None);
        assert_eq!(
            t.tick(0.05),
            Some(Swap {
                target: 2,
                dest: Point::new(50.0, 50.0)
            })
        );
        assert_eq!(t.phase, TransitionPhase::FadingIn);
    }

    #[test]
    fn zero_delay_swaps_on_first_tick() {
        let mut t = Transition::default();
        t.start(3, Point::new(0.0, 0.0), 0);
        assert!(t.tick(0.05).is_some());
    }

    #[test]
    fn second_start_ignored_while_pending() {
        let mut t = Transition::default();
        t.start(1, Point::new(1.0, 1.0), 3);
        assert!(!t.start(2, Point::new(2.0, 2.0), 3));
        t.tick(0.05);
        t.tick(0.05);
        let swap = t.tick(0.05).expect("swap due");
        assert_eq!(swap.target, 1);
    }

    #[test]
    fn fade_decays_to_idle() {
        let mut t = Transition::default();
        t.start(1, Point::new(1.0, 1.0), 3);
        for _ in 0..25 {
            t.tick(0.05);
        }
        assert_eq!(t.alpha, 0.0);
        assert_eq!(t.phase, TransitionPhase::Idle);
    }

    #[test]
    fn idle_tick_is_inert() {
        let mut t = Transition::default();
        assert_eq!(t.tick(0.05), None);
        assert_eq!(t, Transition::default());
    }
}
