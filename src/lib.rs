//! Thunder Fighter - A vertical arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, buffs, boss)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed logical tick rate (all speeds and timers are per tick)
    pub const TICK_RATE: u32 = 60;

    /// Default stage dimensions
    pub const STAGE_WIDTH: f32 = 480.0;
    pub const STAGE_HEIGHT: f32 = 800.0;

    /// Projectile cap after every deferred merge
    pub const MAX_PLAYER_PROJECTILES: usize = 600;

    /// Distance below which the area push uses the fallback direction
    pub const PUSH_EPSILON: f32 = 1e-4;
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Square box of side `side` anchored at `min`
    pub fn square(min: Vec2, side: f32) -> Self {
        Self::new(min, Vec2::splat(side))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict point containment (points on the edge are outside)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_strict() {
        let r = Rect::square(Vec2::new(10.0, 10.0), 20.0);
        assert!(r.contains(Vec2::new(20.0, 20.0)));
        assert!(!r.contains(Vec2::new(10.0, 20.0)));
        assert!(!r.contains(Vec2::new(30.0, 20.0)));
        assert!(!r.contains(Vec2::new(20.0, 31.0)));
    }

    #[test]
    fn test_rect_extents() {
        let r = Rect::square(Vec2::new(-5.0, -5.0), 20.0);
        assert_eq!(r.max(), Vec2::new(15.0, 15.0));
        assert_eq!(r.center(), Vec2::new(5.0, 5.0));
    }
}
