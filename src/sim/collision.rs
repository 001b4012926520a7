//! Collision geometry for the ball and platforms
//!
//! Everything is axis-aligned: the ball is tested as its bounding square, and
//! a "landing" is decided by a deliberately loose heuristic rather than an
//! exact contact test.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::platform::Platform;

/// Axis-aligned rectangle, (x, y) = top-left, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Whether the ball counts as landing on the platform this tick
///
/// Requires overlap, a non-rising ball, and the ball's center sitting less
/// than one radius below the platform's top edge. The last condition is a
/// tolerance band: a ball clipping a platform's side while falling can still
/// register, which is part of the game's feel.
pub fn is_landing(ball: &Ball, ball_bounds: &Aabb, platform: &Platform) -> bool {
    ball_bounds.intersects(&platform.rect)
        && ball.vel.y >= 0.0
        && ball.pos.y < platform.top() + ball.radius
}
