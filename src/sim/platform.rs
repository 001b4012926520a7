//! Platforms the ball bounces on

use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Bounces the ball, any number of times
    #[default]
    Normal,
    /// Bounces once, then breaks
    Fragile,
    /// Throws the ball into the upper half of the world
    Teleport,
}

impl PlatformKind {
    /// Landings allowed before the platform stops reacting (None = unlimited)
    pub fn max_jumps(&self) -> Option<u32> {
        match self {
            PlatformKind::Fragile => Some(1),
            PlatformKind::Normal | PlatformKind::Teleport => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKind::Normal => "normal",
            PlatformKind::Fragile => "fragile",
            PlatformKind::Teleport => "teleport",
        }
    }
}

/// A moving rectangular platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Aabb,
    /// Horizontal velocity per tick
    pub speed: f32,
    pub kind: PlatformKind,
    /// Honored landings so far
    pub jumps: u32,
}

impl Platform {
    pub fn new(rect: Aabb, speed: f32, kind: PlatformKind) -> Self {
        Self {
            rect,
            speed,
            kind,
            jumps: 0,
        }
    }

    /// Slide sideways, reflecting off either wall
    ///
    /// Position is never clamped; the platform may sit on or past a wall for a
    /// tick before the reversed speed carries it back.
    pub fn advance(&mut self, world_width: f32) {
        self.rect.x += self.speed;
        if self.rect.left() <= 0.0 || self.rect.right() >= world_width {
            self.speed = -self.speed;
        }
    }

    /// Whether another landing would still be honored
    pub fn accepts_landing(&self) -> bool {
        self.kind.max_jumps().is_none_or(|max| self.jumps < max)
    }

    /// Whether the jump budget is used up
    pub fn is_spent(&self) -> bool {
        self.kind.max_jumps().is_some_and(|max| self.jumps >= max)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.top()
    }
}
