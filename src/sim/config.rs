//! Immutable world configuration
//!
//! Built once (usually from [`crate::consts`]) and handed to the session and
//! the ladder generator. Nothing in the simulation reads ambient globals.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// World geometry, physics and ladder tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,

    pub ball_radius: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub move_speed: f32,
    pub spawn_offset: f32,
    pub teleport_lock_secs: f32,
    pub teleport_min_y: f32,

    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_min_speed: f32,
    pub platform_max_speed: f32,

    pub ladder_size: usize,
    pub ladder_spacing: f32,
    pub ladder_base_offset: f32,

    pub weight_normal: f32,
    pub weight_fragile: f32,
    pub weight_teleport: f32,

    pub skin_count: u8,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,

            ball_radius: BALL_RADIUS,
            gravity: BALL_GRAVITY,
            jump_impulse: BALL_JUMP_IMPULSE,
            move_speed: BALL_MOVE_SPEED,
            spawn_offset: BALL_SPAWN_OFFSET,
            teleport_lock_secs: TELEPORT_LOCK_SECS,
            teleport_min_y: TELEPORT_MIN_Y,

            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            platform_min_speed: PLATFORM_MIN_SPEED,
            platform_max_speed: PLATFORM_MAX_SPEED,

            ladder_size: LADDER_SIZE,
            ladder_spacing: LADDER_SPACING,
            ladder_base_offset: LADDER_BASE_OFFSET,

            weight_normal: WEIGHT_NORMAL,
            weight_fragile: WEIGHT_FRAGILE,
            weight_teleport: WEIGHT_TELEPORT,

            skin_count: BALL_SKIN_COUNT,
        }
    }
}

impl WorldConfig {
    /// Height above which the world scrolls instead of the ball rising further
    #[inline]
    pub fn scroll_threshold(&self) -> f32 {
        (self.height / 3.0).floor()
    }

    /// Top edge of the base (lowest) platform
    #[inline]
    pub fn ladder_base_y(&self) -> f32 {
        self.height - self.ladder_base_offset
    }

    /// Rightmost allowed left edge for a freshly spawned platform
    #[inline]
    pub fn platform_max_x(&self) -> f32 {
        (self.width - self.platform_width).max(0.0)
    }

    /// Horizontal midpoint, used to split pointer presses into left/right
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}
