//! The bouncing ball

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::collision::Aabb;
use super::config::WorldConfig;

/// Teleport lock: while armed, physics integration is suspended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeleportLock {
    /// Clock time at which the lock was armed
    pub armed_at: Duration,
}

/// The single live ball of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Added to vy every integrated tick
    pub gravity: f32,
    /// Vertical velocity set on a bounce (negative = upward)
    pub jump_impulse: f32,
    /// How long a teleport freezes the ball
    pub lock_duration: Duration,
    pub teleport_lock: Option<TeleportLock>,
}

impl Ball {
    pub fn new(pos: Vec2, config: &WorldConfig) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: config.ball_radius,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            lock_duration: lock_duration(config.teleport_lock_secs),
            teleport_lock: None,
        }
    }

    /// Whether the teleport lock is armed and still inside its cooldown
    pub fn is_locked(&self, clock: &dyn Clock) -> bool {
        self.teleport_lock
            .is_some_and(|lock| clock.now().saturating_sub(lock.armed_at) < self.lock_duration)
    }

    /// Advance one tick of motion
    ///
    /// Frozen while the teleport lock holds. Only the horizontal axis is
    /// clamped; falling out or rising past the scroll line is the resolver's
    /// business.
    pub fn integrate(&mut self, world_width: f32, clock: &dyn Clock) {
        if self.is_locked(clock) {
            return;
        }
        self.teleport_lock = None;

        self.vel.y += self.gravity;
        self.pos += self.vel;
        self.clamp_horizontal(world_width);
    }

    /// Keep the ball fully inside the side walls
    pub fn clamp_horizontal(&mut self, world_width: f32) {
        let max_x = (world_width - self.radius).max(self.radius);
        self.pos.x = self.pos.x.clamp(self.radius, max_x);
    }

    /// Relocate instantly and freeze for the lock duration
    pub fn teleport_to(&mut self, pos: Vec2, clock: &dyn Clock) {
        self.pos = pos;
        self.vel.y = 0.0;
        self.teleport_lock = Some(TeleportLock {
            armed_at: clock.now(),
        });
    }

    /// Launch upward off a platform
    pub fn bounce(&mut self) {
        self.vel.y = self.jump_impulse;
    }

    /// Horizontal input: -1 (left), 0 (stop) or 1 (right) times the move speed
    pub fn set_horizontal(&mut self, vx: f32) {
        self.vel.x = vx;
    }

    /// Axis-aligned bounding square used for platform tests
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

/// Non-finite or out-of-range lock lengths saturate instead of panicking
fn lock_duration(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs.max(0.0)).unwrap_or(Duration::MAX)
}
