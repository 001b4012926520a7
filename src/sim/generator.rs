//! Procedural platform ladder
//!
//! The ladder is a fixed number of platforms stacked upward at a constant
//! spacing. Platforms that scroll off the bottom are pruned and new ones are
//! stacked on top, so the ladder never runs out.

use rand::Rng;

use super::collision::Aabb;
use super::config::WorldConfig;
use super::platform::{Platform, PlatformKind};
use super::random::WeightedTable;

/// Creates and recycles platforms for a session
#[derive(Debug, Clone)]
pub struct PlatformGenerator {
    config: WorldConfig,
    kinds: WeightedTable<PlatformKind>,
}

impl PlatformGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        let kinds = WeightedTable::new([
            (config.weight_normal, PlatformKind::Normal),
            (config.weight_fragile, PlatformKind::Fragile),
            (config.weight_teleport, PlatformKind::Teleport),
        ])
        .unwrap_or_else(|| {
            log::warn!("No positive platform weights configured, generating Normal platforms only");
            WeightedTable::single(PlatformKind::Normal)
        });
        log::debug!("Platform kind odds: {:?}", kinds.probabilities());

        Self {
            config: config.clone(),
            kinds,
        }
    }

    /// Build a fresh ladder from the bottom up
    ///
    /// The first (lowest) platform is a stationary Normal one so the ball
    /// always has a safe start.
    pub fn seed_ladder<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Platform> {
        let size = self.config.ladder_size.max(1);
        let mut ladder = Vec::with_capacity(size);
        let mut y = self.config.ladder_base_y();

        ladder.push(self.base_platform(rng, y));
        for _ in 1..size {
            y -= self.config.ladder_spacing;
            ladder.push(self.random_platform(rng, y));
        }

        log::debug!("Seeded ladder with {} platforms", ladder.len());
        ladder
    }

    /// Stack new platforms on top until the ladder is back to target size
    pub fn replenish<R: Rng + ?Sized>(&self, ladder: &mut Vec<Platform>, rng: &mut R) {
        let target = self.config.ladder_size.max(1);
        while ladder.len() < target {
            let platform = match topmost_y(ladder) {
                Some(top) => self.random_platform(rng, top - self.config.ladder_spacing),
                // Nothing left to stack on: restart from the base row
                None => self.base_platform(rng, self.config.ladder_base_y()),
            };
            ladder.push(platform);
        }
    }

    /// Drop platforms that have scrolled past the bottom of the world
    ///
    /// Returns how many were removed.
    pub fn prune(&self, ladder: &mut Vec<Platform>) -> usize {
        let before = ladder.len();
        let bottom = self.config.height;
        ladder.retain(|p| p.top() < bottom);
        before - ladder.len()
    }

    fn base_platform<R: Rng + ?Sized>(&self, rng: &mut R, y: f32) -> Platform {
        Platform::new(self.rect_at(self.random_x(rng), y), 0.0, PlatformKind::Normal)
    }

    fn random_platform<R: Rng + ?Sized>(&self, rng: &mut R, y: f32) -> Platform {
        let x = self.random_x(rng);
        let speed = self.random_speed(rng);
        let kind = self.kinds.sample(rng);
        Platform::new(self.rect_at(x, y), speed, kind)
    }

    fn random_x<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let max_x = self.config.platform_max_x();
        if max_x > 0.0 {
            rng.random_range(0.0..=max_x)
        } else {
            0.0
        }
    }

    fn random_speed<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let min = self.config.platform_min_speed;
        let max = self.config.platform_max_speed;
        let magnitude = if max > min {
            rng.random_range(min..max)
        } else {
            min
        };
        if rng.random_bool(0.5) {
            magnitude
        } else {
            -magnitude
        }
    }

    fn rect_at(&self, x: f32, y: f32) -> Aabb {
        Aabb::new(x, y, self.config.platform_width, self.config.platform_height)
    }
}

/// Top edge of the highest platform (smallest y)
pub fn topmost_y(ladder: &[Platform]) -> Option<f32> {
    ladder.iter().map(Platform::top).reduce(f32::min)
}
