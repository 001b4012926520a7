//! Session state and core simulation types
//!
//! A session owns exactly one ball and one platform ladder. Everything the
//! simulation mutates lives here; renderers and audio only ever see `&Session`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::config::WorldConfig;
use super::generator::PlatformGenerator;
use super::platform::{Platform, PlatformKind};
use super::random::{GameRng, rng_from_seed};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frozen, waiting for resume (initial phase of every session)
    #[default]
    Paused,
    /// Active gameplay
    Running,
    /// Ball fell out, waiting for reset
    GameOver,
}

/// Side effects produced by a tick, consumed by audio and the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off a Normal or Fragile platform
    Jump { kind: PlatformKind },
    /// Ball was thrown to a new position by a Teleport platform
    Teleport { to: Vec2 },
    /// A Fragile platform used up its budget and was removed
    PlatformBroke,
    /// The world scrolled down by `offset`
    Scrolled { offset: f32 },
    /// The ball fell out of the world
    GameOver { score: u64 },
}

/// One play-through, from reset to game over
#[derive(Debug, Clone)]
pub struct Session {
    /// World constants, fixed for the life of the session
    pub config: WorldConfig,
    /// Seed the current ladder was generated from
    pub seed: u64,
    pub score: u64,
    pub phase: GamePhase,
    /// Cosmetic only
    pub day_mode: bool,
    /// Which ball skin to request from the asset provider
    pub skin_index: u8,
    pub ball: Ball,
    /// Live platforms, base platform first at reset
    pub platforms: Vec<Platform>,
    /// Simulated ticks since reset
    pub time_ticks: u64,
    pub(crate) generator: PlatformGenerator,
    pub(crate) rng: GameRng,
}

impl Session {
    /// Create a paused session with a fresh ladder
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        let generator = PlatformGenerator::new(&config);
        let mut rng = rng_from_seed(seed);
        let platforms = generator.seed_ladder(&mut rng);
        let ball = spawn_ball(&platforms, &config);

        Self {
            config,
            seed,
            score: 0,
            phase: GamePhase::Paused,
            day_mode: true,
            skin_index: 0,
            ball,
            platforms,
            time_ticks: 0,
            generator,
            rng,
        }
    }

    /// Start over: new ladder and ball, score and phase cleared
    ///
    /// Day/night mode and the skin selection survive the reset. The RNG keeps
    /// running so consecutive sessions get different ladders.
    pub fn reset(&mut self) {
        self.platforms = self.generator.seed_ladder(&mut self.rng);
        self.ball = spawn_ball(&self.platforms, &self.config);
        self.score = 0;
        self.phase = GamePhase::Paused;
        self.time_ticks = 0;
        log::info!("Session reset (skin {})", self.skin_index);
    }

    /// Reseed the RNG and reset
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = rng_from_seed(seed);
        self.reset();
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Place the ball above the lowest platform
fn spawn_ball(platforms: &[Platform], config: &WorldConfig) -> Ball {
    let pos = platforms
        .iter()
        .max_by(|a, b| a.top().total_cmp(&b.top()))
        .map(|base| Vec2::new(base.rect.center_x(), base.top() - config.spawn_offset))
        .unwrap_or_else(|| {
            Vec2::new(
                config.half_width(),
                config.ladder_base_y() - config.spawn_offset,
            )
        });
    Ball::new(pos, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_paused_with_ladder() {
        let session = Session::new(WorldConfig::default(), 12345);
        assert_eq!(session.phase, GamePhase::Paused);
        assert_eq!(session.score, 0);
        assert_eq!(session.platforms.len(), 8);
        assert!(session.day_mode);
        assert_eq!(session.skin_index, 0);
    }

    #[test]
    fn test_ball_spawns_above_base_platform() {
        let session = Session::new(WorldConfig::default(), 12345);
        let base = &session.platforms[0];
        assert_eq!(session.ball.pos.x, base.rect.center_x());
        assert_eq!(session.ball.pos.y, base.top() - 40.0);
        assert_eq!(session.ball.vel, Vec2::ZERO);
        assert!(session.ball.teleport_lock.is_none());
    }

    #[test]
    fn test_reset_keeps_cosmetics_and_clears_score() {
        let mut session = Session::new(WorldConfig::default(), 1);
        session.score = 42;
        session.phase = GamePhase::GameOver;
        session.day_mode = false;
        session.skin_index = 2;
        session.platforms.clear();

        session.reset();
        assert_eq!(session.score, 0);
        assert_eq!(session.phase, GamePhase::Paused);
        assert_eq!(session.platforms.len(), 8);
        assert!(!session.day_mode);
        assert_eq!(session.skin_index, 2);
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = Session::new(WorldConfig::default(), 777);
        let b = Session::new(WorldConfig::default(), 777);
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.ball, b.ball);
    }

    #[test]
    fn test_restart_reproduces_initial_ladder() {
        let mut session = Session::new(WorldConfig::default(), 31);
        let initial = session.platforms.clone();
        session.reset();
        session.restart(31);
        assert_eq!(session.platforms, initial);
    }
}
