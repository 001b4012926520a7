//! Springy Ball - a vertically scrolling bouncing-ball platform game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, platforms, ladder generation, collisions, session)
//! - `game`: Fixed-rate loop driver wiring input, simulation, audio and rendering
//! - `renderer`: Draw-list construction with solid-shape fallbacks
//! - `assets`: Symbolic asset lookup with a "missing" sentinel
//! - `audio`: Sound cue playback
//! - `highscores`: Single-value high score persistence
//! - `settings`: Host preferences
//! - `input`: Device-agnostic input events and scripted input
//! - `autopilot`: Self-playing input source for the headless demo

pub mod assets;
pub mod audio;
pub mod autopilot;
pub mod game;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// World dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 400.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Ball defaults (per-tick units)
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_GRAVITY: f32 = 0.5;
    /// Negative = upward
    pub const BALL_JUMP_IMPULSE: f32 = -14.0;
    /// Horizontal speed while a move input is held
    pub const BALL_MOVE_SPEED: f32 = 6.0;
    /// Spawn height above the base platform's top edge
    pub const BALL_SPAWN_OFFSET: f32 = 40.0;
    /// Seconds the ball stays frozen after a teleport
    pub const TELEPORT_LOCK_SECS: f32 = 2.0;
    /// Teleport targets never land closer than this to the top of the world
    pub const TELEPORT_MIN_Y: f32 = 100.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 25.0;
    pub const PLATFORM_MIN_SPEED: f32 = 1.0;
    pub const PLATFORM_MAX_SPEED: f32 = 2.0;

    /// Ladder layout
    pub const LADDER_SIZE: usize = 8;
    pub const LADDER_SPACING: f32 = 70.0;
    /// Distance from the world bottom to the base platform's top edge
    pub const LADDER_BASE_OFFSET: f32 = 50.0;

    /// Platform kind weights (Normal, Fragile, Teleport)
    pub const WEIGHT_NORMAL: f32 = 0.6;
    pub const WEIGHT_FRAGILE: f32 = 0.3;
    pub const WEIGHT_TELEPORT: f32 = 0.1;

    /// Number of selectable ball skins
    pub const BALL_SKIN_COUNT: u8 = 3;
}
