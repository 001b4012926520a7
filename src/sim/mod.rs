//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed per-tick increments only
//! - Seeded RNG only
//! - Wall-clock time only through an injected [`Clock`] (teleport lock)
//! - No rendering, audio or storage dependencies

pub mod ball;
pub mod clock;
pub mod collision;
pub mod config;
pub mod generator;
pub mod platform;
pub mod random;
pub mod state;
pub mod tick;

pub use ball::{Ball, TeleportLock};
pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{Aabb, is_landing};
pub use config::WorldConfig;
pub use generator::{PlatformGenerator, topmost_y};
pub use platform::{Platform, PlatformKind};
pub use random::{GameRng, WeightedTable, rng_from_seed};
pub use state::{GameEvent, GamePhase, Session};
pub use tick::{SessionCommand, Steer, apply_command, tick};
