//! Fixed-step simulation tick and session transitions
//!
//! A tick only does work while the session is Running. The order inside a
//! tick is fixed: integrate the ball, move platforms and resolve landings,
//! scroll, prune and replenish the ladder, then check for a fall.

use glam::Vec2;
use rand::Rng;

use super::clock::Clock;
use super::collision::is_landing;
use super::config::WorldConfig;
use super::platform::PlatformKind;
use super::state::{GameEvent, GamePhase, Session};

/// Horizontal steering intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    Stop,
}

/// Commands the session understands (already stripped of device details)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Start or resume play
    Resume,
    /// Flip between Running and Paused
    TogglePause,
    /// Fresh session after a game over
    Reset,
    /// Cycle the ball skin and start a fresh session (after a game over)
    ChangeSkin,
    /// Cosmetic background switch
    ToggleDayNight,
    Steer(Steer),
}

/// Apply one command to the session state machine
///
/// Every command is total over every phase; commands that make no sense in
/// the current phase are ignored.
pub fn apply_command(session: &mut Session, command: SessionCommand) {
    match command {
        SessionCommand::Resume => {
            if session.phase == GamePhase::Paused {
                session.phase = GamePhase::Running;
            }
        }
        SessionCommand::TogglePause => match session.phase {
            GamePhase::Running => session.phase = GamePhase::Paused,
            GamePhase::Paused => session.phase = GamePhase::Running,
            GamePhase::GameOver => {}
        },
        SessionCommand::Reset => {
            if session.is_game_over() {
                session.reset();
            }
        }
        SessionCommand::ChangeSkin => {
            if session.is_game_over() {
                let count = session.config.skin_count.max(1);
                session.skin_index = (session.skin_index + 1) % count;
                session.reset();
            }
        }
        SessionCommand::ToggleDayNight => {
            session.day_mode = !session.day_mode;
        }
        SessionCommand::Steer(steer) => {
            let speed = session.config.move_speed;
            let vx = match steer {
                Steer::Left => -speed,
                Steer::Right => speed,
                Steer::Stop => 0.0,
            };
            session.ball.set_horizontal(vx);
        }
    }
}

/// Advance the session by one fixed step
///
/// Returns the side effects of the step, in the order they happened. Paused
/// and GameOver sessions are left untouched.
pub fn tick(session: &mut Session, clock: &dyn Clock) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !session.is_running() {
        return events;
    }

    session.time_ticks += 1;
    session.ball.integrate(session.config.width, clock);

    resolve_landings(session, clock, &mut events);
    scroll(session, &mut events);

    let pruned = session.generator.prune(&mut session.platforms);
    if pruned > 0 {
        log::debug!("Pruned {} platforms below the world", pruned);
    }
    session
        .generator
        .replenish(&mut session.platforms, &mut session.rng);

    if session.ball.pos.y > session.config.height {
        session.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks, score {}",
            session.time_ticks,
            session.score
        );
        events.push(GameEvent::GameOver {
            score: session.score,
        });
    }

    events
}

/// What an honored landing does to the ball
#[derive(Debug, Clone, Copy)]
enum Landing {
    Bounce { index: usize, kind: PlatformKind },
    Teleport { index: usize },
}

/// Move every platform, then apply at most one landing
///
/// Decisions are collected during the scan and applied afterwards, so a
/// platform that breaks never disturbs the iteration. Only the first platform
/// (in ladder order) that accepts the ball lands it; later overlaps in the
/// same tick are deliberately ignored, even though the pre-scan bounds could
/// still touch them after a teleport.
fn resolve_landings(session: &mut Session, clock: &dyn Clock, events: &mut Vec<GameEvent>) {
    let width = session.config.width;
    let ball_bounds = session.ball.bounds();
    let mut landing = None;

    for (index, platform) in session.platforms.iter_mut().enumerate() {
        platform.advance(width);
        if landing.is_some()
            || !platform.accepts_landing()
            || !is_landing(&session.ball, &ball_bounds, platform)
        {
            continue;
        }
        landing = Some(match platform.kind {
            PlatformKind::Teleport => Landing::Teleport { index },
            kind => Landing::Bounce { index, kind },
        });
    }

    let Some(landing) = landing else {
        return;
    };

    let index = match landing {
        Landing::Teleport { index } => {
            let to = teleport_target(&session.config, &mut session.rng);
            session.ball.teleport_to(to, clock);
            log::debug!("Teleported to ({:.0}, {:.0})", to.x, to.y);
            events.push(GameEvent::Teleport { to });
            index
        }
        Landing::Bounce { index, kind } => {
            session.ball.bounce();
            session.score += 1;
            events.push(GameEvent::Jump { kind });
            index
        }
    };

    let platform = &mut session.platforms[index];
    platform.jumps += 1;
    if platform.kind == PlatformKind::Fragile && platform.is_spent() {
        session.platforms.remove(index);
        events.push(GameEvent::PlatformBroke);
    }
}

/// Keep the ball at or below the scroll line by moving the world down
///
/// Every scroll step is also worth a point.
fn scroll(session: &mut Session, events: &mut Vec<GameEvent>) {
    let threshold = session.config.scroll_threshold();
    if session.ball.pos.y >= threshold {
        return;
    }

    let offset = threshold - session.ball.pos.y;
    session.ball.pos.y = threshold;
    for platform in &mut session.platforms {
        platform.rect.y += offset;
    }
    session.score += 1;
    events.push(GameEvent::Scrolled { offset });
}

/// Random point in the upper half of the world, clear of the side walls
fn teleport_target<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> Vec2 {
    let min_x = config.ball_radius;
    let max_x = config.width - config.ball_radius;
    let x = if max_x > min_x {
        rng.random_range(min_x..=max_x)
    } else {
        config.half_width()
    };

    let max_y = config.height / 2.0;
    let min_y = config.teleport_min_y.clamp(0.0, max_y);
    let y = if max_y > min_y {
        rng.random_range(min_y..max_y)
    } else {
        max_y / 2.0
    };

    Vec2::new(x, y)
}
