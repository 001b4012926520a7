//! Demo autopilot
//!
//! An input source that plays the game by itself: it starts sessions, steers
//! the ball under the next platform, resets after a game over and quits once
//! it has played enough sessions.

use crate::input::{InputEvent, InputSource};
use crate::sim::{GamePhase, Platform, PlatformKind, Session, Steer};

#[derive(Debug, Clone)]
pub struct Autopilot {
    max_sessions: u32,
    finished: u32,
    steering: Steer,
}

impl Autopilot {
    /// Play `max_sessions` sessions (at least one) and then quit
    pub fn new(max_sessions: u32) -> Self {
        Self {
            max_sessions: max_sessions.max(1),
            finished: 0,
            steering: Steer::Stop,
        }
    }

    /// Sessions that ended in a game over so far
    pub fn finished(&self) -> u32 {
        self.finished
    }

    fn steer(&mut self, want: Steer) -> Vec<InputEvent> {
        if want == self.steering {
            return Vec::new();
        }
        self.steering = want;
        vec![match want {
            Steer::Left => InputEvent::MoveLeftStart,
            Steer::Right => InputEvent::MoveRightStart,
            Steer::Stop => InputEvent::MoveRightStop,
        }]
    }
}

/// Platform the ball should come down on next
///
/// Falling: the closest platform below. Rising: the closest platform above
/// that the jump can still clear. Teleport platforms are avoided unless
/// nothing else is in reach.
pub fn target_platform(session: &Session) -> Option<&Platform> {
    let ball = &session.ball;
    let falling = ball.vel.y >= 0.0;
    // Height still to climb before the apex
    let reach = if ball.gravity > 0.0 && !falling {
        ball.vel.y * ball.vel.y / (2.0 * ball.gravity)
    } else {
        0.0
    };

    let candidates = session.platforms.iter().filter(|p| {
        if falling {
            p.top() > ball.pos.y
        } else {
            p.top() > ball.pos.y - reach + ball.radius
        }
    });
    let distance = |p: &&Platform| (p.top() - ball.pos.y).abs();

    candidates
        .clone()
        .filter(|p| p.kind != PlatformKind::Teleport)
        .min_by(|a, b| distance(a).total_cmp(&distance(b)))
        .or_else(|| candidates.min_by(|a, b| distance(a).total_cmp(&distance(b))))
}

impl InputSource for Autopilot {
    fn poll(&mut self, session: &Session) -> Vec<InputEvent> {
        match session.phase {
            GamePhase::Paused => {
                self.steering = Steer::Stop;
                vec![InputEvent::Resume]
            }
            GamePhase::GameOver => {
                self.finished += 1;
                log::info!(
                    "Autopilot session {}/{} over, score {}",
                    self.finished,
                    self.max_sessions,
                    session.score
                );
                if self.finished >= self.max_sessions {
                    vec![InputEvent::Quit]
                } else {
                    vec![InputEvent::Reset]
                }
            }
            GamePhase::Running => {
                let ball_x = session.ball.pos.x;
                let aim = target_platform(session)
                    .map(|p| p.rect.center_x())
                    .unwrap_or_else(|| session.config.half_width());
                let dead_zone = session.config.platform_width / 4.0;

                let want = if aim < ball_x - dead_zone {
                    Steer::Left
                } else if aim > ball_x + dead_zone {
                    Steer::Right
                } else {
                    Steer::Stop
                };
                self.steer(want)
            }
        }
    }
}
