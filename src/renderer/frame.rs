//! Frame construction from a session snapshot

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::assets::{AssetHandle, AssetProvider, ImageId};
use crate::sim::{Aabb, GamePhase, PlatformKind, Session};

/// Ball sprites are drawn at this size, centered on the ball
pub const BALL_SPRITE_SIZE: f32 = 60.0;
/// The night background is oversized by this much in each dimension
pub const NIGHT_BACKGROUND_MARGIN: f32 = 100.0;

const CIRCLE_SEGMENTS: u32 = 24;

// HUD rows, as offsets from the top / vertical center
const SCORE_Y: f32 = 10.0;
const HIGHSCORE_Y: f32 = 35.0;
const PAUSE_HINT_OFFSET: f32 = 20.0;
const GAME_OVER_OFFSET: f32 = 50.0;
const SKIN_HINT_OFFSET: f32 = 80.0;

/// One entry in the draw list, in painter's order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: [f32; 4] },
    /// Image asset scaled into `rect`
    Sprite { image: AssetHandle, rect: Aabb },
    /// Solid triangles
    Shape { vertices: Vec<Vertex> },
    /// Line of text, horizontally centered, top edge at `y`
    Text {
        text: String,
        y: f32,
        color: [f32; 4],
    },
}

/// Read-only summary of what a frame shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
    pub day_mode: bool,
    pub skin_index: u8,
    pub ball_pos: Vec2,
    pub platform_count: usize,
}

impl FrameSnapshot {
    pub fn of(session: &Session, high_score: u64) -> Self {
        Self {
            score: session.score,
            high_score,
            phase: session.phase,
            day_mode: session.day_mode,
            skin_index: session.skin_index,
            ball_pos: session.ball.pos,
            platform_count: session.platforms.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub snapshot: FrameSnapshot,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Text lines in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of sprite commands
    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Sprite { .. }))
            .count()
    }
}

/// Presents frames on some surface
pub trait RenderSink {
    fn present(&mut self, frame: &Frame);
}

/// Sink that logs a one-line frame summary at trace level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderSink {
    pub frames: u64,
}

impl RenderSink for LogRenderSink {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        let s = &frame.snapshot;
        log::trace!(
            "frame {}: {:?} score={} best={} ball=({:.1}, {:.1}) platforms={} commands={}",
            self.frames,
            s.phase,
            s.score,
            s.high_score,
            s.ball_pos.x,
            s.ball_pos.y,
            s.platform_count,
            frame.commands.len()
        );
    }
}

/// Build the draw list for the current session
pub fn build_frame(session: &Session, high_score: u64, assets: &mut dyn AssetProvider) -> Frame {
    let config = &session.config;
    let mut commands = Vec::with_capacity(session.platforms.len() + 6);

    // Background
    match assets.image(ImageId::Background {
        day: session.day_mode,
    }) {
        Some(image) => {
            let margin = if session.day_mode {
                0.0
            } else {
                NIGHT_BACKGROUND_MARGIN
            };
            commands.push(DrawCommand::Sprite {
                image,
                rect: Aabb::new(0.0, 0.0, config.width + margin, config.height + margin),
            });
        }
        None => commands.push(DrawCommand::Clear {
            color: if session.day_mode {
                colors::BACKGROUND_DAY
            } else {
                colors::BACKGROUND_NIGHT
            },
        }),
    }

    // Platforms
    for platform in &session.platforms {
        match assets.image(ImageId::Platform(platform.kind)) {
            Some(image) => commands.push(DrawCommand::Sprite {
                image,
                rect: platform.rect,
            }),
            None => commands.push(DrawCommand::Shape {
                vertices: shapes::rect(&platform.rect, platform_color(platform.kind)),
            }),
        }
    }

    // Ball
    let ball = &session.ball;
    match assets.image(ImageId::BallSkin(session.skin_index)) {
        Some(image) => {
            let half = BALL_SPRITE_SIZE / 2.0;
            commands.push(DrawCommand::Sprite {
                image,
                rect: Aabb::new(
                    ball.pos.x - half,
                    ball.pos.y - half,
                    BALL_SPRITE_SIZE,
                    BALL_SPRITE_SIZE,
                ),
            });
        }
        None => commands.push(DrawCommand::Shape {
            vertices: shapes::circle(ball.pos, ball.radius, colors::BALL, CIRCLE_SEGMENTS),
        }),
    }

    // HUD
    let mid = (config.height / 2.0).floor();
    let mut text = |text: String, y: f32, color: [f32; 4]| {
        commands.push(DrawCommand::Text { text, y, color });
    };
    text(format!("Score: {}", session.score), SCORE_Y, colors::TEXT);
    text(format!("Highscore: {}", high_score), HIGHSCORE_Y, colors::TEXT);
    match session.phase {
        GamePhase::Paused => text(
            "PAUSED (P to resume)".to_string(),
            mid + PAUSE_HINT_OFFSET,
            colors::TEXT_ALERT,
        ),
        GamePhase::GameOver => {
            text(
                "Game over! Press R".to_string(),
                mid + GAME_OVER_OFFSET,
                colors::TEXT_ALERT,
            );
            text(
                "S to change skin".to_string(),
                mid + SKIN_HINT_OFFSET,
                colors::TEXT_HINT,
            );
        }
        GamePhase::Running => {}
    }

    Frame {
        snapshot: FrameSnapshot::of(session, high_score),
        commands,
    }
}

fn platform_color(kind: PlatformKind) -> [f32; 4] {
    match kind {
        PlatformKind::Normal => colors::PLATFORM_NORMAL,
        PlatformKind::Fragile => colors::PLATFORM_FRAGILE,
        PlatformKind::Teleport => colors::PLATFORM_TELEPORT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NoAssets;
    use crate::audio::SoundEffect;
    use crate::sim::WorldConfig;
    use std::path::PathBuf;

    /// Every image exists under its file name
    struct AllImages;

    impl AssetProvider for AllImages {
        fn image(&mut self, id: ImageId) -> Option<AssetHandle> {
            Some(AssetHandle {
                path: PathBuf::from(id.file_name()),
            })
        }

        fn sound(&mut self, _effect: SoundEffect) -> Option<AssetHandle> {
            None
        }
    }

    fn session() -> Session {
        Session::new(WorldConfig::default(), 5)
    }

    #[test]
    fn test_missing_assets_fall_back_to_shapes() {
        let session = session();
        let frame = build_frame(&session, 0, &mut NoAssets);

        assert_eq!(
            frame.commands[0],
            DrawCommand::Clear {
                color: colors::BACKGROUND_DAY
            }
        );
        assert_eq!(frame.sprite_count(), 0);
        let shapes = frame
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Shape { .. }))
            .count();
        // Every platform plus the ball
        assert_eq!(shapes, session.platforms.len() + 1);

        // Base platform is Normal, drawn green
        match &frame.commands[1] {
            DrawCommand::Shape { vertices } => {
                assert_eq!(vertices[0].color, colors::PLATFORM_NORMAL)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_night_fallback_color() {
        let mut session = session();
        session.day_mode = false;
        let frame = build_frame(&session, 0, &mut NoAssets);
        assert_eq!(
            frame.commands[0],
            DrawCommand::Clear {
                color: colors::BACKGROUND_NIGHT
            }
        );
    }

    #[test]
    fn test_sprite_layout() {
        let mut session = session();
        session.day_mode = false;
        session.skin_index = 2;
        let frame = build_frame(&session, 0, &mut AllImages);

        assert_eq!(frame.sprite_count(), session.platforms.len() + 2);
        match &frame.commands[0] {
            DrawCommand::Sprite { image, rect } => {
                assert_eq!(image.path, PathBuf::from("background_night.png"));
                assert_eq!((rect.w, rect.h), (500.0, 700.0));
            }
            other => panic!("unexpected {other:?}"),
        }

        let ball = frame
            .commands
            .iter()
            .find_map(|cmd| match cmd {
                DrawCommand::Sprite { image, rect } if image.path.ends_with("ball3.png") => {
                    Some(*rect)
                }
                _ => None,
            })
            .unwrap();
        assert_eq!((ball.w, ball.h), (60.0, 60.0));
        assert!((ball.center_x() - session.ball.pos.x).abs() < 1e-3);
        assert!((ball.y + 30.0 - session.ball.pos.y).abs() < 1e-3);
    }

    #[test]
    fn test_hud_by_phase() {
        let mut session = session();
        session.score = 7;

        let paused = build_frame(&session, 12, &mut NoAssets);
        let lines: Vec<&str> = paused.texts().collect();
        assert_eq!(
            lines,
            vec!["Score: 7", "Highscore: 12", "PAUSED (P to resume)"]
        );

        session.phase = GamePhase::Running;
        let running = build_frame(&session, 12, &mut NoAssets);
        assert_eq!(running.texts().count(), 2);

        session.phase = GamePhase::GameOver;
        let over = build_frame(&session, 12, &mut NoAssets);
        let lines: Vec<&str> = over.texts().collect();
        assert_eq!(lines[2], "Game over! Press R");
        assert_eq!(lines[3], "S to change skin");
        let skin_hint_y = over.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Text { text, y, color } if text == "S to change skin" => {
                Some((*y, *color))
            }
            _ => None,
        });
        assert_eq!(skin_hint_y, Some((380.0, colors::TEXT_HINT)));
    }

    #[test]
    fn test_snapshot_mirrors_session() {
        let session = session();
        let frame = build_frame(&session, 3, &mut NoAssets);
        assert_eq!(frame.snapshot.high_score, 3);
        assert_eq!(frame.snapshot.platform_count, 8);
        assert_eq!(frame.snapshot.ball_pos, session.ball.pos);
        assert_eq!(frame.snapshot.phase, GamePhase::Paused);
    }

    #[test]
    fn test_log_sink_counts_frames() {
        let session = session();
        let frame = build_frame(&session, 0, &mut NoAssets);
        let mut sink = LogRenderSink::default();
        sink.present(&frame);
        sink.present(&frame);
        assert_eq!(sink.frames, 2);
    }
}
