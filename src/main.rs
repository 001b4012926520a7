//! Springy Ball entry point
//!
//! Headless native runner: loads settings, wires the file-backed high score
//! and assets, and lets the autopilot play a few sessions.

use std::path::Path;
use std::process::ExitCode;

use springy_ball::assets::FileAssets;
use springy_ball::autopilot::Autopilot;
use springy_ball::renderer::LogRenderSink;
use springy_ball::sim::SystemClock;
use springy_ball::{Game, JsonFileStore, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Springy Ball (native) starting...");

    let settings = Settings::load(Path::new(Settings::FILE_NAME));
    let seed: u64 = rand::random();

    let store = JsonFileStore::open(&settings.highscore_file);
    let assets = FileAssets::new(&settings.image_dir, &settings.sound_dir);
    let mut pilot = Autopilot::new(settings.demo_sessions);
    let tick_limit = settings.demo_max_ticks;

    let mut game = Game::new(settings, seed)
        .with_store(Box::new(store))
        .with_assets(Box::new(assets))
        .with_clock(Box::new(SystemClock::new()))
        .with_tick_limit(tick_limit);

    let mut sink = LogRenderSink::default();
    let summary = game.run(&mut pilot, &mut sink);
    log::info!(
        "Stopped ({:?}) after {} ticks, {} of {} demo games, high score {}",
        summary.reason,
        summary.ticks,
        pilot.finished(),
        summary.games_over,
        summary.high_score
    );

    ExitCode::SUCCESS
}
