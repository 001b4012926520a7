//! Game loop driver
//!
//! Owns one session plus everything around it (high-score store, audio,
//! assets, clock) and runs the fixed-rate poll → update → render loop.

use std::thread;
use std::time::{Duration, Instant};

use crate::assets::{AssetProvider, NoAssets};
use crate::audio::AudioManager;
use crate::highscores::{HighScoreStore, MemoryStore};
use crate::input::{InputEvent, InputSource};
use crate::renderer::{Frame, RenderSink, build_frame};
use crate::settings::Settings;
use crate::sim::{Clock, GameEvent, Session, SystemClock, WorldConfig, apply_command, tick};

/// What the loop should do after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Why [`Game::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    TickLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub games_over: u32,
    pub high_score: u64,
    pub reason: StopReason,
}

/// Sleeps until each tick's deadline, measured from the pacer's start
#[derive(Debug, Clone)]
pub struct FramePacer {
    start: Instant,
    step: Duration,
    ticks: u64,
}

impl FramePacer {
    /// A zero step never sleeps
    pub fn new(step: Duration) -> Self {
        Self {
            start: Instant::now(),
            step,
            ticks: 0,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Block until the next tick is due. Returns how long it slept.
    pub fn wait(&mut self) -> Duration {
        self.ticks += 1;
        if self.step.is_zero() {
            return Duration::ZERO;
        }
        let offset = self.step.saturating_mul(u32::try_from(self.ticks).unwrap_or(u32::MAX));
        let Some(deadline) = self.start.checked_add(offset) else {
            return Duration::ZERO;
        };
        match deadline.checked_duration_since(Instant::now()) {
            Some(remaining) => {
                thread::sleep(remaining);
                remaining
            }
            None => Duration::ZERO,
        }
    }
}

pub struct Game {
    pub session: Session,
    settings: Settings,
    store: Box<dyn HighScoreStore>,
    high_score: u64,
    audio: AudioManager,
    assets: Box<dyn AssetProvider>,
    clock: Box<dyn Clock>,
    pacer: FramePacer,
    tick_limit: Option<u64>,
}

impl Game {
    /// Game with default world constants, an in-memory store, no assets and
    /// the system clock. Swap parts in with the `with_*` builders.
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut session = Session::new(WorldConfig::default(), seed);
        session.day_mode = settings.start_in_day_mode;
        session.skin_index = settings.skin_index % session.config.skin_count.max(1);

        let mut audio = AudioManager::default();
        settings.apply_audio(&mut audio);
        let pacer = FramePacer::new(settings.tick_duration());

        Self {
            session,
            settings,
            store: Box::new(MemoryStore::default()),
            high_score: 0,
            audio,
            assets: Box::new(NoAssets),
            clock: Box::new(SystemClock::new()),
            pacer,
            tick_limit: None,
        }
    }

    /// Replace the world constants (starts a fresh session with the same seed)
    pub fn with_config(mut self, config: WorldConfig) -> Self {
        let (day_mode, skin) = (self.session.day_mode, self.session.skin_index);
        self.session = Session::new(config, self.session.seed);
        self.session.day_mode = day_mode;
        self.session.skin_index = skin % self.session.config.skin_count.max(1);
        self
    }

    /// Use `store`, loading its high score once
    pub fn with_store(mut self, mut store: Box<dyn HighScoreStore>) -> Self {
        self.high_score = store.load();
        self.store = store;
        self
    }

    pub fn with_assets(mut self, assets: Box<dyn AssetProvider>) -> Self {
        self.assets = assets;
        self
    }

    /// Use `audio`, with the volume settings applied
    pub fn with_audio(mut self, mut audio: AudioManager) -> Self {
        self.settings.apply_audio(&mut audio);
        self.audio = audio;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Stop [`Game::run`] after this many ticks
    pub fn with_tick_limit(mut self, ticks: u64) -> Self {
        self.tick_limit = (ticks > 0).then_some(ticks);
        self
    }

    /// Run as fast as possible (no frame pacing)
    pub fn unpaced(mut self) -> Self {
        self.pacer = FramePacer::new(Duration::ZERO);
        self
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply one input event
    pub fn handle_event(&mut self, event: InputEvent) -> Flow {
        match event.command() {
            Some(command) => {
                log::debug!("Input {:?} -> {:?}", event, command);
                apply_command(&mut self.session, command);
                Flow::Continue
            }
            None => {
                log::info!("Quit requested");
                self.persist_high_score();
                Flow::Quit
            }
        }
    }

    /// Advance the simulation one tick and react to what happened
    pub fn update(&mut self) -> Vec<GameEvent> {
        let events = tick(&mut self.session, self.clock.as_ref());
        self.audio.play_events(&events, self.assets.as_mut());

        for event in &events {
            if let GameEvent::GameOver { score } = *event {
                self.record_score(score);
            }
        }
        events
    }

    /// Build the current frame
    pub fn frame(&mut self) -> Frame {
        build_frame(&self.session, self.high_score, self.assets.as_mut())
    }

    pub fn render(&mut self, sink: &mut dyn RenderSink) {
        let frame = self.frame();
        sink.present(&frame);
    }

    /// Fixed-rate loop: poll, update, render, until quit or the tick limit
    pub fn run(&mut self, input: &mut dyn InputSource, sink: &mut dyn RenderSink) -> RunSummary {
        log::info!(
            "Running at {} ticks/s (seed {})",
            self.settings.ticks_per_second,
            self.session.seed
        );
        self.pacer = FramePacer::new(self.pacer.step());

        let mut ticks = 0;
        let mut games_over = 0;
        let reason = loop {
            let mut quit = false;
            for event in input.poll(&self.session) {
                if self.handle_event(event) == Flow::Quit {
                    quit = true;
                    break;
                }
            }
            if quit {
                break StopReason::Quit;
            }

            let events = self.update();
            games_over += events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count() as u32;
            self.render(sink);

            ticks += 1;
            if self.tick_limit.is_some_and(|limit| ticks >= limit) {
                log::info!("Tick limit reached after {} ticks", ticks);
                self.persist_high_score();
                break StopReason::TickLimit;
            }
            self.pacer.wait();
        };

        RunSummary {
            ticks,
            games_over,
            high_score: self.high_score,
            reason,
        }
    }

    /// Remember `score` as the high score if it beats it, persisting once
    fn record_score(&mut self, score: u64) {
        if score <= self.high_score {
            return;
        }
        log::info!("New high score {} (was {})", score, self.high_score);
        self.high_score = score;
        self.persist_high_score();
    }

    fn persist_high_score(&mut self) {
        let best = self.high_score.max(self.session.score);
        match self.store.save(best) {
            Ok(true) => self.high_score = best,
            Ok(false) => {}
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::StoreError;
    use crate::input::ScriptedInput;
    use crate::renderer::LogRenderSink;
    use crate::sim::{GamePhase, ManualClock};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store that shares its state with the test
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl HighScoreStore for SharedStore {
        fn load(&mut self) -> u64 {
            self.0.borrow_mut().load()
        }

        fn save(&mut self, score: u64) -> Result<bool, StoreError> {
            self.0.borrow_mut().save(score)
        }
    }

    fn game_with(store: SharedStore) -> Game {
        Game::new(Settings::default(), 9)
            .with_store(Box::new(store))
            .with_clock(Box::new(ManualClock::new()))
            .unpaced()
    }

    /// Push the ball out of the bottom of the world on the next tick
    fn drop_ball(game: &mut Game) {
        game.session.phase = GamePhase::Running;
        game.session.platforms.clear();
        game.session.ball.pos.y = game.session.config.height + 1.0;
    }

    #[test]
    fn test_game_over_stores_high_score_once() {
        let store = SharedStore::default();
        let mut game = game_with(store.clone());
        drop_ball(&mut game);
        game.session.score = 15;

        let events = game.update();
        assert!(events.contains(&GameEvent::GameOver { score: 15 }));
        assert_eq!(game.session.phase, GamePhase::GameOver);
        assert_eq!(game.high_score(), 15);

        // Frozen: further ticks store nothing more
        for _ in 0..10 {
            assert!(game.update().is_empty());
        }
        assert_eq!(store.0.borrow().best, 15);
        assert_eq!(store.0.borrow().writes, 1);
    }

    #[test]
    fn test_lower_score_leaves_store_unchanged() {
        let store = SharedStore(Rc::new(RefCell::new(MemoryStore::with_score(50))));
        let mut game = game_with(store.clone());
        assert_eq!(game.high_score(), 50);

        drop_ball(&mut game);
        game.session.score = 20;
        game.update();
        assert_eq!(game.high_score(), 50);
        assert_eq!(store.0.borrow().writes, 0);
    }

    #[test]
    fn test_quit_persists_running_score() {
        let store = SharedStore::default();
        let mut game = game_with(store.clone());
        game.session.score = 4;
        assert_eq!(game.handle_event(InputEvent::Quit), Flow::Quit);
        assert_eq!(store.0.borrow().best, 4);
        assert_eq!(game.high_score(), 4);
    }

    #[test]
    fn test_day_night_is_cosmetic() {
        let mut day = game_with(SharedStore::default());
        let mut night = game_with(SharedStore::default());
        night.handle_event(InputEvent::ToggleDayNight);
        assert!(!night.session.day_mode);

        for game in [&mut day, &mut night] {
            game.handle_event(InputEvent::Resume);
            for _ in 0..120 {
                game.update();
            }
        }
        assert_eq!(day.session.ball, night.session.ball);
        assert_eq!(day.session.platforms, night.session.platforms);
        assert_eq!(day.session.score, night.session.score);
    }

    #[test]
    fn test_settings_seed_cosmetics() {
        let settings = Settings {
            start_in_day_mode: false,
            skin_index: 4,
            ..Default::default()
        };
        let game = Game::new(settings, 1);
        assert!(!game.session.day_mode);
        assert_eq!(game.session.skin_index, 1);
    }

    #[test]
    fn test_run_until_quit() {
        let mut game = game_with(SharedStore::default());
        let mut input = ScriptedInput::new([vec![InputEvent::Resume], vec![], vec![]])
            .quit_when_done();
        let mut sink = LogRenderSink::default();

        let summary = game.run(&mut input, &mut sink);
        assert_eq!(summary.reason, StopReason::Quit);
        assert_eq!(summary.ticks, 3);
        assert_eq!(sink.frames, 3);
        assert!(game.session.is_running());
    }

    #[test]
    fn test_run_stops_at_tick_limit() {
        let mut game = game_with(SharedStore::default()).with_tick_limit(25);
        let mut input = ScriptedInput::default();
        let mut sink = LogRenderSink::default();

        let summary = game.run(&mut input, &mut sink);
        assert_eq!(summary.reason, StopReason::TickLimit);
        assert_eq!(summary.ticks, 25);
        // Never resumed
        assert_eq!(game.session.phase, GamePhase::Paused);
        assert_eq!(game.session.time_ticks, 0);
    }

    #[test]
    fn test_pacer_sleeps_to_deadline() {
        let mut pacer = FramePacer::new(Duration::from_millis(5));
        let start = Instant::now();
        pacer.wait();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(9));

        let mut unpaced = FramePacer::new(Duration::ZERO);
        assert_eq!(unpaced.wait(), Duration::ZERO);
    }
}
