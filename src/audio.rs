//! Sound cue playback
//!
//! The simulation only reports events; this module decides which of them make
//! a sound and hands the resolved asset to a backend. No asset, no sound.

use crate::assets::{AssetHandle, AssetProvider};
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball bounced off a platform
    Jump,
    /// Ball was teleported
    Teleport,
    /// Ball fell out of the world
    GameOver,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jump { .. } => Some(SoundEffect::Jump),
            GameEvent::Teleport { .. } => Some(SoundEffect::Teleport),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::PlatformBroke | GameEvent::Scrolled { .. } => None,
        }
    }
}

/// Plays a resolved sound asset
pub trait AudioBackend {
    fn play(&mut self, sound: &AssetHandle, volume: f32);
}

/// Backend that only logs what would have played
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, sound: &AssetHandle, volume: f32) {
        log::debug!("Playing {} at volume {:.2}", sound.path.display(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect. Returns whether anything was played.
    pub fn play(&mut self, effect: SoundEffect, assets: &mut dyn AssetProvider) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return false;
        }
        let Some(sound) = assets.sound(effect) else {
            return false;
        };
        self.backend.play(&sound, vol);
        true
    }

    /// Play the cues for a tick's events, in order
    pub fn play_events(&mut self, events: &[GameEvent], assets: &mut dyn AssetProvider) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect, assets);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ImageId, NoAssets};
    use crate::sim::PlatformKind;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    /// Every sound exists at "<name>"
    struct AllSounds;

    impl AssetProvider for AllSounds {
        fn image(&mut self, _id: ImageId) -> Option<AssetHandle> {
            None
        }

        fn sound(&mut self, effect: SoundEffect) -> Option<AssetHandle> {
            Some(AssetHandle {
                path: PathBuf::from(effect.file_name()),
            })
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<(PathBuf, f32)>>>);

    impl AudioBackend for Recorder {
        fn play(&mut self, sound: &AssetHandle, volume: f32) {
            self.0.borrow_mut().push((sound.path.clone(), volume));
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let jump = GameEvent::Jump {
            kind: PlatformKind::Fragile,
        };
        assert_eq!(SoundEffect::for_event(&jump), Some(SoundEffect::Jump));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver { score: 3 }),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::PlatformBroke), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scrolled { offset: 1.0 }),
            None
        );
    }

    #[test]
    fn test_play_events_in_order() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(0.5);

        let events = [
            GameEvent::Teleport {
                to: glam::Vec2::new(1.0, 2.0),
            },
            GameEvent::Scrolled { offset: 3.0 },
            GameEvent::GameOver { score: 9 },
        ];
        audio.play_events(&events, &mut AllSounds);

        let played = recorder.0.borrow();
        assert_eq!(
            *played,
            vec![
                (PathBuf::from("teleport.mp3"), 0.5),
                (PathBuf::from("gameover.mp3"), 0.5),
            ]
        );
    }

    #[test]
    fn test_missing_sound_is_silent() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        assert!(!audio.play(SoundEffect::Jump, &mut NoAssets));
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_muted_is_silent() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
        assert!(!audio.play(SoundEffect::Jump, &mut AllSounds));
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut audio = AudioManager::default();
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.5);
    }
}
