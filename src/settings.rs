//! Game settings and preferences
//!
//! Persisted as JSON next to the executable (or wherever the host points).
//! A missing or unreadable settings file is not an error; defaults apply.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::AudioManager;
use crate::consts::TICKS_PER_SECOND;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks (and frames) per second
    pub ticks_per_second: u32,

    // === Files ===
    /// Directory holding background, ball and platform images
    pub image_dir: PathBuf,
    /// Directory holding sound effects
    pub sound_dir: PathBuf,
    /// High score record
    pub highscore_file: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Presentation ===
    /// Start in day mode (false = night background)
    pub start_in_day_mode: bool,
    /// Initial ball skin
    pub skin_index: u8,

    // === Demo ===
    /// Sessions the headless autopilot plays before quitting
    pub demo_sessions: u32,
    /// Hard cap on ticks per demo run (0 = no cap)
    pub demo_max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,

            image_dir: PathBuf::from("images"),
            sound_dir: PathBuf::from("sounds"),
            highscore_file: PathBuf::from("highscore.json"),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            start_in_day_mode: true,
            skin_index: 0,

            demo_sessions: 3,
            demo_max_ticks: 60 * 60 * 5,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "settings.json";

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from `path`, reporting why it failed
    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Frame period for the fixed-rate loop
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.ticks_per_second.max(1)))
    }

    /// Push the audio preferences into an audio manager
    pub fn apply_audio(&self, audio: &mut AudioManager) {
        audio.set_master_volume(self.master_volume);
        audio.set_sfx_volume(self.sfx_volume);
        audio.set_muted(self.muted);
    }
}
