//! Symbolic asset lookup
//!
//! The game asks for images and sounds by id and gets back either a handle or
//! `None`. A missing asset is never an error: the renderer draws a plain shape
//! instead and the audio manager stays silent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::audio::SoundEffect;
use crate::sim::PlatformKind;

/// Visual assets the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Background { day: bool },
    BallSkin(u8),
    Platform(PlatformKind),
}

impl ImageId {
    /// File name under the image directory
    pub fn file_name(&self) -> String {
        match self {
            ImageId::Background { day: true } => "background_day.png".to_string(),
            ImageId::Background { day: false } => "background_night.png".to_string(),
            ImageId::BallSkin(index) => format!("ball{}.png", index + 1),
            ImageId::Platform(kind) => format!("platform_{}.png", kind.as_str()),
        }
    }
}

impl SoundEffect {
    /// File name under the sound directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump.mp3",
            SoundEffect::Teleport => "teleport.mp3",
            SoundEffect::GameOver => "gameover.mp3",
        }
    }
}

/// Resolved asset, ready to hand to a rendering or audio backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle {
    pub path: PathBuf,
}

/// Source of image and sound handles
pub trait AssetProvider {
    fn image(&mut self, id: ImageId) -> Option<AssetHandle>;
    fn sound(&mut self, effect: SoundEffect) -> Option<AssetHandle>;
}

/// Provider with no assets at all; everything falls back
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn image(&mut self, _id: ImageId) -> Option<AssetHandle> {
        None
    }

    fn sound(&mut self, _effect: SoundEffect) -> Option<AssetHandle> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AssetKey {
    Image(ImageId),
    Sound(SoundEffect),
}

/// Looks assets up on disk, caching each answer (including "missing")
#[derive(Debug)]
pub struct FileAssets {
    image_dir: PathBuf,
    sound_dir: PathBuf,
    cache: HashMap<AssetKey, Option<AssetHandle>>,
}

impl FileAssets {
    pub fn new(image_dir: impl Into<PathBuf>, sound_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
            sound_dir: sound_dir.into(),
            cache: HashMap::new(),
        }
    }

    fn resolve(&mut self, key: AssetKey) -> Option<AssetHandle> {
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let path = match key {
            AssetKey::Image(id) => self.image_dir.join(id.file_name()),
            AssetKey::Sound(effect) => self.sound_dir.join(effect.file_name()),
        };
        let handle = lookup(&path);
        if handle.is_none() {
            // Logged once; the cache remembers the miss
            log::warn!("Asset {:?} not found at {}, using fallback", key, path.display());
        }
        self.cache.insert(key, handle.clone());
        handle
    }

    /// Forget cached lookups (e.g. after assets were installed)
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

fn lookup(path: &Path) -> Option<AssetHandle> {
    path.is_file().then(|| AssetHandle {
        path: path.to_path_buf(),
    })
}

impl AssetProvider for FileAssets {
    fn image(&mut self, id: ImageId) -> Option<AssetHandle> {
        self.resolve(AssetKey::Image(id))
    }

    fn sound(&mut self, effect: SoundEffect) -> Option<AssetHandle> {
        self.resolve(AssetKey::Sound(effect))
    }
}
