//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::audio::Mix;
use crate::tuning::Tuning;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Relaxed,
    #[default]
    Normal,
}

impl DifficultyPreset {
    pub fn tuning(&self) -> Tuning {
        match self {
            DifficultyPreset::Relaxed => Tuning::relaxed(),
            DifficultyPreset::Normal => Tuning::default(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: DifficultyPreset,
    /// Full tuning override; wins over the preset when present
    pub tuning: Option<Tuning>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Session ===
    /// Start a new run right after the game-over notice
    pub auto_restart: bool,
    /// Fixed RNG seed for reproducible runs; random when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: DifficultyPreset::Normal,
            tuning: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            auto_restart: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Tuning to run sessions with. An override that fails validation is
    /// ignored in favour of the preset.
    pub fn effective_tuning(&self) -> Tuning {
        match self.tuning {
            Some(tuning) => match tuning.validate() {
                Ok(()) => tuning,
                Err(e) => {
                    log::warn!("Ignoring invalid tuning override: {}", e);
                    self.preset.tuning()
                }
            },
            None => self.preset.tuning(),
        }
    }

    pub fn mix(&self) -> Mix {
        Mix {
            master_volume: self.master_volume,
            sfx_volume: self.sfx_volume,
            muted: self.muted,
        }
    }

    /// Parse settings, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "mammoth_run_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Settings saved");
        }
    }

    /// Native builds have no storage
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
