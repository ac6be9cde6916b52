//! Game settings and preferences
//!
//! Native builds read a JSON file; the browser build keeps them in
//! LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::KeeperReach;
use crate::round::RoundConfig;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Round parameters (throws, cadence, flight time, catch radius, targets)
    pub round: RoundConfig,
    /// Fixed seed for target selection (None = seed from the clock)
    pub seed: Option<u64>,
    /// How device tilt maps onto the glove
    pub keeper: KeeperReach,

    // === Effects ===
    /// Kick/save/goal/whistle sounds
    pub sound: bool,
    /// Confetti burst on saves
    pub confetti: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round: RoundConfig::default(),
            seed: None,
            keeper: KeeperReach::default(),
            sound: true,
            confetti: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, validating the round parameters
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.round.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve the target seed, falling back to `fallback` (usually the clock)
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "keeper_catch_settings";

    /// Load settings from a JSON file. A missing file means defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
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
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::round::Easing;

    #[test]
    fn test_defaults_round_trip_json() {
        let json = Settings::default().to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.round.throws_total, 10);
        assert!(back.sound && back.confetti);
        assert_eq!(back.seed, None);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(
            r#"{ "seed": 42, "confetti": false, "round": { "throws_total": 5, "easing": "quad_out" } }"#,
        )
        .unwrap();
        assert_eq!(settings.seed_or(1), 42);
        assert!(!settings.confetti);
        assert_eq!(settings.round.throws_total, 5);
        assert!(matches!(settings.round.easing, Easing::QuadOut));
        assert_eq!(settings.round.interval_ms, 3000.0);
    }

    #[test]
    fn test_invalid_round_rejected() {
        let err = Settings::from_json(r#"{ "round": { "catch_radius": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, GameError::Configuration(_)));
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("keeper_catch_settings_does_not_exist.json");
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.round.throws_total, 10);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("keeper_catch_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.seed = Some(7);
        settings.round.throws_total = 4;
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.seed, Some(7));
        assert_eq!(loaded.round.throws_total, 4);
    }
}
