use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use crate::TooltipMode;

#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_FILE: &str = "token-distance.json";

// ============================================================================
// Settings Resource
// ============================================================================

/// Client-side add-on settings. Read from disk once at startup; the distance
/// engine only ever sees these as plain flags.
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ModuleSettings {
    /// Master switch for the whole add-on.
    pub enabled: bool,
    /// Show tooltips only while an encounter is running.
    pub only_in_combat: bool,
    /// Measure straight lines in 3-D instead of grid stepping.
    pub force_euclidean: bool,
    /// Snap sub-square creatures to the center of their cell before sampling.
    pub normalize_sub_square: bool,
    /// Decimal places kept when the tooltip renders a distance.
    pub decimal_places: i32,
}

impl Default for ModuleSettings {
    fn default() -> Self {
        ModuleSettings {
            enabled: true,
            only_in_combat: false,
            force_euclidean: false,
            normalize_sub_square: true,
            decimal_places: 1,
        }
    }
}

// ============================================================================
// Persistence
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub fn load_settings(mut settings: ResMut<ModuleSettings>) {
    if !Path::new(SETTINGS_FILE).exists() {
        return;
    }

    let Ok(json) = fs::read_to_string(SETTINGS_FILE) else {
        warn!("Failed to read {SETTINGS_FILE}, keeping default settings");
        return;
    };

    match serde_json::from_str::<ModuleSettings>(&json) {
        Ok(loaded) => *settings = loaded,
        Err(err) => warn!("Malformed {SETTINGS_FILE} ({err}), keeping default settings"),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_settings() {}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_settings(settings: &ModuleSettings) {
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(err) = fs::write(SETTINGS_FILE, json) {
                warn!("Failed to write {SETTINGS_FILE}: {err}");
            }
        }
        Err(err) => warn!("Failed to serialize settings: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_settings(_settings: &ModuleSettings) {}

// ============================================================================
// Keybinds
// ============================================================================

/// F2 flips the whole add-on on or off at runtime and persists the flag,
/// mirroring the settings screen.
pub fn toggle_enabled_keybind(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<ModuleSettings>,
) {
    if keyboard.just_pressed(KeyCode::F2) {
        settings.enabled = !settings.enabled;
        if settings.enabled {
            info!("Distance tooltips enabled");
        } else {
            info!("Distance tooltips disabled");
        }
        save_settings(&settings);
    }
}

// ============================================================================
// Mode Resolution
// ============================================================================

/// Recomputes the tooltip state whenever the settings change. Explicit state
/// transitions instead of ad-hoc enable flags; runs on the frame the resource
/// is first inserted too, which establishes the initial state.
pub fn resolve_tooltip_mode(
    settings: Res<ModuleSettings>,
    state: Res<State<TooltipMode>>,
    mut next_state: ResMut<NextState<TooltipMode>>,
) {
    if !settings.is_changed() {
        return;
    }

    let target = if !settings.enabled {
        TooltipMode::Disabled
    } else if settings.only_in_combat {
        TooltipMode::CombatGated
    } else {
        TooltipMode::HoverOnly
    };

    if *state.get() != target {
        next_state.set(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_settings_screen() {
        let settings = ModuleSettings::default();
        assert!(settings.enabled);
        assert!(!settings.only_in_combat);
        assert!(!settings.force_euclidean);
        assert!(settings.normalize_sub_square);
        assert_eq!(settings.decimal_places, 1);
    }

    #[test]
    fn partial_settings_files_fall_back_to_defaults() {
        let settings: ModuleSettings = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert!(!settings.enabled);
        assert!(settings.normalize_sub_square);
        assert_eq!(settings.decimal_places, 1);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = ModuleSettings {
            enabled: false,
            only_in_combat: true,
            force_euclidean: true,
            normalize_sub_square: false,
            decimal_places: 2,
        };

        let json = serde_json::to_string_pretty(&settings).unwrap();
        let reloaded: ModuleSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, settings);
    }
}
