//! Hover distance tooltips for a gridded tabletop scene.
//!
//! Install [`DistanceTooltipPlugin`] and keep one token [`Selected`]: whenever
//! the cursor rests on another token, a tooltip shows the measured distance
//! between the two. The measurement core ([`compute_distance`]) is a pure
//! function and stays usable without the plugin, e.g. from macros or other
//! add-ons.

use bevy::prelude::*;

pub mod combat;
pub mod distance;
pub mod grid;
pub mod settings;
pub mod token;
pub mod tooltip;

pub use combat::{CombatEnded, CombatStarted, CombatTracker};
pub use distance::{
    closest_pair_distance, compute_distance, sample_points, MeasureOptions, MeasurementMode,
};
pub use grid::{round_to_decimals, DistanceAlg, GridGeometry};
pub use settings::ModuleSettings;
pub use token::{Elevation, Footprint, Selected, Token, TokenCenter, TokenShape};

/// What the add-on is currently doing with hover events.
#[derive(States, Clone, Copy, Default, Eq, PartialEq, Debug, Hash)]
pub enum TooltipMode {
    /// Switched off; no hover handling at all. Also the state before the
    /// settings have been resolved.
    #[default]
    Disabled,
    /// Tooltips on every hover.
    HoverOnly,
    /// Tooltips only while an encounter is running.
    CombatGated,
}

pub struct DistanceTooltipPlugin;

impl Plugin for DistanceTooltipPlugin {
    fn build(&self, app: &mut App) {
        let tooltips_active = in_state(TooltipMode::HoverOnly)
            .or(in_state(TooltipMode::CombatGated).and(combat::combat_running));

        app.init_state::<TooltipMode>()
            .init_resource::<GridGeometry>()
            .init_resource::<ModuleSettings>()
            .init_resource::<CombatTracker>()
            .add_event::<CombatStarted>()
            .add_event::<CombatEnded>()
            .add_systems(Startup, settings::load_settings)
            .add_systems(
                Update,
                (
                    settings::toggle_enabled_keybind,
                    settings::resolve_tooltip_mode,
                    combat::track_combat,
                )
                    .chain(),
            )
            .add_systems(Update, tooltip::update_tooltip.run_if(tooltips_active))
            .add_systems(
                Update,
                tooltip::clear_tooltips
                    .run_if(in_state(TooltipMode::CombatGated).and(not(combat::combat_running))),
            )
            .add_systems(OnEnter(TooltipMode::Disabled), tooltip::clear_tooltips);
    }
}
