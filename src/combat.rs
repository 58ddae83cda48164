use bevy::prelude::*;

/// Fired by the host when an encounter begins.
#[derive(Event)]
pub struct CombatStarted;

/// Fired by the host when an encounter ends.
#[derive(Event)]
pub struct CombatEnded;

/// Whether an encounter is currently running, folded from the host's combat
/// events. `CombatGated` tooltips key off this.
#[derive(Resource, Default)]
pub struct CombatTracker {
    pub active: bool,
}

pub fn track_combat(
    mut started: EventReader<CombatStarted>,
    mut ended: EventReader<CombatEnded>,
    mut tracker: ResMut<CombatTracker>,
) {
    for _ in started.read() {
        tracker.active = true;
    }
    // An end event on the same frame wins; the encounter is over.
    for _ in ended.read() {
        tracker.active = false;
    }
}

/// Run condition for systems that only make sense mid-encounter.
pub fn combat_running(tracker: Res<CombatTracker>) -> bool {
    tracker.active
}
