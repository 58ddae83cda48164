use bevy::prelude::*;

use crate::distance::{compute_distance, MeasureOptions};
use crate::grid::{round_to_decimals, GridGeometry};
use crate::settings::ModuleSettings;
use crate::token::{Elevation, Footprint, Selected, Token, TokenCenter, TokenShape};

/// Marker for the on-screen distance readout.
#[derive(Component)]
pub struct Tooltip;

pub fn update_tooltip(
    mut commands: Commands,
    window: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    grid: Res<GridGeometry>,
    settings: Res<ModuleSettings>,
    selected_query: Query<
        (Entity, &TokenCenter, &Footprint, &Elevation),
        (With<Token>, With<Selected>),
    >,
    token_query: Query<(Entity, &TokenCenter, &Footprint, &Elevation), With<Token>>,
    tooltip_query: Query<Entity, With<Tooltip>>,
) {
    // Remove the previous frame's tooltip.
    for entity in &tooltip_query {
        commands.entity(entity).despawn();
    }

    let Ok(window) = window.get_single() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_position) else {
        return;
    };

    // Scene coordinates grow rightwards and downwards from the top-left
    // corner of the board.
    let scene_pos = Vec2::new(
        world_pos.x + window.width() / 2.0,
        -world_pos.y + window.height() / 2.0,
    );

    // Measurements need a source: exactly one selected token.
    let Ok((source_entity, center, footprint, elevation)) = selected_query.get_single() else {
        return;
    };
    let source = TokenShape::new(center.0, *footprint, *elevation);

    // Find a hovered token that is not the source itself.
    let mut hovered = None;
    for (entity, center, footprint, elevation) in &token_query {
        if entity == source_entity {
            continue;
        }
        let shape = TokenShape::new(center.0, *footprint, *elevation);
        if shape.contains(scene_pos, grid.pixels_per_square) {
            hovered = Some(shape);
            break;
        }
    }
    let Some(target) = hovered else {
        return;
    };

    let opts = MeasureOptions {
        force_euclidean: settings.force_euclidean,
        normalize_sub_square: settings.normalize_sub_square,
    };
    let distance = compute_distance(&source, &target, &grid, opts);
    let text = format!(
        "{} {}",
        round_to_decimals(distance, settings.decimal_places),
        grid.units
    );

    let on_right_side = cursor_position.x > window.width() / 2.0;

    commands.spawn((
        Text::new(text),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: if on_right_side {
                Val::Px(cursor_position.x - 90.0)
            } else {
                Val::Px(cursor_position.x + 15.0)
            },
            top: Val::Px(cursor_position.y - 10.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.9)),
        Tooltip,
    ));
}

/// Removes any visible tooltip. Runs when the add-on leaves an active mode
/// and while a gating encounter is not running.
pub fn clear_tooltips(mut commands: Commands, tooltip_query: Query<Entity, With<Tooltip>>) {
    for entity in &tooltip_query {
        commands.entity(entity).despawn();
    }
}
