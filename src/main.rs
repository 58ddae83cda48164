use bevy::prelude::*;

use token_distance::{
    CombatEnded, CombatStarted, CombatTracker, DistanceAlg, DistanceTooltipPlugin, Elevation,
    Footprint, GridGeometry, Selected, Token, TokenCenter, TokenShape,
};

// Demo board dimensions, in grid squares.
const BOARD_WIDTH: usize = 12;
const BOARD_HEIGHT: usize = 8;
const SQUARE_PX: f32 = 64.0;
const RESOLUTION: Vec2 = Vec2 {
    x: BOARD_WIDTH as f32 * SQUARE_PX,
    y: BOARD_HEIGHT as f32 * SQUARE_PX,
};

#[derive(Component)]
struct SelectionHighlight;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Token Distance Demo".into(),
                resolution: RESOLUTION.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(GridGeometry {
            pixels_per_square: SQUARE_PX,
            distance_per_square: 5.0,
            units: "ft".to_string(),
            diagonals: DistanceAlg::Alternating,
        })
        .add_plugins(DistanceTooltipPlugin)
        .add_systems(Startup, (setup_camera, spawn_board, spawn_tokens))
        .add_systems(
            Update,
            (select_token_on_click, toggle_combat, update_selection_highlight),
        )
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Scene pixels (y-down, origin at the board's top-left corner) to world
/// coordinates for rendering.
fn scene_to_world(scene: Vec2, z: f32) -> Vec3 {
    Vec3::new(scene.x - RESOLUTION.x / 2.0, RESOLUTION.y / 2.0 - scene.y, z)
}

fn cell_center(x: usize, y: usize) -> Vec2 {
    Vec2::new(
        x as f32 * SQUARE_PX + SQUARE_PX / 2.0,
        y as f32 * SQUARE_PX + SQUARE_PX / 2.0,
    )
}

fn spawn_board(mut commands: Commands) {
    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            commands.spawn((
                Text2d::new("."),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.4, 0.4)),
                Transform::from_translation(scene_to_world(cell_center(x, y), 0.0)),
            ));
        }
    }
}

fn spawn_tokens(mut commands: Commands) {
    spawn_token(
        &mut commands,
        "Fighter",
        "@",
        Color::srgb(1.0, 1.0, 0.2),
        cell_center(2, 4),
        Footprint { width: 1.0, height: 1.0 },
        0.0,
    );
    // Large creatures center on a grid intersection.
    spawn_token(
        &mut commands,
        "Ogre",
        "O",
        Color::srgb(0.2, 0.9, 0.3),
        cell_center(7, 3) + Vec2::splat(SQUARE_PX / 2.0),
        Footprint { width: 2.0, height: 2.0 },
        0.0,
    );
    spawn_token(
        &mut commands,
        "Pixie",
        "p",
        Color::srgb(0.4, 0.7, 1.0),
        cell_center(4, 1),
        Footprint { width: 0.5, height: 0.5 },
        0.0,
    );
    spawn_token(
        &mut commands,
        "Hawk",
        "h",
        Color::srgb(1.0, 0.5, 0.2),
        cell_center(9, 6),
        Footprint { width: 1.0, height: 1.0 },
        15.0,
    );
}

fn spawn_token(
    commands: &mut Commands,
    label: &str,
    glyph: &str,
    color: Color,
    center: Vec2,
    footprint: Footprint,
    elevation: f32,
) {
    let size = Vec2::new(
        footprint.width.max(1.0) * SQUARE_PX,
        footprint.height.max(1.0) * SQUARE_PX,
    );

    commands
        .spawn((
            Token,
            Name::new(label.to_string()),
            TokenCenter(center),
            footprint,
            Elevation(elevation),
            Sprite {
                color: color.with_alpha(0.25),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(scene_to_world(center, 1.0)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new(glyph),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(color),
                Transform::from_xyz(0.0, 0.0, 0.5),
            ));
        });
}

fn select_token_on_click(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    window: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    grid: Res<GridGeometry>,
    token_query: Query<(Entity, &TokenCenter, &Footprint, &Elevation), With<Token>>,
    selected_query: Query<Entity, With<Selected>>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
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

    let scene_pos = Vec2::new(
        world_pos.x + RESOLUTION.x / 2.0,
        RESOLUTION.y / 2.0 - world_pos.y,
    );

    // Clicking empty board just clears the selection.
    for entity in &selected_query {
        commands.entity(entity).remove::<Selected>();
    }

    for (entity, center, footprint, elevation) in &token_query {
        let shape = TokenShape::new(center.0, *footprint, *elevation);
        if shape.contains(scene_pos, grid.pixels_per_square) {
            commands.entity(entity).insert(Selected);
            break;
        }
    }
}

fn update_selection_highlight(
    mut commands: Commands,
    grid: Res<GridGeometry>,
    selected_query: Query<(&TokenCenter, &Footprint), With<Selected>>,
    highlight_query: Query<Entity, With<SelectionHighlight>>,
) {
    for entity in &highlight_query {
        commands.entity(entity).despawn();
    }

    let Ok((center, footprint)) = selected_query.get_single() else {
        return;
    };

    let size = Vec2::new(
        footprint.width.max(1.0) * grid.pixels_per_square + 6.0,
        footprint.height.max(1.0) * grid.pixels_per_square + 6.0,
    );
    commands.spawn((
        Sprite {
            color: Color::srgba(1.0, 0.0, 1.0, 0.3),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(scene_to_world(center.0, 0.5)),
        SelectionHighlight,
    ));
}

/// C starts or ends a demo encounter, exercising the combat-gated mode.
fn toggle_combat(
    keyboard: Res<ButtonInput<KeyCode>>,
    tracker: Res<CombatTracker>,
    mut started: EventWriter<CombatStarted>,
    mut ended: EventWriter<CombatEnded>,
) {
    if keyboard.just_pressed(KeyCode::KeyC) {
        if tracker.active {
            ended.send(CombatEnded);
            info!("Encounter ended");
        } else {
            started.send(CombatStarted);
            info!("Encounter started");
        }
    }
}
