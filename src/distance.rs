use bevy::prelude::*;

use crate::grid::GridGeometry;
use crate::token::TokenShape;

/// How a pair of sample points is measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasurementMode {
    /// Straight-line distance through all three axes, computed in pixels and
    /// converted to scene units at the end.
    Euclidean3d,
    /// Grid-native stepping on the horizontal plane. Only sound when both
    /// tokens share an elevation.
    GridHorizontal,
    /// Grid-native stepping for the horizontal leg, straight-line for the
    /// vertical one, combined as a hypotenuse. Keeps the horizontal component
    /// consistent with on-grid measurements when elevations differ, instead
    /// of jumping to a different metric entirely.
    GridPlusVertical,
}

impl MeasurementMode {
    /// Mode selection policy: the euclidean override wins, co-planar tokens
    /// use plain grid stepping, anything else gets the hybrid.
    pub fn select(force_euclidean: bool, a: &TokenShape, b: &TokenShape) -> Self {
        if force_euclidean {
            MeasurementMode::Euclidean3d
        } else if a.elevation == b.elevation {
            MeasurementMode::GridHorizontal
        } else {
            MeasurementMode::GridPlusVertical
        }
    }
}

/// Flags consumed by the distance engine, mirroring the module settings so
/// the core stays callable without the ECS.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeasureOptions {
    pub force_euclidean: bool,
    pub normalize_sub_square: bool,
}

/// One sample point per occupied grid cell, each at the cell's center, all
/// sharing the token's elevation converted to the pixel scale.
///
/// Footprints below one cell are clamped up to a single cell; with
/// `normalize_sub_square` the clamped axis is also snapped to the center of
/// the cell the token stands in, so tiny creatures measure from their square
/// rather than from wherever inside it they happen to sit.
pub fn sample_points(
    token: &TokenShape,
    grid: &GridGeometry,
    normalize_sub_square: bool,
) -> Vec<Vec3> {
    let pixels_per_square = grid.pixels_per_square;
    let half_square = pixels_per_square / 2.0;

    // Local copies only. The caller's token is never touched.
    let mut center = token.center;
    let mut width = token.width;
    let mut height = token.height;

    if width < 1.0 {
        width = 1.0;
        if normalize_sub_square {
            center.x = grid.snap_to_cell_center(center.x);
        }
    }
    if height < 1.0 {
        height = 1.0;
        if normalize_sub_square {
            center.y = grid.snap_to_cell_center(center.y);
        }
    }

    let top_left = Vec3::new(
        center.x - half_square * (width - 1.0),
        center.y - half_square * (height - 1.0),
        token.elevation * grid.pixels_per_unit(),
    );

    let columns = width.ceil() as usize;
    let rows = height.ceil() as usize;
    let mut points = Vec::with_capacity(columns * rows);
    for i in 0..columns {
        for j in 0..rows {
            points.push(
                top_left
                    + Vec3::new(
                        pixels_per_square * i as f32,
                        pixels_per_square * j as f32,
                        0.0,
                    ),
            );
        }
    }

    points
}

/// Minimum distance between any two sample points, one drawn from each set,
/// in scene units. The grid metric is injected so the evaluator never cares
/// how the host steps across its board.
///
/// The full cartesian product is O(|a|·|b|), which stays tiny for tabletop
/// footprints, so nothing cleverer is warranted.
pub fn closest_pair_distance<F>(
    a: &[Vec3],
    b: &[Vec3],
    mode: MeasurementMode,
    units_per_pixel: f32,
    grid_distance: F,
) -> f32
where
    F: Fn(Vec2, Vec2) -> f32,
{
    assert!(
        !a.is_empty() && !b.is_empty(),
        "closest_pair_distance requires non-empty sample sets"
    );

    let mut best = f32::INFINITY;
    for p1 in a {
        for p2 in b {
            best = best.min(pair_distance(*p1, *p2, mode, units_per_pixel, &grid_distance));
        }
    }
    best
}

fn pair_distance<F>(
    p1: Vec3,
    p2: Vec3,
    mode: MeasurementMode,
    units_per_pixel: f32,
    grid_distance: &F,
) -> f32
where
    F: Fn(Vec2, Vec2) -> f32,
{
    match mode {
        MeasurementMode::Euclidean3d => (p2 - p1).length() * units_per_pixel,
        MeasurementMode::GridHorizontal => grid_distance(p1.truncate(), p2.truncate()),
        MeasurementMode::GridPlusVertical => {
            let horizontal = grid_distance(p1.truncate(), p2.truncate());
            // May be negative. hypot squares it anyway.
            let vertical = (p2.z - p1.z) * units_per_pixel;
            horizontal.hypot(vertical)
        }
    }
}

/// Distance between two tokens: the closest approach between any occupied
/// cell of one and any occupied cell of the other, under the selected
/// measurement mode.
///
/// The result is unrounded; display rounding belongs to the caller so
/// programmatic consumers keep the raw value.
pub fn compute_distance(
    a: &TokenShape,
    b: &TokenShape,
    grid: &GridGeometry,
    opts: MeasureOptions,
) -> f32 {
    let points_a = sample_points(a, grid, opts.normalize_sub_square);
    let points_b = sample_points(b, grid, opts.normalize_sub_square);
    let mode = MeasurementMode::select(opts.force_euclidean, a, b);

    closest_pair_distance(&points_a, &points_b, mode, grid.units_per_pixel(), |p1, p2| {
        grid.measure_distance(p1, p2)
    })
}
