use bevy::prelude::*;

/// Grid stepping rules, i.e. how the board charges for diagonal movement.
pub enum DistanceAlg {
    /// Straight-line distance: sqrt((x2-x1)² + (y2-y1)²)
    /// Best for: gridless tables and euclidean house rules.
    Pythagoras,
    /// No diagonal movement: |x2-x1| + |y2-y1|
    /// Best for: 4-directional movement only.
    Manhattan,
    /// Diagonal costs same as cardinal: max(|x2-x1|, |y2-y1|)
    /// Best for: 8-directional movement with free diagonals.
    Chebyshev,
    /// Every second diagonal costs double: max + floor(min / 2)
    /// Best for: tables that alternate 1-2-1 diagonal costs.
    Alternating,
}

impl DistanceAlg {
    pub fn distance2d(&self, p1: Vec2, p2: Vec2) -> f32 {
        let delta = (p2 - p1).abs();

        match self {
            DistanceAlg::Pythagoras => delta.length(),
            DistanceAlg::Manhattan => delta.x + delta.y,
            DistanceAlg::Chebyshev => delta.x.max(delta.y),
            DistanceAlg::Alternating => {
                delta.x.max(delta.y) + (delta.x.min(delta.y) / 2.0).floor()
            }
        }
    }
}

/// Scene grid parameters: the add-on's view of the host board. Owned by the
/// host; the distance engine only ever reads it.
#[derive(Resource)]
pub struct GridGeometry {
    /// Edge length of one grid square, in scene pixels.
    pub pixels_per_square: f32,
    /// Distance one grid square represents, in scene units.
    pub distance_per_square: f32,
    /// Display label for the scene unit, e.g. "ft".
    pub units: String,
    pub diagonals: DistanceAlg,
}

impl Default for GridGeometry {
    fn default() -> Self {
        GridGeometry {
            pixels_per_square: 64.0,
            distance_per_square: 5.0,
            units: "ft".to_string(),
            diagonals: DistanceAlg::Chebyshev,
        }
    }
}

impl GridGeometry {
    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_square / self.distance_per_square
    }

    pub fn units_per_pixel(&self) -> f32 {
        self.distance_per_square / self.pixels_per_square
    }

    /// Snap a single pixel coordinate to the center of the cell containing it.
    pub fn snap_to_cell_center(&self, v: f32) -> f32 {
        floor_to_multiple_of(v, self.pixels_per_square) + self.pixels_per_square / 2.0
    }

    fn cell_of(&self, p: Vec2) -> Vec2 {
        (p / self.pixels_per_square).floor()
    }

    /// Grid-native distance between two pixel points, in scene units. Both
    /// points are snapped to their cells first, so the result moves in whole
    /// grid steps under the active diagonal rule.
    pub fn measure_distance(&self, p1: Vec2, p2: Vec2) -> f32 {
        let steps = self.diagonals.distance2d(self.cell_of(p1), self.cell_of(p2));
        steps * self.distance_per_square
    }
}

/// Highest multiple of `n` that is not above `x`.
pub fn floor_to_multiple_of(x: f32, n: f32) -> f32 {
    (x / n).floor() * n
}

/// Round `x` to `n` decimal places, halves away from zero.
pub fn round_to_decimals(x: f32, n: i32) -> f32 {
    let factor = 10f32.powi(n);
    (x * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(diagonals: DistanceAlg) -> GridGeometry {
        GridGeometry {
            pixels_per_square: 100.0,
            distance_per_square: 5.0,
            units: "ft".to_string(),
            diagonals,
        }
    }

    #[test]
    fn diagonal_rules_on_cell_deltas() {
        let a = Vec2::ZERO;
        let b = Vec2::new(3.0, 3.0);

        assert_eq!(DistanceAlg::Manhattan.distance2d(a, b), 6.0);
        assert_eq!(DistanceAlg::Chebyshev.distance2d(a, b), 3.0);
        // 5-10-5 style: three diagonals cost 1, 2, 1.
        assert_eq!(DistanceAlg::Alternating.distance2d(a, b), 4.0);
        assert!((DistanceAlg::Pythagoras.distance2d(a, b) - 18f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn alternating_is_orientation_independent() {
        let alg = DistanceAlg::Alternating;
        assert_eq!(
            alg.distance2d(Vec2::ZERO, Vec2::new(2.0, 5.0)),
            alg.distance2d(Vec2::ZERO, Vec2::new(5.0, 2.0)),
        );
    }

    #[test]
    fn measure_distance_steps_between_cells() {
        let grid = grid(DistanceAlg::Chebyshev);
        // Adjacent cells, one step, whatever the exact pixel positions.
        assert_eq!(grid.measure_distance(Vec2::ZERO, Vec2::new(100.0, 0.0)), 5.0);
        assert_eq!(grid.measure_distance(Vec2::new(10.0, 10.0), Vec2::new(199.0, 99.0)), 5.0);
        // Same cell measures zero.
        assert_eq!(grid.measure_distance(Vec2::new(10.0, 10.0), Vec2::new(90.0, 90.0)), 0.0);
    }

    #[test]
    fn snap_moves_to_cell_center() {
        let grid = grid(DistanceAlg::Chebyshev);
        assert_eq!(grid.snap_to_cell_center(130.0), 150.0);
        assert_eq!(grid.snap_to_cell_center(199.9), 150.0);
        assert_eq!(grid.snap_to_cell_center(-30.0), -50.0);
    }

    #[test]
    fn rounding_keeps_requested_decimals() {
        assert!((round_to_decimals(12.34, 1) - 12.3).abs() < 1e-5);
        assert!((round_to_decimals(12.35, 1) - 12.4).abs() < 1e-5);
        assert_eq!(round_to_decimals(7.5, 0), 8.0);
        assert_eq!(round_to_decimals(-7.5, 0), -8.0);
    }
}
