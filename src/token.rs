use bevy::prelude::*;

/// A placed game piece on the board.
#[derive(Component)]
pub struct Token;

/// Token center in scene pixels (x grows right, y grows down, origin at the
/// board's top-left corner).
#[derive(Component, Clone, Copy)]
pub struct TokenCenter(pub Vec2);

/// Occupied rectangular area in grid cells. May be fractional for sub-square
/// creatures; the sampler clamps anything below one cell.
#[derive(Component, Clone, Copy)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

/// Height above the board plane, in scene distance units.
#[derive(Component, Clone, Copy, Default)]
pub struct Elevation(pub f32);

/// The measurement source. The host keeps at most one token selected.
#[derive(Component)]
pub struct Selected;

/// Read-only snapshot of the token state the distance engine consumes.
/// Building one never borrows the live token mutably.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TokenShape {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub elevation: f32,
}

impl TokenShape {
    pub fn new(center: Vec2, footprint: Footprint, elevation: Elevation) -> Self {
        TokenShape {
            center,
            width: footprint.width,
            height: footprint.height,
            elevation: elevation.0,
        }
    }

    /// Whether a scene point falls inside the token's drawn footprint.
    /// Sub-square tokens still occupy a full cell visually, hence the clamp.
    pub fn contains(&self, p: Vec2, pixels_per_square: f32) -> bool {
        let half_extent = Vec2::new(
            self.width.max(1.0) * pixels_per_square / 2.0,
            self.height.max(1.0) * pixels_per_square / 2.0,
        );
        (p - self.center).abs().cmple(half_extent).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_uses_clamped_extent() {
        let shape = TokenShape {
            center: Vec2::new(100.0, 100.0),
            width: 0.5,
            height: 0.5,
            elevation: 0.0,
        };

        // Hit test covers the whole cell even though the creature is smaller.
        assert!(shape.contains(Vec2::new(130.0, 70.0), 64.0));
        assert!(!shape.contains(Vec2::new(150.0, 100.0), 64.0));
    }
}
