//! Projection between spatial and planar coordinates

use glam::{Vec2, Vec3};

/// Drop the vertical (Y) axis: `(x, y, z) -> (x, z)`
#[inline]
#[must_use]
pub fn flatten(point: Vec3) -> Vec2 {
    Vec2::new(point.x, point.z)
}

/// Lift a planar point to the given height: `(x, z), h -> (x, h, z)`
#[inline]
#[must_use]
pub fn expand(point: Vec2, height: f32) -> Vec3 {
    Vec3::new(point.x, height, point.y)
}

/// Lift a planar point onto the ground plane
#[inline]
#[must_use]
pub fn expand_flat(point: Vec2) -> Vec3 {
    expand(point, 0.0)
}

/// Anything that can be viewed on the ground plane
pub trait Planar: Copy {
    /// Planar coordinates of this point
    fn planar(self) -> Vec2;
}

impl Planar for Vec2 {
    #[inline]
    fn planar(self) -> Vec2 {
        self
    }
}

impl Planar for Vec3 {
    #[inline]
    fn planar(self) -> Vec2 {
        flatten(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_drops_height() {
        assert_eq!(flatten(Vec3::new(1.0, 7.0, -2.0)), Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_flatten_expand_round_trip() {
        let p = Vec2::new(3.5, -4.25);
        for h in [0.0, 1.0, -12.5, 1.0e6] {
            assert_eq!(flatten(expand(p, h)), p);
        }

        let q = Vec3::new(-1.0, 2.5, 9.0);
        assert_eq!(expand(flatten(q), q.y), q);
    }

    #[test]
    fn test_expand_flat_is_ground_level() {
        assert_eq!(expand_flat(Vec2::new(4.0, 5.0)), Vec3::new(4.0, 0.0, 5.0));
    }

    #[test]
    fn test_planar() {
        assert_eq!(Vec2::new(1.0, 2.0).planar(), Vec2::new(1.0, 2.0));
        assert_eq!(Vec3::new(1.0, 2.0, 3.0).planar(), Vec2::new(1.0, 3.0));
    }
}
