//! Angular tie-breaking between equidistant candidates
//!
//! Bearings are measured on the (x, z) ground plane, counter-clockwise
//! positive, relative to a forward direction. A zero forward vector means
//! "measure from world +X".

use std::cmp::Ordering;
use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How two equidistant candidates are ordered by bearing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TieBreakMode {
    /// Sweep counter-clockwise starting at forward
    CounterClockwise,
    /// Sweep clockwise starting at forward
    Clockwise,
    /// Closest to straight ahead first; right side before left on a tie
    Narrowest,
    /// Furthest from straight ahead first
    Widest,
}

/// Strategy that orders two candidates by their angle around a reference point
pub trait AngleComparator {
    /// Compare `a` and `b` as seen from `reference` facing `forward`
    fn compare_angle(
        &self,
        reference: Vec2,
        forward: Vec2,
        a: Vec2,
        b: Vec2,
        mode: TieBreakMode,
    ) -> Ordering;
}

/// Default bearing-based comparator
#[derive(Debug, Clone, Copy, Default)]
pub struct BearingComparator;

impl AngleComparator for BearingComparator {
    fn compare_angle(
        &self,
        reference: Vec2,
        forward: Vec2,
        a: Vec2,
        b: Vec2,
        mode: TieBreakMode,
    ) -> Ordering {
        let bearing_a = bearing(reference, forward, a);
        let bearing_b = bearing(reference, forward, b);

        match mode {
            TieBreakMode::CounterClockwise => ccw_sweep(bearing_a).total_cmp(&ccw_sweep(bearing_b)),
            TieBreakMode::Clockwise => cw_sweep(bearing_a).total_cmp(&cw_sweep(bearing_b)),
            TieBreakMode::Narrowest => narrowest(bearing_a, bearing_b),
            TieBreakMode::Widest => narrowest(bearing_a, bearing_b).reverse(),
        }
    }
}

/// Signed counter-clockwise angle in (-PI, PI] from `forward` to `point - reference`
#[must_use]
pub fn bearing(reference: Vec2, forward: Vec2, point: Vec2) -> f32 {
    let forward = match forward.try_normalize() {
        Some(forward) => forward,
        None => Vec2::X,
    };
    let direction = point - reference;
    if direction == Vec2::ZERO {
        return 0.0;
    }
    forward.perp_dot(direction).atan2(forward.dot(direction))
}

fn ccw_sweep(bearing: f32) -> f32 {
    bearing.rem_euclid(TAU)
}

fn cw_sweep(bearing: f32) -> f32 {
    (-bearing).rem_euclid(TAU)
}

fn narrowest(a: f32, b: f32) -> Ordering {
    a.abs().total_cmp(&b.abs()).then(a.total_cmp(&b))
}
