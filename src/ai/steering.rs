//! Steering primitives
//!
//! Planar (ground plane) velocity requests for autonomous agents.

use glam::Vec2;

/// Produces a velocity that moves an agent towards a point
pub trait Seeker {
    /// Velocity from `position` towards `target`, no faster than `max_speed`
    fn seek(&self, position: Vec2, target: Vec2, max_speed: f32) -> Vec2;
}

/// Seek behavior - head straight for the target at full speed
#[derive(Debug, Clone, Copy, Default)]
pub struct Seek;

impl Seeker for Seek {
    fn seek(&self, position: Vec2, target: Vec2, max_speed: f32) -> Vec2 {
        if max_speed <= 0.0 {
            return Vec2::ZERO;
        }
        (target - position).normalize_or_zero() * max_speed
    }
}

impl<F> Seeker for F
where
    F: Fn(Vec2, Vec2, f32) -> Vec2,
{
    fn seek(&self, position: Vec2, target: Vec2, max_speed: f32) -> Vec2 {
        self(position, target, max_speed)
    }
}
