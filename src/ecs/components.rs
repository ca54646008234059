//! Agent components

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::spatial::flatten;

/// Position and orientation of an agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation as a quaternion
    pub rotation: Quat,
}

impl Transform {
    /// Create a new transform at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Forward direction on the ground plane, zero when facing straight up or down
    pub fn facing(&self) -> Vec2 {
        flatten(self.forward()).normalize_or_zero()
    }

    /// Translate by a delta
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Turn to face a point on the ground plane
    pub fn face_towards(&mut self, target: Vec3) {
        let to_target = flatten(target - self.position);
        if to_target == Vec2::ZERO {
            return;
        }
        // Yaw around +Y; -Z is forward
        let yaw = (-to_target.x).atan2(-to_target.y);
        self.rotation = Quat::from_rotation_y(yaw);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Velocity component
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub linear: Vec3,
    pub angular: Vec3,
}

/// Name component for debugging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
