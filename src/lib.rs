//! Spatial helpers for autonomous agents
//!
//! This crate provides:
//! - Distance ranking of candidates around an agent, with angular tie-breaks
//! - Pursuit prediction that steers towards where a target is heading
//! - Line-of-sight queries on top of rapier3d
//! - Adapters from ECS entities and physics bodies to positions

pub mod ai;
pub mod core;
pub mod ecs;
pub mod physics;
pub mod spatial;

// Re-exports for convenience
pub use glam;
pub use hecs;
pub use rapier3d;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{
        DistanceComparer, Granularity, Pursuer, Pursuit, PursuitError, ReferenceFrame, Seek,
        Seeker, SortByDistance, TieBreakMode, pursue,
    };
    pub use crate::core::{ConfigError, Time, ToolkitConfig};
    pub use crate::ecs::{Name, Transform, Velocity, World};
    pub use crate::physics::{Physics, RigidBodyHandle};
    pub use crate::spatial::{Locate, Planar, expand, flatten};
    pub use glam::{Quat, Vec2, Vec3};
}
