//! Physics queries
//!
//! Built on top of rapier3d. Only what line-of-sight checks need.

mod world;

pub use world::{ColliderHandle, Physics, RaycastHit, RigidBodyHandle};
