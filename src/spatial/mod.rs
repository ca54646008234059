//! Spatial conventions shared by ranking and pursuit
//!
//! The vertical axis is Y. Planar math happens on the (x, z) ground plane.

mod locate;
mod projection;

pub use locate::{Locate, PhysicsBody, WorldEntity};
pub use projection::{Planar, expand, expand_flat, flatten};
