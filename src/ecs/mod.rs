//! Entity Component System module
//!
//! Agents live in a hecs world and expose their position through [`Transform`].

mod components;
mod world;

pub use components::{Name, Transform, Velocity};
pub use world::World;
