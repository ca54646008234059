//! Adapters from host objects to optional positions
//!
//! Anything the ranking and pursuit code consumes goes through [`Locate`].
//! Absence is an ordinary value: a despawned entity, a removed rigid body
//! or a `None` all locate to `None`.

use glam::{Vec2, Vec3};
use hecs::Entity;

use crate::ecs::{Transform, World};
use crate::physics::{Physics, RigidBodyHandle};

use super::projection::expand_flat;

/// Resolves to an optional 3D position
pub trait Locate {
    /// Current world position, or `None` if the candidate is absent
    fn locate(&self) -> Option<Vec3>;
}

impl Locate for Vec3 {
    fn locate(&self) -> Option<Vec3> {
        Some(*self)
    }
}

impl Locate for Vec2 {
    fn locate(&self) -> Option<Vec3> {
        Some(expand_flat(*self))
    }
}

impl Locate for [f32; 3] {
    fn locate(&self) -> Option<Vec3> {
        Some(Vec3::from_array(*self))
    }
}

impl Locate for (f32, f32) {
    fn locate(&self) -> Option<Vec3> {
        Some(expand_flat(Vec2::new(self.0, self.1)))
    }
}

impl Locate for (f32, f32, f32) {
    fn locate(&self) -> Option<Vec3> {
        Some(Vec3::new(self.0, self.1, self.2))
    }
}

impl Locate for Transform {
    fn locate(&self) -> Option<Vec3> {
        Some(self.position)
    }
}

impl<T: Locate> Locate for Option<T> {
    fn locate(&self) -> Option<Vec3> {
        self.as_ref().and_then(Locate::locate)
    }
}

impl<T: Locate + ?Sized> Locate for &T {
    fn locate(&self) -> Option<Vec3> {
        (**self).locate()
    }
}

/// An entity looked up through its [`Transform`]
#[derive(Clone, Copy)]
pub struct WorldEntity<'w> {
    pub world: &'w World,
    pub entity: Entity,
}

impl<'w> WorldEntity<'w> {
    pub fn new(world: &'w World, entity: Entity) -> Self {
        Self { world, entity }
    }
}

impl Locate for WorldEntity<'_> {
    fn locate(&self) -> Option<Vec3> {
        self.world
            .get::<Transform>(self.entity)
            .ok()
            .map(|transform| transform.position)
    }
}

/// A rigid body looked up in the physics world
#[derive(Clone, Copy)]
pub struct PhysicsBody<'p> {
    pub physics: &'p Physics,
    pub handle: RigidBodyHandle,
}

impl<'p> PhysicsBody<'p> {
    pub fn new(physics: &'p Physics, handle: RigidBodyHandle) -> Self {
        Self { physics, handle }
    }
}

impl Locate for PhysicsBody<'_> {
    fn locate(&self) -> Option<Vec3> {
        self.physics.get_position(self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Name;

    #[test]
    fn test_plain_points() {
        assert_eq!(Vec3::new(1.0, 2.0, 3.0).locate(), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(Vec2::new(1.0, 2.0).locate(), Some(Vec3::new(1.0, 0.0, 2.0)));
        assert_eq!((1.0, 2.0).locate(), Some(Vec3::new(1.0, 0.0, 2.0)));
        assert_eq!((1.0, 2.0, 3.0).locate(), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!([4.0, 5.0, 6.0].locate(), Some(Vec3::new(4.0, 5.0, 6.0)));
    }

    #[test]
    fn test_option_is_absent() {
        let none: Option<Vec3> = None;
        assert_eq!(none.locate(), None);
        assert_eq!(Some(Vec3::ONE).locate(), Some(Vec3::ONE));
    }

    #[test]
    fn test_world_entity() {
        let mut world = World::new();
        let placed = world.spawn((Transform::from_position(Vec3::new(2.0, 0.0, 1.0)),));
        let bare = world.spawn((Name::new("bare"),));

        assert_eq!(
            WorldEntity::new(&world, placed).locate(),
            Some(Vec3::new(2.0, 0.0, 1.0))
        );
        assert_eq!(WorldEntity::new(&world, bare).locate(), None);

        world.despawn(placed).unwrap();
        assert_eq!(WorldEntity::new(&world, placed).locate(), None);
    }

    #[test]
    fn test_physics_body() {
        let mut physics = Physics::new();
        let body = physics.create_static_body(Vec3::new(0.0, 1.0, 4.0));

        assert_eq!(
            PhysicsBody::new(&physics, body).locate(),
            Some(Vec3::new(0.0, 1.0, 4.0))
        );

        physics.remove_body(body);
        assert_eq!(PhysicsBody::new(&physics, body).locate(), None);
    }
}
