//! Physics world and line-of-sight queries using rapier3d

use glam::Vec3;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::parry::shape::Ball;
use rapier3d::prelude::*;

/// Handle to a rigid body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RigidBodyHandle(pub rapier3d::dynamics::RigidBodyHandle);

/// Handle to a collider in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub rapier3d::geometry::ColliderHandle);

/// Below this length a sight line is treated as already arrived
const MIN_SIGHT_DISTANCE: f32 = 1.0e-6;

/// Physics world manager
pub struct Physics {
    /// Gravity vector
    pub gravity: Vec3,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Query pipeline for ray and shape casts
    query_pipeline: QueryPipeline,
    integration_parameters: IntegrationParameters,
}

impl Physics {
    /// Create a new physics world with default gravity
    pub fn new() -> Self {
        Self::with_gravity(Vec3::new(0.0, -9.81, 0.0))
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vec3) -> Self {
        Self {
            gravity,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            integration_parameters: IntegrationParameters::default(),
        }
    }

    /// Step the physics simulation; also refreshes the query pipeline
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.pipeline.step(
            &vector![self.gravity.x, self.gravity.y, self.gravity.z],
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Create a static rigid body (doesn't move)
    pub fn create_static_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![position.x, position.y, position.z])
            .build();

        RigidBodyHandle(self.rigid_body_set.insert(body))
    }

    /// Create a kinematic rigid body (moved by the caller, e.g. an agent)
    pub fn create_kinematic_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(vector![position.x, position.y, position.z])
            .build();

        RigidBodyHandle(self.rigid_body_set.insert(body))
    }

    /// Add a box collider to a rigid body
    pub fn add_box_collider(&mut self, body: RigidBodyHandle, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();

        ColliderHandle(self.collider_set.insert_with_parent(
            collider,
            body.0,
            &mut self.rigid_body_set,
        ))
    }

    /// Add a sphere collider to a rigid body
    pub fn add_sphere_collider(&mut self, body: RigidBodyHandle, radius: f32) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius).build();

        ColliderHandle(self.collider_set.insert_with_parent(
            collider,
            body.0,
            &mut self.rigid_body_set,
        ))
    }

    /// Get the position of a rigid body
    pub fn get_position(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(body.0).map(|rb| {
            let pos = rb.translation();
            Vec3::new(pos.x, pos.y, pos.z)
        })
    }

    /// Set the position of a kinematic body
    pub fn set_kinematic_position(&mut self, body: RigidBodyHandle, position: Vec3) {
        if let Some(rb) = self.rigid_body_set.get_mut(body.0) {
            rb.set_next_kinematic_translation(vector![position.x, position.y, position.z]);
        }
    }

    /// Remove a rigid body and its colliders
    pub fn remove_body(&mut self, body: RigidBodyHandle) {
        self.rigid_body_set.remove(
            body.0,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Cast a ray and return the first hit
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        self.raycast_filtered(origin, direction, max_distance, QueryFilter::default())
    }

    fn raycast_filtered(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(handle, distance)| {
                let point = ray.point_at(distance);
                RaycastHit {
                    collider: ColliderHandle(handle),
                    point: Vec3::new(point.x, point.y, point.z),
                    distance,
                }
            })
    }

    /// First obstruction on the segment `from -> to`, if any
    ///
    /// `exclude` skips the colliders of the looking agent's own body.
    pub fn sight_obstruction(
        &self,
        from: Vec3,
        to: Vec3,
        exclude: Option<RigidBodyHandle>,
    ) -> Option<RaycastHit> {
        let offset = to - from;
        let distance = offset.length();
        if distance < MIN_SIGHT_DISTANCE {
            return None;
        }

        self.raycast_filtered(from, offset / distance, distance, sight_filter(exclude))
    }

    /// True when nothing blocks the straight line from `from` to `to`
    pub fn line_of_sight(&self, from: Vec3, to: Vec3, exclude: Option<RigidBodyHandle>) -> bool {
        match self.sight_obstruction(from, to, exclude) {
            Some(hit) => {
                log::trace!("Sight {from} -> {to} blocked at {:.3}", hit.distance);
                false
            }
            None => true,
        }
    }

    /// True when a sphere of `radius` can sweep from `from` to `to` unobstructed
    pub fn sphere_line_of_sight(
        &self,
        from: Vec3,
        to: Vec3,
        radius: f32,
        exclude: Option<RigidBodyHandle>,
    ) -> bool {
        let offset = to - from;
        let distance = offset.length();
        if distance < MIN_SIGHT_DISTANCE {
            return true;
        }

        let direction = offset / distance;
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(from.x, from.y, from.z);
        let shape_vel = vector![direction.x, direction.y, direction.z];

        let hit = self.query_pipeline.cast_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape_vel,
            &shape,
            ShapeCastOptions::with_max_time_of_impact(distance),
            sight_filter(exclude),
        );

        if let Some((_, hit)) = hit {
            log::trace!(
                "Sphere sight {from} -> {to} (r={radius}) blocked at {:.3}",
                hit.time_of_impact
            );
            return false;
        }
        true
    }
}

fn sight_filter(exclude: Option<RigidBodyHandle>) -> QueryFilter<'static> {
    match exclude {
        Some(body) => QueryFilter::default().exclude_rigid_body(body.0),
        None => QueryFilter::default(),
    }
}

impl Default for Physics {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a raycast
#[derive(Debug, Clone)]
pub struct RaycastHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// The point of intersection
    pub point: Vec3,
    /// Distance from ray origin
    pub distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A wall across the x axis at x = 5
    fn walled_world() -> Physics {
        let mut physics = Physics::with_gravity(Vec3::ZERO);
        let wall = physics.create_static_body(Vec3::new(5.0, 0.0, 0.0));
        physics.add_box_collider(wall, Vec3::new(0.5, 2.0, 2.0));
        physics.step(1.0 / 60.0);
        physics
    }

    #[test]
    fn test_raycast_hits_wall() {
        let physics = walled_world();
        let hit = physics.raycast(Vec3::ZERO, Vec3::X, 100.0).unwrap();

        assert!((hit.distance - 4.5).abs() < 1e-3);
        assert!((hit.point.x - 4.5).abs() < 1e-3);
    }

    #[test]
    fn test_line_of_sight() {
        let physics = walled_world();

        assert!(physics.line_of_sight(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), None));
        assert!(!physics.line_of_sight(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), None));
        // Over the top of the wall
        assert!(physics.line_of_sight(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(10.0, 5.0, 0.0),
            None
        ));
    }

    #[test]
    fn test_line_of_sight_same_point() {
        let physics = walled_world();
        assert!(physics.line_of_sight(Vec3::ONE, Vec3::ONE, None));
        assert!(physics.sphere_line_of_sight(Vec3::ONE, Vec3::ONE, 1.0, None));
    }

    #[test]
    fn test_sphere_line_of_sight_is_wider() {
        let physics = walled_world();
        let from = Vec3::new(0.0, 2.5, 0.0);
        let to = Vec3::new(10.0, 2.5, 0.0);

        // A thin ray passes just above the wall, a fat sphere does not
        assert!(physics.line_of_sight(from, to, None));
        assert!(!physics.sphere_line_of_sight(from, to, 1.0, None));
        assert!(physics.sphere_line_of_sight(from, to, 0.2, None));
    }

    #[test]
    fn test_exclude_own_body() {
        let mut physics = walled_world();
        let agent = physics.create_kinematic_body(Vec3::new(-1.0, 0.0, 0.0));
        physics.add_sphere_collider(agent, 0.5);
        physics.step(1.0 / 60.0);

        let eye = Vec3::new(-1.0, 0.0, 0.0);
        let target = Vec3::new(-5.0, 0.0, 0.0);
        assert!(!physics.line_of_sight(eye, target, None));
        assert!(physics.line_of_sight(eye, target, Some(agent)));
    }
}
